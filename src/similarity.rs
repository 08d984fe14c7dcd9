//! Edit-distance similarity between a query and an ad title

/// Unit-cost Levenshtein distance over Unicode scalar values.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// `(1 - distance / max_len) * 100`, in `[0, 100]`.
///
/// Two empty strings are identical and score 100.
pub fn similarity_percentage(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let distance = levenshtein_distance(a, b);
    (1.0 - distance as f64 / max_len as f64) * 100.0
}

/// Whether a score clears `threshold`, truncating the score first.
pub fn passes_gate(score: f64, threshold: u32) -> bool {
    score.trunc() as i64 > i64::from(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("kitten", "sitting", 3)]
    #[case("", "abc", 3)]
    #[case("abc", "", 3)]
    #[case("flaw", "lawn", 2)]
    #[case("same", "same", 0)]
    #[case("café", "cafe", 1)]
    fn test_levenshtein(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(levenshtein_distance(a, b), expected);
    }

    #[test]
    fn test_similarity_percentage() {
        assert_eq!(similarity_percentage("abcd", "abcf"), 75.0);
        assert_eq!(similarity_percentage("", ""), 100.0);
        assert_eq!(similarity_percentage("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_gate_is_strict_after_truncation() {
        assert!(!passes_gate(40.0, 40));
        assert!(!passes_gate(40.9, 40));
        assert!(passes_gate(41.0, 40));
    }

    #[test]
    fn test_unrelated_title_fails_gate() {
        let score = similarity_percentage("rare antique lamp", "unrelated gadget");
        assert!(!passes_gate(score, 40));
    }

    proptest! {
        #[test]
        fn prop_identical_strings_score_100(a in ".{1,40}") {
            prop_assert_eq!(similarity_percentage(&a, &a), 100.0);
        }

        #[test]
        fn prop_score_in_range(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
            let score = similarity_percentage(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_distance_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        }
    }
}
