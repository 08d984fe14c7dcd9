//! Rule-based English tokenizer
//!
//! Splits text on whitespace, peels opening/closing punctuation into their own
//! tokens and separates a currency symbol glued to digits (`s$250` becomes
//! `s$`, `250`). Each token records its position and whether it reads like a
//! number, which is all the token-stream extractor needs.
//!
//! The tokenizer holds no per-call state; use [`Tokenizer::shared`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TOKENIZER: Lazy<Tokenizer> = Lazy::new(|| {
    debug!("initializing shared tokenizer");
    Tokenizer::new()
});

const PREFIX_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '\u{201c}', '\u{2018}'];
const SUFFIX_PUNCT: &[char] = &[
    ')', ']', '}', '"', '\'', ',', '.', ':', ';', '!', '?', '\u{201d}', '\u{2019}',
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion",
];

/// One token of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Position in the token sequence
    pub index: usize,
    pub like_num: bool,
}

#[derive(Debug)]
pub struct Tokenizer {
    glued_currency: Regex,
    number_words: HashSet<&'static str>,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            glued_currency: Regex::new(r"^([^\d\s]*\$[^\d\s]*)(\d[\d,.]*)$")
                .expect("glued currency pattern is valid"),
            number_words: NUMBER_WORDS.iter().copied().collect(),
        }
    }

    /// Process-wide instance, built on first use
    pub fn shared() -> &'static Tokenizer {
        &TOKENIZER
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut pieces = Vec::new();
        for chunk in text.split_whitespace() {
            self.split_chunk(chunk, &mut pieces);
        }

        pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| Token {
                text,
                index,
                like_num: self.like_num(text),
            })
            .collect()
    }

    fn split_chunk<'a>(&self, chunk: &'a str, out: &mut Vec<&'a str>) {
        let mut rest = chunk;

        while let Some(c) = rest.chars().next() {
            if !PREFIX_PUNCT.contains(&c) || rest.len() == c.len_utf8() {
                break;
            }
            out.push(&rest[..c.len_utf8()]);
            rest = &rest[c.len_utf8()..];
        }

        let mut suffixes = Vec::new();
        while let Some(c) = rest.chars().next_back() {
            if !SUFFIX_PUNCT.contains(&c) || rest.len() == c.len_utf8() {
                break;
            }
            let cut = rest.len() - c.len_utf8();
            suffixes.push(&rest[cut..]);
            rest = &rest[..cut];
        }

        match self.glued_currency.captures(rest) {
            Some(caps) => {
                if let (Some(symbol), Some(amount)) = (caps.get(1), caps.get(2)) {
                    out.push(symbol.as_str());
                    out.push(amount.as_str());
                } else {
                    out.push(rest);
                }
            }
            None => out.push(rest),
        }

        out.extend(suffixes.into_iter().rev());
    }

    /// Digits (with `,`/`.` separators), simple fractions, or number words.
    pub fn like_num(&self, text: &str) -> bool {
        let text = text
            .strip_prefix(|c: char| matches!(c, '+' | '-' | '~' | '\u{b1}'))
            .unwrap_or(text);
        if text.is_empty() {
            return false;
        }

        let bare: String = text.chars().filter(|c| *c != ',' && *c != '.').collect();
        if !bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }

        if let Some((num, denom)) = text.split_once('/') {
            let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if is_digits(num) && is_digits(denom) {
                return true;
            }
        }

        self.number_words.contains(text.to_lowercase().as_str())
    }
}
