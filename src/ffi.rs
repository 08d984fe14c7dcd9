//! FFI interface for the transport layer
//!
//! Provides C-compatible functions for extracting a price range from a search
//! payload. Requests and results cross the boundary as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::config::ExtractorConfig;
use crate::error::{PriceExtractionError, Result};
use crate::payload::SearchResultPayload;
use crate::request::SearchRequest;

/// Settings file consulted once per process, relative to the working directory
pub const CONFIG_FILE: &str = "price_extraction.toml";

static CONFIG: OnceCell<ExtractorConfig> = OnceCell::new();

/// Result struct returned to the caller
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized PriceReport (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract a min/max price from a search payload.
///
/// # Arguments
/// * `request_json` - JSON-serialized SearchRequest (null-terminated)
/// * `payload_ptr` - Pointer to the provider's JSON response (UTF-8, not necessarily null-terminated)
/// * `payload_len` - Length of the payload in bytes
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (success) or error_ptr set (failure).
/// A payload without prices is a success with a zero-valued report.
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string
/// - `payload_ptr` must point to valid memory of at least `payload_len` bytes
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_prices_ffi(
    request_json: *const c_char,
    payload_ptr: *const c_char,
    payload_len: usize,
) -> ExtractionResultFFI {
    let request_str = if request_json.is_null() {
        return make_error_result(&PriceExtractionError::NullArgument("request JSON"));
    } else {
        match CStr::from_ptr(request_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result(&PriceExtractionError::InvalidUtf8("request JSON")),
        }
    };

    let payload_str = if payload_ptr.is_null() || payload_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(payload_ptr as *const u8, payload_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s,
            Err(_) => return make_error_result(&PriceExtractionError::InvalidUtf8("payload")),
        }
    };

    match perform_extraction(request_str, payload_str) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_message("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&e),
    }
}

/// Free an ExtractionResultFFI returned by extract_prices_ffi
///
/// # Safety
/// - `result` must have been returned by `extract_prices_ffi`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_extraction_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

/// Install the tracing subscriber (RUST_LOG). Safe to call more than once.
#[no_mangle]
pub extern "C" fn init_logging_ffi() {
    crate::init_logging();
}

fn make_error_result(error: &PriceExtractionError) -> ExtractionResultFFI {
    warn!(error = %error, "extraction request rejected");
    make_error_message(&error.to_string())
}

fn make_error_message(msg: &str) -> ExtractionResultFFI {
    let error_cstr = CString::new(msg).unwrap_or_else(|_| CString::from(c"Unknown error"));
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}

fn shared_config() -> Result<&'static ExtractorConfig> {
    CONFIG.get_or_try_init(|| {
        let config = ExtractorConfig::load(CONFIG_FILE)?;
        info!(?config, "extractor configuration loaded");
        Ok(config)
    })
}

// Decode, extract, encode
fn perform_extraction(request_str: &str, payload_str: &str) -> Result<String> {
    let request: SearchRequest = serde_json::from_str(request_str)?;
    let payload: SearchResultPayload = if payload_str.trim().is_empty() {
        SearchResultPayload::default()
    } else {
        serde_json::from_str(payload_str)?
    };

    let report = crate::extract_for_request(&request, &payload, shared_config()?);
    Ok(serde_json::to_string(&report)?)
}
