//! FFI interface for C/C++ hosts
//!
//! Provides C-compatible functions for extracting product fields from HTML.
//! Requests and results cross the boundary as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Deserialize;

use crate::config::ExtractorConfig;
use crate::document::DocumentView;
use crate::engine::Extractor;
use crate::error::ExtractError;
use crate::normalize::Normalizer;
use crate::report::ExtractionReport;
use crate::rules::{FieldId, PatternLibrary, RuleSpec};

/// Result struct returned to the host.
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized ExtractionReport (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if the request was invalid (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extraction request from the host
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractionRequest {
    /// Fields to resolve; empty means all of them
    pub fields: Vec<FieldId>,
    pub config: ExtractorConfig,
    /// Replaces the built-in product rules when present
    pub rules: Option<Vec<RuleSpec>>,
}

impl ExtractionRequest {
    fn extractor(self) -> Result<(Extractor, Vec<FieldId>), ExtractError> {
        let library = match self.rules {
            Some(specs) => PatternLibrary::from_specs(specs)?,
            None => PatternLibrary::product_pages(&self.config)?,
        };
        let fields = if self.fields.is_empty() {
            FieldId::ALL.to_vec()
        } else {
            self.fields
        };
        Ok((Extractor::new(library, Normalizer::new(self.config)), fields))
    }
}

/// Run an extraction request against an HTML document and return the report.
/// Only the request can fail; a broken or empty document yields a report
/// with every field absent.
pub fn perform_extraction(html: &[u8], request_json: &str) -> Result<ExtractionReport, ExtractError> {
    let request: ExtractionRequest = serde_json::from_str(request_json)?;
    let (extractor, fields) = request.extractor()?;
    Ok(extractor.run(&DocumentView::from_bytes(html), &fields))
}

/// Extract product fields from HTML according to the request.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `request_json` - JSON-serialized ExtractionRequest (null-terminated)
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (success) or error_ptr set (failure)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_product_fields(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> ExtractionResultFFI {
    let html: &[u8] = if html_ptr.is_null() || html_len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(html_ptr as *const u8, html_len)
    };

    if request_json.is_null() {
        return make_error_result("Request JSON is null");
    }
    let request_str = match CStr::from_ptr(request_json).to_str() {
        Ok(s) => s,
        Err(_) => return make_error_result("Invalid UTF-8 in request JSON"),
    };

    let report = match perform_extraction(html, request_str) {
        Ok(report) => report,
        Err(e) => return make_error_result(&e.to_string()),
    };

    match report.to_json() {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Free an ExtractionResultFFI returned by extract_product_fields
///
/// # Safety
/// - `result` must have been returned by `extract_product_fields`
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

fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_ptr = CString::new(msg.replace('\0', " "))
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut());
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr,
    }
}
