//! Code shape classification and validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{CargaError, CodeFormat};

/// Length of a DANFE access key.
pub const DANFE_KEY_LEN: usize = 44;
/// Longest purely numeric code accepted besides a DANFE key.
pub const MAX_NUMERIC_LEN: usize = 20;
/// Longest alphanumeric code accepted.
pub const MAX_ALPHANUMERIC_LEN: usize = 50;

/// Error returned when a scanned or typed code fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeError {
    /// The rejected input (trimmed).
    pub value: String,
    /// Why the value failed validation, meant for the operator.
    pub reason: String,
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid code '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for CodeError {}

impl From<CodeError> for CargaError {
    fn from(e: CodeError) -> Self {
        CargaError::InvalidCode {
            value: e.value,
            reason: e.reason,
        }
    }
}

/// Verdict of [`validate_code`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeValidation {
    pub valid: bool,
    /// Present exactly when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CodeValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Convert into a `Result`, attaching the (trimmed) code to the error.
    pub fn into_result(self, code: &str) -> Result<(), CodeError> {
        match self.reason {
            None if self.valid => Ok(()),
            reason => Err(CodeError {
                value: code.trim().to_string(),
                reason: reason.unwrap_or_else(|| "invalid code".into()),
            }),
        }
    }
}

pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// `segment-segment`: exactly one hyphen, alphanumerics on both sides.
pub(crate) fn is_hyphenated(s: &str) -> bool {
    match s.split_once('-') {
        Some((left, right)) => is_alphanumeric(left) && is_alphanumeric(right),
        None => false,
    }
}

/// Classify a code by shape. Surrounding whitespace is ignored.
pub fn classify(code: &str) -> CodeFormat {
    let code = code.trim();
    if is_all_digits(code) {
        match code.len() {
            DANFE_KEY_LEN => CodeFormat::Danfe,
            1..=MAX_NUMERIC_LEN => CodeFormat::NumericShort,
            _ => CodeFormat::Invalid,
        }
    } else if is_hyphenated(code) {
        CodeFormat::Hyphenated
    } else if is_alphanumeric(code) && code.len() <= MAX_ALPHANUMERIC_LEN {
        CodeFormat::Alphanumeric
    } else {
        CodeFormat::Invalid
    }
}

/// Validate a scanned or typed code.
///
/// Accepted shapes:
/// - a 44-digit DANFE access key
/// - 1 to 20 digits
/// - `segment-segment` with letters and digits on both sides of one hyphen
/// - 1 to 50 letters and digits
///
/// Rejections carry a reason that can be shown to the operator as-is.
pub fn validate_code(code: &str) -> CodeValidation {
    let code = code.trim();
    if code.is_empty() {
        return CodeValidation::rejected("code must not be empty");
    }

    match classify(code) {
        CodeFormat::Invalid => {}
        _ => return CodeValidation::ok(),
    }

    if is_all_digits(code) {
        return CodeValidation::rejected(format!(
            "numeric codes must have {DANFE_KEY_LEN} digits (DANFE) or at most \
             {MAX_NUMERIC_LEN} digits, got {}",
            code.len()
        ));
    }
    if is_alphanumeric(code) {
        return CodeValidation::rejected(format!(
            "alphanumeric codes may have at most {MAX_ALPHANUMERIC_LEN} characters, got {}",
            code.len()
        ));
    }
    CodeValidation::rejected(
        "only letters, digits and a single hyphen between two segments are allowed",
    )
}
