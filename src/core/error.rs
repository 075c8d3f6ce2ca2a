use thiserror::Error;

/// Errors that can occur while building load controls or issuing manifest numbers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CargaError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Manifest number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// The persistence layer behind the sequencer failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A scanned or typed code was rejected.
    #[error("invalid code '{value}': {reason}")]
    InvalidCode {
        /// The rejected input (trimmed).
        value: String,
        /// Why it was rejected, suitable for showing to the operator.
        reason: String,
    },
}

/// Failure reported by a manifest store implementation.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backing database could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The query ran but its result could not be interpreted.
    #[error("query failed: {0}")]
    Query(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "notes[2].number").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Short rule identifier if applicable (e.g. "LC-03").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
