use thiserror::Error;

/// Errors raised while extracting a single listing document.
///
/// `Parse` and `ClassificationAmbiguous` abort the document; field-level
/// errors are collected on the extraction so the remaining fields survive.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document could not be parsed into an element tree")]
    Parse,

    #[error("template classification ambiguous: {0}")]
    ClassificationAmbiguous(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("field {field} has unexpected format: {reason}")]
    FormatError { field: String, reason: String },

    #[error("internal invariant violation: {0}")]
    Internal(String),
}

impl ExtractError {
    pub fn format(field: &str, reason: impl Into<String>) -> Self {
        ExtractError::FormatError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
