//! Input validation for classification requests

/// Maximum accepted input length, in characters
pub const MAX_TEXT_CHARS: usize = 5000;

/// Error type for malformed input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text too long: {len} characters (max {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("Unknown label: {0:?}")]
    UnknownLabel(String),
}

/// Reject empty (or whitespace-only) and oversized texts
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong {
            len,
            max: MAX_TEXT_CHARS,
        });
    }

    Ok(())
}
