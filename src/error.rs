//! Error types.
//!
//! Page-level errors are never fatal: they are reported through the
//! tooltip and the interaction continues. Only `FeedError` can stop the
//! server, and only at start-up.

use thiserror::Error;

/// One or more placeholder fields were still empty or at their default
/// text when a copy was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("empty or default field present: {}", .placeholders.join(", "))]
pub struct ValidationError {
    /// Default texts of the offending fields, in document order.
    pub placeholders: Vec<String>,
}

/// The clipboard collaborator rejected the write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardWriteError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardWriteError),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed source: {0}")]
    InvalidSource(String),
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to fetch feed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed feed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_placeholders() {
        let err = ValidationError {
            placeholders: vec!["[Cx Name]".to_string(), "[Order ID]".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "empty or default field present: [Cx Name], [Order ID]"
        );
    }

    #[test]
    fn test_copy_error_is_transparent() {
        let err: CopyError = ClipboardWriteError("denied".to_string()).into();
        assert_eq!(err.to_string(), "clipboard write failed: denied");
    }
}
