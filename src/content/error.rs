//! Content gateway error types

use thiserror::Error;

/// Errors that can occur when talking to the content source
#[derive(Error, Debug)]
pub enum ContentError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The content API rejected our credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success status from the content API
    #[error("Content API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No record matched the query
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The API root did not advertise a master ref
    #[error("Content API returned no master ref")]
    NoMasterRef,
}

impl ContentError {
    /// True for the "no matching record" kind; every other variant is a fetch failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Decode(err.to_string())
    }
}

/// Result type alias for content operations
pub type ContentResult<T> = Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContentError::NotFound("league nhl".to_string());
        assert_eq!(err.to_string(), "Not found: league nhl");

        let err = ContentError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Content API error 500: boom");
    }

    #[test]
    fn test_not_found_kind() {
        assert!(ContentError::NotFound("x".into()).is_not_found());
        assert!(!ContentError::NoMasterRef.is_not_found());
        assert!(!ContentError::Unauthorized("bad token".into()).is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ContentError = json_err.into();
        assert!(matches!(err, ContentError::Decode(_)));
    }
}
