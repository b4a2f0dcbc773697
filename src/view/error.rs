//! View error types

use thiserror::Error;

use crate::browser::TargetError;

/// An expected nested field of an upstream record is absent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed record {record}: missing field `{field}`")]
pub struct MalformedRecordError {
    /// Which record (e.g. "league L1" or "team 2 of league L1")
    pub record: String,
    /// Path of the missing field
    pub field: String,
}

impl MalformedRecordError {
    pub fn new(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
        }
    }
}

/// Errors that abort a render. Content fetch failures never appear here:
/// they are logged and swallowed at the render operation.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecordError),

    #[error("Render target error: {0}")]
    Target(#[from] TargetError),
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MalformedRecordError::new("team 0 of league L1", "founded_year");
        assert_eq!(
            err.to_string(),
            "Malformed record team 0 of league L1: missing field `founded_year`"
        );

        let err: ViewError = err.into();
        assert!(matches!(err, ViewError::MalformedRecord(_)));

        let err: ViewError = TargetError::MissingContainer("teams-container".into()).into();
        assert_eq!(
            err.to_string(),
            "Render target error: Container not found: #teams-container"
        );
    }
}
