//! Application error type

use super::codes::ErrorCode;
use super::kind::ErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the uniform error shape handed to UI and persistence
/// collaborators:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (affected field, ids, validation messages)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::ShiftNotFound);
        assert_eq!(err.code, ErrorCode::ShiftNotFound);
        assert_eq!(err.message, "Shift not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(
            ErrorCode::EndMileageNotGreater,
            "End mileage must be greater than start mileage",
        )
        .with_detail("field", "end_mileage")
            .with_detail("shift_id", 7);

        assert_eq!(err.code, ErrorCode::EndMileageNotGreater);
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "end_mileage");
        assert_eq!(details.get("shift_id").unwrap(), 7);
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::with_message(ErrorCode::ShiftNotFound, "Shift 12 not found");
        assert_eq!(err.to_string(), "Shift 12 not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_serialize_skips_empty_details() {
        let err = AppError::with_message(ErrorCode::SessionConflict, "shift 3 is being edited");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 3001);
        assert!(json.get("details").is_none());
    }
}
