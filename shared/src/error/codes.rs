//! Unified error codes for the shift ledger
//!
//! This module defines all error codes surfaced by the engine to its UI and
//! persistence collaborators. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Shift lifecycle errors
//! - 2xxx: Photo attachment errors
//! - 3xxx: Edit session errors
//! - 4xxx: Vehicle (odometer / fuel) errors
//! - 9xxx: System errors

use super::kind::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid input value
    InvalidInput = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Shift ====================
    /// Shift not found
    ShiftNotFound = 1001,
    /// Shift has already been completed
    ShiftAlreadyCompleted = 1002,
    /// Shift is completed and must be changed through an edit session
    ShiftCompleted = 1003,
    /// Shift has been deleted
    ShiftDeleted = 1004,
    /// Another shift is still active
    ActiveShiftExists = 1005,
    /// End mileage is not greater than start mileage
    EndMileageNotGreater = 1101,
    /// End time is not after start time
    EndBeforeStart = 1102,

    // ==================== 2xxx: Photo ====================
    /// Photo attachment not found
    PhotoNotFound = 2001,
    /// Photo type is not in the configured set
    PhotoTypeUnknown = 2002,
    /// Photo description too long
    PhotoDescriptionTooLong = 2003,

    // ==================== 3xxx: Edit Session ====================
    /// An edit session is already open for the shift
    SessionConflict = 3001,
    /// Working copy changed the shift identity
    SessionIdentityChanged = 3002,

    // ==================== 4xxx: Vehicle ====================
    /// Tank level outside 0-8 or unknown gauge label
    InvalidTankLevel = 4001,
    /// Negative or non-positive odometer reading
    InvalidMileage = 4002,
    /// Negative monetary amount
    NegativeAmount = 4003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Storage full
    StorageFull = 9401,
    /// Storage corrupted
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidInput => "Invalid input",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Shift
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::ShiftAlreadyCompleted => "Shift has already been completed",
            ErrorCode::ShiftCompleted => "Completed shifts can only be changed by editing",
            ErrorCode::ShiftDeleted => "Shift has been deleted",
            ErrorCode::ActiveShiftExists => "Another shift is still active",
            ErrorCode::EndMileageNotGreater => "End mileage must be greater than start mileage",
            ErrorCode::EndBeforeStart => "End time must be after start time",

            // Photo
            ErrorCode::PhotoNotFound => "Photo not found",
            ErrorCode::PhotoTypeUnknown => "Unknown photo type",
            ErrorCode::PhotoDescriptionTooLong => "Photo description is too long",

            // Edit session
            ErrorCode::SessionConflict => "An edit session is already open for this shift",
            ErrorCode::SessionIdentityChanged => "Shift identity cannot be changed",

            // Vehicle
            ErrorCode::InvalidTankLevel => "Tank level must be between E and F",
            ErrorCode::InvalidMileage => "Invalid mileage",
            ErrorCode::NegativeAmount => "Amount cannot be negative",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
        }
    }

    /// Map the code onto the engine's error taxonomy
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::Success => ErrorKind::None,

            ErrorCode::ShiftNotFound | ErrorCode::PhotoNotFound => ErrorKind::NotFound,

            ErrorCode::ValidationFailed
            | ErrorCode::RequiredField
            | ErrorCode::ActiveShiftExists
            | ErrorCode::EndMileageNotGreater
            | ErrorCode::EndBeforeStart => ErrorKind::ValidationFailed,

            ErrorCode::SessionConflict => ErrorKind::SessionConflict,

            ErrorCode::InvalidInput
            | ErrorCode::InvalidFormat
            | ErrorCode::ValueOutOfRange
            | ErrorCode::ShiftAlreadyCompleted
            | ErrorCode::ShiftCompleted
            | ErrorCode::ShiftDeleted
            | ErrorCode::PhotoTypeUnknown
            | ErrorCode::PhotoDescriptionTooLong
            | ErrorCode::SessionIdentityChanged
            | ErrorCode::InvalidTankLevel
            | ErrorCode::InvalidMileage
            | ErrorCode::NegativeAmount => ErrorKind::InvalidInput,

            ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError
            | ErrorCode::StorageFull
            | ErrorCode::StorageCorrupted => ErrorKind::Internal,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidInput),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Shift
            1001 => Ok(ErrorCode::ShiftNotFound),
            1002 => Ok(ErrorCode::ShiftAlreadyCompleted),
            1003 => Ok(ErrorCode::ShiftCompleted),
            1004 => Ok(ErrorCode::ShiftDeleted),
            1005 => Ok(ErrorCode::ActiveShiftExists),
            1101 => Ok(ErrorCode::EndMileageNotGreater),
            1102 => Ok(ErrorCode::EndBeforeStart),

            // Photo
            2001 => Ok(ErrorCode::PhotoNotFound),
            2002 => Ok(ErrorCode::PhotoTypeUnknown),
            2003 => Ok(ErrorCode::PhotoDescriptionTooLong),

            // Edit session
            3001 => Ok(ErrorCode::SessionConflict),
            3002 => Ok(ErrorCode::SessionIdentityChanged),

            // Vehicle
            4001 => Ok(ErrorCode::InvalidTankLevel),
            4002 => Ok(ErrorCode::InvalidMileage),
            4003 => Ok(ErrorCode::NegativeAmount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);

        assert_eq!(ErrorCode::ShiftNotFound.code(), 1001);
        assert_eq!(ErrorCode::EndMileageNotGreater.code(), 1101);
        assert_eq!(ErrorCode::PhotoNotFound.code(), 2001);
        assert_eq!(ErrorCode::SessionConflict.code(), 3001);
        assert_eq!(ErrorCode::InvalidTankLevel.code(), 4001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::ShiftNotFound));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::PhotoNotFound));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::SessionConflict));
        assert_eq!(ErrorCode::try_from(9403), Ok(ErrorCode::StorageCorrupted));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
        assert_eq!(ErrorCode::try_from(4), Err(InvalidErrorCode(4)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let json = serde_json::to_string(&ErrorCode::PhotoNotFound).unwrap();
        assert_eq!(json, "2001");

        let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ErrorCode::PhotoNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ErrorCode::ShiftNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::PhotoNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            ErrorCode::EndMileageNotGreater.kind(),
            ErrorKind::ValidationFailed
        );
        assert_eq!(ErrorCode::SessionConflict.kind(), ErrorKind::SessionConflict);
        assert_eq!(ErrorCode::InvalidTankLevel.kind(), ErrorKind::InvalidInput);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::ShiftNotFound), "1001");
        assert_eq!(
            ErrorCode::EndMileageNotGreater.message(),
            "End mileage must be greater than start mileage"
        );
    }
}
