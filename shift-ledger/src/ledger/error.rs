use super::storage::StorageError;
use crate::validation::ValidationReport;
use shared::error::{AppError, ErrorCode, ErrorKind};
use shared::models::{InvalidTankLevel, PhotoError, ShiftId};
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    InvalidTankLevel(#[from] InvalidTankLevel),

    #[error("Invalid field values: {} message(s)", .0.len())]
    InvalidFields(ValidationReport),

    #[error("Validation failed: {} message(s)", .0.len())]
    ValidationFailed(ValidationReport),

    #[error("Shift not found: {0}")]
    NotFound(ShiftId),

    #[error("Shift has been deleted: {0}")]
    Deleted(ShiftId),

    #[error("Shift already completed: {0}")]
    AlreadyCompleted(ShiftId),

    #[error("Shift {0} is completed; open an edit session to change it")]
    ShiftCompleted(ShiftId),

    #[error("Shift {0} is still active")]
    ActiveShiftExists(ShiftId),

    #[error("Shift {0} already has an open edit session")]
    SessionConflict(ShiftId),

    #[error("Edit session for shift {expected} tried to save shift {found}")]
    IdentityChanged { expected: ShiftId, found: ShiftId },

    #[error(transparent)]
    Photo(#[from] PhotoError),

    #[error("Shift id sequence exhausted after {0}")]
    SequenceExhausted(i64),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// 闸门拒绝：域外取值归为 InvalidFields，其余归为 ValidationFailed
    pub fn rejected(report: ValidationReport) -> Self {
        if report.has_invalid_input() {
            LedgerError::InvalidFields(report)
        } else {
            LedgerError::ValidationFailed(report)
        }
    }

    /// Error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::Storage(e) => classify_storage_error(e),
            LedgerError::InvalidInput(_) => ErrorCode::InvalidInput,
            LedgerError::InvalidTankLevel(_) => ErrorCode::InvalidTankLevel,
            LedgerError::InvalidFields(report) | LedgerError::ValidationFailed(report) => {
                report.code()
            }
            LedgerError::NotFound(_) => ErrorCode::ShiftNotFound,
            LedgerError::Deleted(_) => ErrorCode::ShiftDeleted,
            LedgerError::AlreadyCompleted(_) => ErrorCode::ShiftAlreadyCompleted,
            LedgerError::ShiftCompleted(_) => ErrorCode::ShiftCompleted,
            LedgerError::ActiveShiftExists(_) => ErrorCode::ActiveShiftExists,
            LedgerError::SessionConflict(_) => ErrorCode::SessionConflict,
            LedgerError::IdentityChanged { .. } => ErrorCode::SessionIdentityChanged,
            LedgerError::Photo(PhotoError::NotFound(_)) => ErrorCode::PhotoNotFound,
            LedgerError::Photo(PhotoError::UnknownType(_)) => ErrorCode::PhotoTypeUnknown,
            LedgerError::Photo(PhotoError::DescriptionTooLong { .. }) => {
                ErrorCode::PhotoDescriptionTooLong
            }
            LedgerError::SequenceExhausted(_) => ErrorCode::InternalError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// 闸门失败携带的校验报告
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            LedgerError::InvalidFields(report) | LedgerError::ValidationFailed(report) => {
                Some(report)
            }
            _ => None,
        }
    }
}

/// 将存储错误转换为错误码
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::StorageCorrupted;
    }

    // redb errors are classified by message
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    ErrorCode::DatabaseError
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let code = err.code();
        match err {
            LedgerError::InvalidFields(report) | LedgerError::ValidationFailed(report) => {
                report.to_app_error()
            }
            LedgerError::Storage(e) => {
                tracing::error!(error = %e, code = %code, "Ledger storage failure");
                AppError::with_message(code, e.to_string())
            }
            LedgerError::NotFound(id)
            | LedgerError::Deleted(id)
            | LedgerError::AlreadyCompleted(id)
            | LedgerError::ShiftCompleted(id)
            | LedgerError::ActiveShiftExists(id)
            | LedgerError::SessionConflict(id) => {
                AppError::with_message(code, err.to_string()).with_detail("shift_id", id.0)
            }
            LedgerError::Photo(PhotoError::NotFound(photo_id)) => {
                AppError::with_message(code, err.to_string())
                    .with_detail("photo_id", photo_id.to_string())
            }
            other => AppError::with_message(code, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, MessageKind};

    #[test]
    fn test_kinds() {
        assert_eq!(LedgerError::NotFound(ShiftId(1)).kind(), ErrorKind::NotFound);
        assert_eq!(
            LedgerError::SessionConflict(ShiftId(1)).kind(),
            ErrorKind::SessionConflict
        );
        assert_eq!(
            LedgerError::InvalidInput("bad".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            LedgerError::ActiveShiftExists(ShiftId(1)).kind(),
            ErrorKind::ValidationFailed
        );
    }

    #[test]
    fn test_validation_failure_to_app_error() {
        let mut report = ValidationReport::new();
        report.push(
            MessageKind::ValidationFailed,
            Field::EndMileage,
            "End mileage must be greater than start mileage",
        );
        let err = LedgerError::ValidationFailed(report);
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.report().is_some());

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::EndMileageNotGreater);
        assert!(app.details.unwrap().contains_key("messages"));
    }

    #[test]
    fn test_rejected_picks_variant_by_message_kind() {
        let mut report = ValidationReport::new();
        report.push(MessageKind::Required, Field::StartTime, "Start time is required");
        report.push(
            MessageKind::InvalidInput,
            Field::StartMileage,
            "Start mileage cannot be negative",
        );
        let err = LedgerError::rejected(report);
        assert!(matches!(err, LedgerError::InvalidFields(_)));
        assert_eq!(err.code(), ErrorCode::InvalidMileage);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.report().unwrap().len(), 2);

        let mut report = ValidationReport::new();
        report.push(MessageKind::Required, Field::StartTime, "Start time is required");
        let err = LedgerError::rejected(report);
        assert!(matches!(err, LedgerError::ValidationFailed(_)));
        assert_eq!(err.code(), ErrorCode::RequiredField);
    }

    #[test]
    fn test_tank_level_and_sequence_codes() {
        let err = LedgerError::from(InvalidTankLevel::OutOfRange(9));
        assert_eq!(err.code(), ErrorCode::InvalidTankLevel);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = LedgerError::SequenceExhausted(i64::MAX);
        assert_eq!(err.kind(), ErrorKind::Internal);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_shift_id_detail() {
        let app: AppError = LedgerError::NotFound(ShiftId(42)).into();
        assert_eq!(app.code, ErrorCode::ShiftNotFound);
        assert_eq!(app.details.unwrap()["shift_id"], 42);
    }
}
