//! Unified error system for the shift ledger
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`ErrorKind`]: The engine taxonomy (invalid input, validation, not found, session conflict)
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Shift lifecycle errors
//! - 2xxx: Photo attachment errors
//! - 3xxx: Edit session errors
//! - 4xxx: Vehicle errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorKind};
//!
//! let err = AppError::new(ErrorCode::ShiftNotFound);
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//!
//! let err = AppError::with_message(ErrorCode::RequiredField, "Trip count is required")
//!     .with_detail("field", "trip_count");
//! assert_eq!(err.kind(), ErrorKind::ValidationFailed);
//! ```

mod category;
mod codes;
mod kind;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use kind::ErrorKind;
pub use types::{AppError, AppResult};
