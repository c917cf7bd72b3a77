//! Utility module
//!
//! - [`logger`] - tracing subscriber setup and log rotation cleanup
//! - [`time`] - calendar conversions in the ledger time zone
//! - [`validation`] - text length limits

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
