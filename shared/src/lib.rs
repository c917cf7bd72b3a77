//! Shared types for the shift ledger
//!
//! Domain models (shifts, fuel gauge, photo attachments), the unified
//! error system and small utilities used by the engine and its callers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
