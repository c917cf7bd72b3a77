//! Error taxonomy seen by engine callers

use serde::{Deserialize, Serialize};

/// Coarse error class a caller branches on
///
/// - `InvalidInput`: a value outside its domain, surfaced immediately
/// - `ValidationFailed`: a cross-field gate is not satisfied (non-fatal)
/// - `NotFound`: lookup by id or date yields nothing (recoverable)
/// - `SessionConflict`: overlapping edit sessions (programming error)
/// - `Internal`: storage or configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    None,
    InvalidInput,
    ValidationFailed,
    NotFound,
    SessionConflict,
    Internal,
}

