//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Shift lifecycle errors
/// - 2xxx: Photo attachment errors
/// - 3xxx: Edit session errors
/// - 4xxx: Vehicle errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Shift lifecycle errors (1xxx)
    Shift,
    /// Photo attachment errors (2xxx)
    Photo,
    /// Edit session errors (3xxx)
    Session,
    /// Vehicle errors (4xxx)
    Vehicle,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Shift,
            2000..3000 => Self::Photo,
            3000..4000 => Self::Session,
            4000..5000 => Self::Vehicle,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Shift => "shift",
            Self::Photo => "photo",
            Self::Session => "session",
            Self::Vehicle => "vehicle",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
