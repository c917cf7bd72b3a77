//! Data models
//!
//! Shared between the ledger engine and its callers (UI, persistence).
//! Timestamps are `i64` Unix milliseconds; amounts are `rust_decimal::Decimal`.

pub mod photo;
pub mod serde_helpers;
pub mod shift;
pub mod tank;

// Re-exports
pub use photo::*;
pub use shift::*;
pub use tank::*;
