//! Input validation helpers
//!
//! Centralized text length limits shared by the validation engine and the
//! photo store.

pub use shared::models::{MAX_DESCRIPTION_LEN, MAX_NOTES_LEN};

// ── Text length limits ──────────────────────────────────────────────

/// Notes, descriptions and other free text
pub const MAX_NOTE_LEN: usize = MAX_NOTES_LEN;

/// Length error for an optional text field, if it exceeds `max_len` chars
pub fn optional_text_error(value: Option<&str>, label: &str, max_len: usize) -> Option<String> {
    let len = value.map(|v| v.chars().count()).unwrap_or(0);
    (len > max_len).then(|| format!("{label} is too long ({len} chars, max {max_len})"))
}
