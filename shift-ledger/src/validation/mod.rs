//! Validation Engine
//!
//! Stateless checks over shift form data. Every query can be made at any
//! time with partial data and returns a [`ValidationReport`]: the gate
//! state plus field-attributed messages.
//!
//! | Gate | Enables | Function |
//! |------|---------|----------|
//! | start | "confirm start" | [`validate_start`] |
//! | end | "confirm end" / complete | [`validate_end`] |
//! | record | saving an edit session | [`validate_shift`] |
//!
//! Raw keystrokes go through the [`input`] filters first, so non-numeric
//! text never reaches a numeric field.

pub mod input;
mod report;
mod rules;

pub use input::{
    filter_decimal_input, filter_integer_input, parse_decimal_input, parse_integer_input,
};
pub use report::{Field, MessageKind, ValidationMessage, ValidationReport};
pub use rules::{
    END_MILEAGE_NOT_GREATER, END_NOT_AFTER_START, validate_end, validate_shift, validate_start,
};
