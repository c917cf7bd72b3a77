//! Numeric input filters
//!
//! Keystroke-level filtering applied before a value reaches a shift field.
//! Anything that is not a digit (or the first decimal point) is dropped,
//! so negative numbers and stray characters never enter the form.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Fraction digits kept for money fields
pub const MONEY_FRACTION_DIGITS: usize = 2;
/// Fraction digits kept for odometer readings
pub const MILEAGE_FRACTION_DIGITS: usize = 1;
/// Fraction digits kept for gallons filled
pub const GALLONS_FRACTION_DIGITS: usize = 3;

/// Keep digits and a single decimal point, with at most `max_fraction_digits`
/// after it
pub fn filter_decimal_input(raw: &str, max_fraction_digits: usize) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    let mut fraction_digits = 0;

    for c in raw.chars() {
        match c {
            '0'..='9' if seen_point => {
                if fraction_digits < max_fraction_digits {
                    out.push(c);
                    fraction_digits += 1;
                }
            }
            '0'..='9' => out.push(c),
            '.' if !seen_point && max_fraction_digits > 0 => {
                seen_point = true;
                out.push(c);
            }
            _ => {}
        }
    }
    out
}

/// Keep digits only
pub fn filter_integer_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Filter then parse; `None` when nothing numeric remains
pub fn parse_decimal_input(raw: &str, max_fraction_digits: usize) -> Option<Decimal> {
    let filtered = filter_decimal_input(raw, max_fraction_digits);
    let trimmed = filtered.trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    };
    Decimal::from_str(&normalized).ok()
}

/// Filter then parse; `None` when nothing numeric remains or the value
/// overflows
pub fn parse_integer_input(raw: &str) -> Option<i64> {
    let filtered = filter_integer_input(raw);
    if filtered.is_empty() {
        return None;
    }
    filtered.parse().ok()
}
