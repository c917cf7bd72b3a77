use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for monetary values
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Round a monetary value to cents (half away from zero)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
