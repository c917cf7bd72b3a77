use super::*;
use crate::validation::{Field, MessageKind};
use rust_decimal::Decimal;
use shared::error::{ErrorCode, ErrorKind};

fn create_test_ledger() -> ShiftLedger {
    ShiftLedger::new(LedgerConfig::default())
}

fn create_persistent_ledger() -> ShiftLedger {
    let storage = ShiftStorage::open_in_memory().unwrap();
    ShiftLedger::with_storage(LedgerConfig::default(), storage).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

// ========================================================================
// Helper: start and end forms
// ========================================================================

fn start_form(day: NaiveDate, mileage: &str) -> ShiftStartInput {
    ShiftStartInput {
        start_date: Some(day),
        start_time: Some(time(8, 0)),
        start_mileage: Some(dec(mileage)),
        start_tank_level: Some(6),
        ..Default::default()
    }
}

fn end_form(day: NaiveDate, mileage: &str) -> ShiftEndInput {
    ShiftEndInput {
        end_date: Some(day),
        end_time: Some(time(16, 30)),
        end_mileage: Some(dec(mileage)),
        trip_count: Some(10),
        net_fare: Some(dec("200.00")),
        tips: Some(dec("45.50")),
        promotions: Some(dec("15.00")),
        tolls_reimbursed: Some(dec("6.05")),
        ..Default::default()
    }
}

// ========================================================================
// Helper: a completed shift on `day` covering `start..end` miles
// ========================================================================

fn completed_shift(ledger: &ShiftLedger, day: NaiveDate, start: &str, end: &str) -> Shift {
    let shift = ledger.create(start_form(day, start)).unwrap();
    ledger.complete(shift.id, end_form(day, end)).unwrap()
}

mod test_photos;
