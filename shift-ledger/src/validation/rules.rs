//! Gate rules
//!
//! Every rule looks at its own condition only. Nothing is remembered
//! between calls, so a message disappears exactly when the value it
//! describes becomes valid, whatever else changed in the meantime.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{Shift, ShiftEndInput, ShiftStartInput, TankLevel};

use super::report::{Field, ValidationReport};
use crate::utils::time::date_time_to_millis;
use crate::utils::validation::{MAX_NOTE_LEN, optional_text_error};

pub const END_MILEAGE_NOT_GREATER: &str = "End mileage must be greater than start mileage";
pub const END_NOT_AFTER_START: &str = "End time must be after start time";

/// "Confirm start" gate
///
/// Requires start date, start time, a positive start mileage and a start
/// tank level (or the full-tank toggle).
pub fn validate_start(input: &ShiftStartInput) -> ValidationReport {
    let mut report = ValidationReport::new();

    if input.start_date.is_none() {
        report.required(Field::StartDate);
    }
    if input.start_time.is_none() {
        report.required(Field::StartTime);
    }
    check_start_mileage(&mut report, input.start_mileage);

    if !input.has_full_tank_at_start {
        match input.start_tank_level {
            None => report.required(Field::StartTankLevel),
            Some(level) => check_tank_level(&mut report, Field::StartTankLevel, level),
        }
    }

    check_notes(&mut report, input.notes.as_deref());

    tracing::debug!(valid = report.is_valid(), messages = report.len(), "Start gate evaluated");
    report
}

/// "Confirm end" gate for completing `shift` with `input`
pub fn validate_end(shift: &Shift, input: &ShiftEndInput, tz: Tz) -> ValidationReport {
    let mut report = ValidationReport::new();

    match (input.end_date, input.end_time) {
        (Some(date), Some(time)) => {
            if date_time_to_millis(date, time, tz) <= shift.start_date {
                report.failed(Field::EndTime, END_NOT_AFTER_START);
            }
        }
        (date, time) => {
            if date.is_none() {
                report.required(Field::EndDate);
            }
            if time.is_none() {
                report.required(Field::EndTime);
            }
        }
    }

    check_end_mileage(&mut report, shift.start_mileage, input.end_mileage);

    if let Some(level) = input.end_tank_level {
        check_tank_level(&mut report, Field::EndTankLevel, level);
    }

    match input.trip_count {
        None => report.required(Field::TripCount),
        Some(count) => check_trip_count(&mut report, count),
    }

    for (field, amount) in [
        (Field::NetFare, input.net_fare),
        (Field::Tips, input.tips),
        (Field::Promotions, input.promotions),
        (Field::Tolls, input.tolls),
        (Field::TollsReimbursed, input.tolls_reimbursed),
        (Field::ParkingFees, input.parking_fees),
        (Field::MiscFees, input.misc_fees),
    ] {
        check_non_negative(&mut report, field, amount);
    }

    if input.did_refuel_at_end {
        check_refuel(&mut report, input.gallons_filled, input.fuel_cost);
    }

    check_notes(&mut report, input.notes.as_deref());

    tracing::debug!(
        shift_id = %shift.id,
        valid = report.is_valid(),
        messages = report.len(),
        "End gate evaluated"
    );
    report
}

/// Whole-record check used before an edited shift is saved
///
/// Start-side rules always apply; end-side rules apply once the shift has
/// an end date.
pub fn validate_shift(shift: &Shift) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_start_mileage(&mut report, Some(shift.start_mileage));

    if let Some(end_date) = shift.end_date {
        if end_date <= shift.start_date {
            report.failed(Field::EndTime, END_NOT_AFTER_START);
        }
        check_end_mileage(&mut report, shift.start_mileage, shift.end_mileage);
        match shift.trip_count {
            None => report.required(Field::TripCount),
            Some(count) => check_trip_count(&mut report, i64::from(count)),
        }
    }

    for (field, amount) in [
        (Field::NetFare, shift.net_fare),
        (Field::Tips, shift.tips),
        (Field::Promotions, shift.promotions),
        (Field::Tolls, shift.tolls),
        (Field::TollsReimbursed, shift.tolls_reimbursed),
        (Field::ParkingFees, shift.parking_fees),
        (Field::MiscFees, shift.misc_fees),
    ] {
        check_non_negative(&mut report, field, Some(amount));
    }

    if shift.did_refuel_at_end {
        check_refuel(&mut report, shift.gallons_filled, shift.fuel_cost);
    }

    check_notes(&mut report, shift.notes.as_deref());

    tracing::debug!(
        shift_id = %shift.id,
        valid = report.is_valid(),
        messages = report.len(),
        "Shift record validated"
    );
    report
}

// ========== Field rules ==========

fn check_start_mileage(report: &mut ValidationReport, mileage: Option<Decimal>) {
    match mileage {
        None => report.required(Field::StartMileage),
        Some(m) if m < Decimal::ZERO => {
            report.invalid(Field::StartMileage, "Start mileage cannot be negative")
        }
        Some(m) if m.is_zero() => {
            report.failed(Field::StartMileage, "Start mileage must be greater than zero")
        }
        Some(_) => {}
    }
}

fn check_end_mileage(report: &mut ValidationReport, start: Decimal, end: Option<Decimal>) {
    match end {
        None => report.required(Field::EndMileage),
        Some(m) if m < Decimal::ZERO => {
            report.invalid(Field::EndMileage, "End mileage cannot be negative")
        }
        Some(m) if m <= start => report.failed(Field::EndMileage, END_MILEAGE_NOT_GREATER),
        Some(_) => {}
    }
}

fn check_tank_level(report: &mut ValidationReport, field: Field, level: i64) {
    if let Err(e) = TankLevel::new(level) {
        report.invalid(field, format!("{}: {}", field.label(), e));
    }
}

fn check_trip_count(report: &mut ValidationReport, count: i64) {
    if count < 0 {
        report.invalid(Field::TripCount, "Trip count cannot be negative");
    } else if count > i64::from(u32::MAX) {
        report.invalid(Field::TripCount, "Trip count is too large");
    } else if count == 0 {
        report.failed(Field::TripCount, "Trip count must be greater than zero");
    }
}

fn check_non_negative(report: &mut ValidationReport, field: Field, amount: Option<Decimal>) {
    if let Some(a) = amount
        && a < Decimal::ZERO
    {
        report.invalid(field, format!("{} cannot be negative", field.label()));
    }
}

fn check_refuel(
    report: &mut ValidationReport,
    gallons_filled: Option<Decimal>,
    fuel_cost: Option<Decimal>,
) {
    for (field, value) in [
        (Field::GallonsFilled, gallons_filled),
        (Field::FuelCost, fuel_cost),
    ] {
        match value {
            None => report.required(field),
            some => check_non_negative(report, field, some),
        }
    }
}

fn check_notes(report: &mut ValidationReport, notes: Option<&str>) {
    if let Some(message) = optional_text_error(notes, Field::Notes.label(), MAX_NOTE_LEN) {
        report.invalid(Field::Notes, message);
    }
}
