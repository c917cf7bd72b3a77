//! Shift Model
//!
//! A shift is one driving session. Status is never stored: a shift is
//! [`ShiftStatus::Active`] until `end_date` is set, then
//! [`ShiftStatus::Completed`].
//!
//! | Side  | Fields |
//! |-------|--------|
//! | start | `start_date`, `start_mileage`, `start_tank_level` |
//! | end   | `end_date`, `end_mileage`, `end_tank_level`, `trip_count`, money, fuel |
//!
//! All amounts are `Decimal` with an absent value meaning `0.00`.

use super::photo::PhotoStore;
use super::serde_helpers;
use super::tank::TankLevel;
use crate::util::round_money;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of shift notes
pub const MAX_NOTES_LEN: usize = 500;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Ledger-assigned shift identifier (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(pub i64);

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state, derived from `end_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Active,
    Completed,
}

/// Shift record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    /// Start timestamp (Unix millis)
    pub start_date: i64,
    /// End timestamp (Unix millis), absent while active
    pub end_date: Option<i64>,
    pub start_mileage: Decimal,
    pub end_mileage: Option<Decimal>,
    pub start_tank_level: TankLevel,
    pub end_tank_level: Option<TankLevel>,
    pub trip_count: Option<u32>,
    #[serde(default)]
    pub net_fare: Decimal,
    #[serde(default)]
    pub tips: Decimal,
    #[serde(default)]
    pub promotions: Decimal,
    #[serde(default)]
    pub tolls: Decimal,
    #[serde(default)]
    pub tolls_reimbursed: Decimal,
    #[serde(default)]
    pub parking_fees: Decimal,
    #[serde(default)]
    pub misc_fees: Decimal,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub did_refuel_at_end: bool,
    pub gallons_filled: Option<Decimal>,
    pub fuel_cost: Option<Decimal>,
    #[serde(default)]
    pub photos: PhotoStore,
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
    pub created_date: i64,
    pub modified_date: i64,
}

impl Shift {
    /// New active shift with only start-side fields set
    pub fn new_active(
        id: ShiftId,
        start_date: i64,
        start_mileage: Decimal,
        start_tank_level: TankLevel,
        now: i64,
    ) -> Self {
        Self {
            id,
            start_date,
            end_date: None,
            start_mileage,
            end_mileage: None,
            start_tank_level,
            end_tank_level: None,
            trip_count: None,
            net_fare: Decimal::ZERO,
            tips: Decimal::ZERO,
            promotions: Decimal::ZERO,
            tolls: Decimal::ZERO,
            tolls_reimbursed: Decimal::ZERO,
            parking_fees: Decimal::ZERO,
            misc_fees: Decimal::ZERO,
            did_refuel_at_end: false,
            gallons_filled: None,
            fuel_cost: None,
            photos: PhotoStore::new(),
            notes: None,
            is_deleted: false,
            created_date: now,
            modified_date: now,
        }
    }

    pub fn status(&self) -> ShiftStatus {
        if self.end_date.is_some() {
            ShiftStatus::Completed
        } else {
            ShiftStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == ShiftStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status() == ShiftStatus::Completed
    }

    pub fn has_full_tank_at_start(&self) -> bool {
        self.start_tank_level.is_full()
    }

    // ========== Derived figures ==========

    pub fn miles_driven(&self) -> Option<Decimal> {
        self.end_mileage.map(|end| end - self.start_mileage)
    }

    pub fn duration_millis(&self) -> Option<i64> {
        self.end_date.map(|end| end - self.start_date)
    }

    /// Shift length in hours, rounded to 2 places
    pub fn duration_hours(&self) -> Option<Decimal> {
        self.duration_millis()
            .map(|ms| round_money(Decimal::from(ms) / Decimal::from(MILLIS_PER_HOUR)))
    }

    /// Gross earnings before reimbursements are backed out
    pub fn revenue(&self) -> Decimal {
        self.net_fare + self.tips + self.promotions
    }

    /// Income counted toward the yearly tax summary
    pub fn taxable_income(&self) -> Decimal {
        self.revenue() - self.tolls_reimbursed
    }

    pub fn fuel_expense(&self) -> Decimal {
        if self.did_refuel_at_end {
            self.fuel_cost.unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    }

    /// Expenses deductible under the actual-expense method
    pub fn deductible_expenses(&self) -> Decimal {
        self.tolls + self.parking_fees + self.misc_fees + self.fuel_expense()
    }

    pub fn net_profit(&self) -> Decimal {
        self.taxable_income() - self.deductible_expenses()
    }

    pub fn hourly_earnings(&self) -> Option<Decimal> {
        let ms = self.duration_millis()?;
        if ms <= 0 {
            return None;
        }
        let hours = Decimal::from(ms) / Decimal::from(MILLIS_PER_HOUR);
        Some(round_money(self.net_profit() / hours))
    }

    pub fn profit_per_mile(&self) -> Option<Decimal> {
        let miles = self.miles_driven()?;
        if miles.is_zero() {
            return None;
        }
        Some(round_money(self.net_profit() / miles))
    }

    /// Standard mileage deduction for this shift at `rate` per mile
    pub fn mileage_deduction(&self, rate: Decimal) -> Option<Decimal> {
        self.miles_driven().map(|miles| round_money(miles * rate))
    }
}

/// Start-of-shift form data
///
/// Every field is optional so a half-filled form can be validated at any
/// time. `start_tank_level` is the raw gauge position; the full-tank toggle
/// makes it optional and forces level 8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftStartInput {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub start_mileage: Option<Decimal>,
    pub start_tank_level: Option<i64>,
    pub has_full_tank_at_start: bool,
    pub notes: Option<String>,
    /// Photos attached before the shift exists
    pub photos: PhotoStore,
}

/// End-of-shift form data
///
/// Amounts left empty count as zero. With `did_refuel_at_end` off, the
/// fuel fields are ignored and cleared on the shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftEndInput {
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
    pub end_mileage: Option<Decimal>,
    pub end_tank_level: Option<i64>,
    pub trip_count: Option<i64>,
    pub net_fare: Option<Decimal>,
    pub tips: Option<Decimal>,
    pub promotions: Option<Decimal>,
    pub tolls: Option<Decimal>,
    pub tolls_reimbursed: Option<Decimal>,
    pub parking_fees: Option<Decimal>,
    pub misc_fees: Option<Decimal>,
    pub did_refuel_at_end: bool,
    pub gallons_filled: Option<Decimal>,
    pub fuel_cost: Option<Decimal>,
    pub notes: Option<String>,
}
