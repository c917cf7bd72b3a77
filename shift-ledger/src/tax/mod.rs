//! Tax Summary Aggregator
//!
//! Year-to-date figures under the two IRS-style deduction methods, over
//! the non-deleted completed shifts whose start falls in the year.
//!
//! | Figure | Formula |
//! |--------|---------|
//! | income | Σ (net fare + tips + promotions − tolls reimbursed) |
//! | mileage deduction | Σ miles × rate(year) |
//! | mileage method estimate | income − mileage deduction |
//! | actual expenses | Σ (tolls + parking + misc + fuel if refueled) |
//! | actual expense estimate | income − actual expenses |
//!
//! The aggregator only reads from the ledger.

mod totals;

pub use totals::PeriodTotals;

use crate::core::MileageRates;
use crate::ledger::ShiftLedger;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Shift;
use shared::util::round_money;

/// Deduction method a driver can claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    StandardMileage,
    ActualExpenses,
}

/// Yearly tax summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub year: i32,
    pub shift_count: u32,
    pub total_miles: Decimal,
    pub mileage_rate: Decimal,
    pub income: Decimal,
    pub mileage_deduction: Decimal,
    pub mileage_method_estimate: Decimal,
    pub actual_expenses: Decimal,
    pub actual_expense_estimate: Decimal,
}

impl TaxSummary {
    /// Summarize `shifts` for `year`, skipping deleted and active ones
    ///
    /// The caller is responsible for passing shifts of the right year.
    pub fn from_shifts<'a>(
        year: i32,
        shifts: impl IntoIterator<Item = &'a Shift>,
        mileage_rate: Decimal,
    ) -> Self {
        let mut shift_count = 0u32;
        let mut total_miles = Decimal::ZERO;
        let mut income = Decimal::ZERO;
        let mut actual_expenses = Decimal::ZERO;

        for shift in shifts
            .into_iter()
            .filter(|s| !s.is_deleted && s.is_completed())
        {
            shift_count += 1;
            total_miles += shift.miles_driven().unwrap_or_default();
            income += shift.taxable_income();
            actual_expenses += shift.deductible_expenses();
        }

        let income = round_money(income);
        let actual_expenses = round_money(actual_expenses);
        let mileage_deduction = round_money(total_miles * mileage_rate);

        Self {
            year,
            shift_count,
            total_miles,
            mileage_rate,
            income,
            mileage_deduction,
            mileage_method_estimate: income - mileage_deduction,
            actual_expenses,
            actual_expense_estimate: income - actual_expenses,
        }
    }

    /// Method with the lower taxable estimate (standard mileage on a tie)
    pub fn preferred_method(&self) -> DeductionMethod {
        if self.actual_expense_estimate < self.mileage_method_estimate {
            DeductionMethod::ActualExpenses
        } else {
            DeductionMethod::StandardMileage
        }
    }

    /// Taxable estimate under the preferred method
    pub fn best_estimate(&self) -> Decimal {
        self.mileage_method_estimate.min(self.actual_expense_estimate)
    }
}

/// Read-only aggregation over a ledger
#[derive(Debug, Clone)]
pub struct TaxSummaryAggregator {
    ledger: ShiftLedger,
    rates: MileageRates,
}

impl TaxSummaryAggregator {
    pub fn new(ledger: ShiftLedger, rates: MileageRates) -> Self {
        Self { ledger, rates }
    }

    pub fn rates(&self) -> &MileageRates {
        &self.rates
    }

    /// Summary for one calendar year; all zeros when it has no completed shifts
    pub fn summarize(&self, year: i32) -> TaxSummary {
        let shifts = self.ledger.shifts_in_year(year);
        let summary = TaxSummary::from_shifts(year, &shifts, self.rates.rate_for(year));
        tracing::debug!(
            year,
            shifts = summary.shift_count,
            income = %summary.income,
            "Tax summary computed"
        );
        summary
    }

    /// One summary per year with completed shifts, ascending
    pub fn summarize_all(&self) -> Vec<TaxSummary> {
        self.ledger
            .years()
            .into_iter()
            .map(|year| self.summarize(year))
            .filter(|summary| summary.shift_count > 0)
            .collect()
    }

    /// Totals for the ledger week containing `date`
    pub fn week_totals(&self, date: NaiveDate) -> PeriodTotals {
        PeriodTotals::from_shifts(&self.ledger.shifts_in_week(date))
    }

    /// Totals for a calendar year
    pub fn year_totals(&self, year: i32) -> PeriodTotals {
        PeriodTotals::from_shifts(&self.ledger.shifts_in_year(year))
    }
}
