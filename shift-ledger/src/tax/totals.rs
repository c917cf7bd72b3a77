//! Period totals for weekly and yearly views

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Shift;
use shared::util::round_money;

/// Sums over a slice of shifts
///
/// Active shifts are counted in `shift_count` but contribute nothing else;
/// their end-side figures do not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub shift_count: u32,
    pub completed_count: u32,
    pub trips: u32,
    pub miles: Decimal,
    pub hours: Decimal,
    pub revenue: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_profit: Decimal,
}

impl PeriodTotals {
    pub fn from_shifts<'a>(shifts: impl IntoIterator<Item = &'a Shift>) -> Self {
        let mut totals = Self::default();
        for shift in shifts {
            totals.shift_count += 1;
            if !shift.is_completed() {
                continue;
            }
            totals.completed_count += 1;
            totals.trips = totals.trips.saturating_add(shift.trip_count.unwrap_or(0));
            totals.miles += shift.miles_driven().unwrap_or_default();
            totals.hours += shift.duration_hours().unwrap_or_default();
            totals.revenue += shift.revenue();
            totals.income += shift.taxable_income();
            totals.expenses += shift.deductible_expenses();
            totals.net_profit += shift.net_profit();
        }
        totals.revenue = round_money(totals.revenue);
        totals.income = round_money(totals.income);
        totals.expenses = round_money(totals.expenses);
        totals.net_profit = round_money(totals.net_profit);
        totals
    }

    /// Net profit per hour driven
    pub fn hourly_earnings(&self) -> Option<Decimal> {
        if self.hours.is_zero() {
            return None;
        }
        Some(round_money(self.net_profit / self.hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ShiftId, TankLevel};

    fn shift(id: i64, miles: i64, fare: i64, hours: i64) -> Shift {
        let mut s = Shift::new_active(ShiftId(id), 0, Decimal::new(1000, 0), TankLevel::FULL, 0);
        s.end_date = Some(hours * 3_600_000);
        s.end_mileage = Some(Decimal::new(1000 + miles, 0));
        s.trip_count = Some(5);
        s.net_fare = Decimal::new(fare, 0);
        s.parking_fees = Decimal::new(5, 0);
        s
    }

    #[test]
    fn test_sums_completed_shifts() {
        let shifts = vec![shift(1, 40, 100, 2), shift(2, 60, 150, 3)];
        let totals = PeriodTotals::from_shifts(&shifts);

        assert_eq!(totals.shift_count, 2);
        assert_eq!(totals.trips, 10);
        assert_eq!(totals.miles, Decimal::new(100, 0));
        assert_eq!(totals.hours, Decimal::new(5, 0));
        assert_eq!(totals.income, Decimal::new(250, 0));
        assert_eq!(totals.expenses, Decimal::new(10, 0));
        assert_eq!(totals.net_profit, Decimal::new(240, 0));
        assert_eq!(totals.hourly_earnings(), Some(Decimal::new(4800, 2)));
    }

    #[test]
    fn test_active_shift_only_counted() {
        let mut active = shift(1, 40, 100, 2);
        active.end_date = None;
        active.end_mileage = None;
        let totals = PeriodTotals::from_shifts([&active]);

        assert_eq!(totals.shift_count, 1);
        assert_eq!(totals.completed_count, 0);
        assert_eq!(totals.income, Decimal::ZERO);
        assert_eq!(totals.hourly_earnings(), None);
    }
}
