use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use shared::models::{ShiftEndInput, ShiftStartInput};
use shift_ledger::{Config, DeductionMethod, ShiftLedger, TaxSummaryAggregator};

fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

fn config(work_dir: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("WORK_DIR", work_dir.to_string()),
        ("TIMEZONE", "America/New_York".to_string()),
        ("WEEK_START", "Sunday".to_string()),
        ("MILEAGE_RATE", "0.67".to_string()),
        ("MILEAGE_RATES", "2023=0.655".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid config")
}

fn drive(
    ledger: &ShiftLedger,
    start: (NaiveDate, u32),
    end: (NaiveDate, u32),
    miles: (&str, &str),
    form: ShiftEndInput,
) {
    let shift = ledger
        .create(ShiftStartInput {
            start_date: Some(start.0),
            start_time: NaiveTime::from_hms_opt(start.1, 0, 0),
            start_mileage: Some(dec(miles.0)),
            has_full_tank_at_start: true,
            ..Default::default()
        })
        .expect("start shift");
    ledger
        .complete(
            shift.id,
            ShiftEndInput {
                end_date: Some(end.0),
                end_time: NaiveTime::from_hms_opt(end.1, 0, 0),
                end_mileage: Some(dec(miles.1)),
                trip_count: Some(4),
                ..form
            },
        )
        .expect("complete shift");
}

#[test]
fn test_multi_year_summary_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config(&dir.path().to_string_lossy());
    assert_eq!(config.week_start, Weekday::Sun);

    {
        let ledger =
            ShiftLedger::open(config.ledger_config(), config.database_path()).expect("open");
        let new_year_eve = NaiveDate::from_ymd_opt(2023, 12, 31).expect("date");
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");

        // Overnight shift: starts in 2023, ends in 2024
        drive(
            &ledger,
            (new_year_eve, 20),
            (new_year, 3),
            ("10000", "10200"),
            ShiftEndInput {
                net_fare: Some(dec("300.00")),
                tips: Some(dec("60.00")),
                ..Default::default()
            },
        );
        // Short shift with a big fuel bill
        drive(
            &ledger,
            (new_year, 12),
            (new_year, 14),
            ("10200", "10220"),
            ShiftEndInput {
                net_fare: Some(dec("40.00")),
                did_refuel_at_end: true,
                gallons_filled: Some(dec("12.0")),
                fuel_cost: Some(dec("45.00")),
                ..Default::default()
            },
        );
    }

    let ledger = ShiftLedger::open(config.ledger_config(), config.database_path()).expect("reopen");
    let aggregator = TaxSummaryAggregator::new(ledger, config.mileage_rates.clone());

    let summaries = aggregator.summarize_all();
    assert_eq!(summaries.len(), 2);

    let y2023 = &summaries[0];
    assert_eq!(y2023.year, 2023);
    assert_eq!(y2023.shift_count, 1);
    assert_eq!(y2023.income, dec("360.00"));
    assert_eq!(y2023.mileage_rate, dec("0.655"));
    assert_eq!(y2023.mileage_deduction, dec("131.00"));
    assert_eq!(y2023.mileage_method_estimate, dec("229.00"));
    assert_eq!(y2023.actual_expenses, Decimal::ZERO);
    assert_eq!(y2023.preferred_method(), DeductionMethod::StandardMileage);

    let y2024 = &summaries[1];
    assert_eq!(y2024.year, 2024);
    assert_eq!(y2024.income, dec("40.00"));
    assert_eq!(y2024.mileage_deduction, dec("13.40"));
    assert_eq!(y2024.actual_expenses, dec("45.00"));
    assert_eq!(y2024.actual_expense_estimate, dec("-5.00"));
    assert_eq!(y2024.preferred_method(), DeductionMethod::ActualExpenses);

    // Sunday-start week containing both shifts
    let week = aggregator.week_totals(NaiveDate::from_ymd_opt(2024, 1, 3).expect("date"));
    assert_eq!(week.shift_count, 2);
    assert_eq!(week.miles, dec("220"));
    assert_eq!(week.trips, 8);
}
