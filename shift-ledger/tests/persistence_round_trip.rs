use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::models::{PhotoTypes, ShiftEndInput, ShiftId, ShiftStartInput, TankLevel};
use shift_ledger::{LedgerConfig, ShiftLedger, ShiftStorage};

fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn config() -> LedgerConfig {
    LedgerConfig {
        timezone: chrono_tz::America::Chicago,
        ..LedgerConfig::default()
    }
}

fn start(day: NaiveDate, mileage: &str) -> ShiftStartInput {
    ShiftStartInput {
        start_date: Some(day),
        start_time: NaiveTime::from_hms_opt(7, 15, 0),
        start_mileage: Some(dec(mileage)),
        start_tank_level: Some(5),
        ..Default::default()
    }
}

fn end(day: NaiveDate, mileage: &str) -> ShiftEndInput {
    ShiftEndInput {
        end_date: Some(day),
        end_time: NaiveTime::from_hms_opt(15, 45, 0),
        end_mileage: Some(dec(mileage)),
        end_tank_level: Some(2),
        trip_count: Some(12),
        net_fare: Some(dec("210.40")),
        tips: Some(dec("38.25")),
        promotions: Some(dec("10.00")),
        tolls: Some(dec("7.80")),
        tolls_reimbursed: Some(dec("5.20")),
        parking_fees: Some(dec("3.00")),
        misc_fees: Some(dec("0.99")),
        did_refuel_at_end: true,
        gallons_filled: Some(dec("9.412")),
        fuel_cost: Some(dec("33.91")),
        notes: Some("airport runs".into()),
    }
}

#[test]
fn test_ledger_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("shifts.redb");
    let photo_types = PhotoTypes::default();

    let (before, deleted_id) = {
        let ledger = ShiftLedger::open(config(), &db_path).expect("open ledger");

        // Shift with photos attached on the start form
        let mut form = start(date(2024, 4, 1), "41000.5");
        let odometer = form.photos.add(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        form.photos
            .set_type(odometer, photo_types.resolve("Odometer").expect("known type"))
            .expect("photo exists");
        form.photos
            .set_description(odometer, "start reading")
            .expect("photo exists");
        let shift = ledger.create(form).expect("create");

        let dash = ledger.add_photo(shift.id, vec![1; 64]).expect("add photo");
        ledger
            .set_photo_type(shift.id, dash, "Dashboard")
            .expect("set type");
        ledger
            .complete(shift.id, end(date(2024, 4, 1), "41180.3"))
            .expect("complete");

        // Receipt added afterwards through an edit session
        let mut session = ledger.edit(shift.id).expect("edit");
        let receipt = session.photos_mut().add(vec![2; 32]);
        session
            .set_photo_type(receipt, "Receipt")
            .expect("set receipt type");
        session.commit().expect("commit");

        let gone = ledger
            .create(ShiftStartInput {
                has_full_tank_at_start: true,
                start_tank_level: None,
                ..start(date(2024, 4, 2), "41180.3")
            })
            .expect("create second");
        ledger.delete(gone.id).expect("delete");

        let active = ledger
            .create(start(date(2024, 4, 3), "41200"))
            .expect("create third");
        assert!(active.is_active());

        (ledger.shifts(), gone.id)
    };

    let ledger = ShiftLedger::open(config(), &db_path).expect("reopen ledger");
    assert_eq!(ledger.shifts(), before);

    let completed = &before[0];
    let restored = ledger.get(completed.id).expect("restored shift");
    assert_eq!(restored.gallons_filled, Some(dec("9.412")));
    assert_eq!(restored.end_tank_level, TankLevel::new(2).ok());
    assert_eq!(restored.notes.as_deref(), Some("airport runs"));

    let labels: Vec<_> = restored
        .photos
        .iter()
        .map(|p| p.photo_type.as_str().to_string())
        .collect();
    assert_eq!(labels, vec!["Odometer", "Dashboard", "Receipt"]);
    assert_eq!(restored.photos.get_at(0).expect("first photo").description, "start reading");
    assert_eq!(restored.photos.get_at(1).expect("second photo").image_data, vec![1; 64]);

    // Deleted shifts stay hidden but are still stored
    assert!(ledger.get(deleted_id).is_none());
    assert!(ledger.get_including_deleted(deleted_id).expect("stored").is_deleted);

    // The active slot and the id sequence carry over
    assert_eq!(ledger.active_shift().expect("active").id, before[1].id);
    ledger
        .complete(before[1].id, end(date(2024, 4, 3), "41290"))
        .expect("complete restored active shift");
    let next = ledger
        .create(start(date(2024, 4, 4), "41290"))
        .expect("create after reopen");
    assert!(next.id > before[1].id);
    assert!(next.id > deleted_id);
}

#[test]
fn test_storage_reads_back_written_shift() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("shifts.redb");

    let id = {
        let ledger = ShiftLedger::open(config(), &db_path).expect("open ledger");
        let shift = ledger.create(start(date(2024, 9, 9), "100")).expect("create");
        ledger
            .complete(shift.id, end(date(2024, 9, 9), "180"))
            .expect("complete");
        shift.id
    };

    let storage = ShiftStorage::open(&db_path).expect("open storage");
    let stats = storage.get_stats().expect("stats");
    assert_eq!(stats.shift_count, 1);

    let shift = storage.get_shift(id).expect("read").expect("present");
    assert!(shift.is_completed());
    assert_eq!(shift.taxable_income(), dec("253.45"));
    assert!(storage.get_shift(ShiftId(id.0 + 1)).expect("read").is_none());
}
