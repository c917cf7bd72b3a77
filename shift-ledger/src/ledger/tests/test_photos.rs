use super::*;
use shared::models::PhotoError;


fn active_with_photos(ledger: &ShiftLedger, count: u8) -> (ShiftId, Vec<PhotoId>) {
    let shift = ledger.create(start_form(date(2024, 5, 2), "5000")).unwrap();
    let ids = (0..count)
        .map(|i| ledger.add_photo(shift.id, vec![0xFF, 0xD8, i]).unwrap())
        .collect();
    (shift.id, ids)
}


#[test]
fn test_start_form_photos_move_into_shift() {
    let ledger = create_test_ledger();
    let mut form = start_form(date(2024, 5, 2), "5000");
    let odometer = form.photos.add(vec![1, 2, 3]);
    form.photos.set_description(odometer, "odometer at start").unwrap();

    let shift = ledger.create(form).unwrap();
    assert_eq!(shift.photos.len(), 1);
    assert_eq!(shift.photos.get(odometer).unwrap().description, "odometer at start");
}


#[test]
fn test_remove_first_then_second() {
    let ledger = create_test_ledger();
    let (shift_id, ids) = active_with_photos(&ledger, 2);

    ledger.remove_photo(shift_id, ids[0]).unwrap();
    ledger.remove_photo(shift_id, ids[1]).unwrap();
    assert!(ledger.get(shift_id).unwrap().photos.is_empty());
}


#[test]
fn test_remove_second_then_first() {
    let ledger = create_test_ledger();
    let (shift_id, ids) = active_with_photos(&ledger, 2);

    ledger.remove_photo(shift_id, ids[1]).unwrap();
    ledger.remove_photo(shift_id, ids[0]).unwrap();
    assert!(ledger.get(shift_id).unwrap().photos.is_empty());
}


#[test]
fn test_remove_missing_photo_is_not_found() {
    let ledger = create_test_ledger();
    let (shift_id, ids) = active_with_photos(&ledger, 1);
    ledger.remove_photo(shift_id, ids[0]).unwrap();

    let err = ledger.remove_photo(shift_id, ids[0]).unwrap_err();
    assert!(matches!(err, LedgerError::Photo(PhotoError::NotFound(_))));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}


#[test]
fn test_duplicate_bytes_stay_independent() {
    let ledger = create_test_ledger();
    let shift = ledger.create(start_form(date(2024, 5, 2), "5000")).unwrap();
    let bytes = vec![0x89, 0x50, 0x4E, 0x47];
    let a = ledger.add_photo(shift.id, bytes.clone()).unwrap();
    let b = ledger.add_photo(shift.id, bytes.clone()).unwrap();

    ledger.set_photo_type(shift.id, a, "Gas Pump").unwrap();
    ledger.set_photo_description(shift.id, a, "pump 4").unwrap();
    ledger.remove_photo(shift.id, a).unwrap();

    let photos = ledger.get(shift.id).unwrap().photos;
    let remaining = photos.get(b).unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(remaining.image_data, bytes);
    assert!(remaining.photo_type.is_other());
    assert!(remaining.description.is_empty());
}


#[test]
fn test_metadata_edit_after_removal_targets_right_photo() {
    let ledger = create_test_ledger();
    let (shift_id, ids) = active_with_photos(&ledger, 3);

    ledger.remove_photo(shift_id, ids[0]).unwrap();
    ledger.set_photo_type(shift_id, ids[2], "dashboard").unwrap();

    let photos = ledger.get(shift_id).unwrap().photos;
    assert_eq!(photos.get_at(1).unwrap().id, ids[2]);
    assert_eq!(photos.get(ids[2]).unwrap().photo_type.as_str(), "Dashboard");
    assert!(photos.get(ids[1]).unwrap().photo_type.is_other());
}


#[test]
fn test_unknown_photo_type_rejected() {
    let ledger = create_test_ledger();
    let (shift_id, ids) = active_with_photos(&ledger, 1);

    let err = ledger.set_photo_type(shift_id, ids[0], "Selfie").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(ledger.get(shift_id).unwrap().photos.get(ids[0]).unwrap().photo_type.is_other());
}


#[test]
fn test_photo_ops_on_completed_shift_need_session() {
    let ledger = create_test_ledger();
    let shift = completed_shift(&ledger, date(2024, 5, 2), "5000", "5080");

    let err = ledger.add_photo(shift.id, vec![1]).unwrap_err();
    assert!(matches!(err, LedgerError::ShiftCompleted(_)));

    let mut session = ledger.edit(shift.id).unwrap();
    let receipt = session.photos_mut().add(vec![1]);
    session.set_photo_type(receipt, "Receipt").unwrap();
    let saved = session.commit().unwrap();
    assert_eq!(saved.photos.get(receipt).unwrap().photo_type.as_str(), "Receipt");
}


#[test]
fn test_description_limit() {
    let ledger = create_test_ledger();
    let (shift_id, ids) = active_with_photos(&ledger, 1);

    let err = ledger
        .set_photo_description(shift_id, ids[0], "d".repeat(501))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
