//! ShiftLedger - the authoritative collection of shifts
//!
//! This module handles:
//! - Shift creation and completion (start/end gates)
//! - Photo attachment on active shifts
//! - Copy-on-edit sessions for any shift
//! - Soft deletion
//! - Day, week and year partitioning in the ledger time zone
//! - Write-through persistence to redb (optional)
//!
//! # Mutation Flow
//!
//! ```text
//! mutate(shift_id)
//!     ├─ 1. Take the state write lock
//!     ├─ 2. Check existence, deletion and open sessions
//!     ├─ 3. Apply the change to a copy of the stored shift
//!     ├─ 4. Advance modified_date
//!     ├─ 5. Persist the copy (when storage is attached)
//!     └─ 6. Swap the copy into memory
//! ```
//!
//! A failed persist leaves the in-memory ledger untouched.

mod error;
mod session;
pub mod storage;

pub use error::*;
pub use session::EditSession;
pub use storage::{ShiftStorage, StorageError, StorageResult, StorageStats};

use crate::core::LedgerConfig;
use crate::utils::time::{date_time_to_millis, local_date, local_year, week_start_for};
use crate::validation::{validate_end, validate_shift, validate_start};
use chrono::{Days, NaiveDate, NaiveTime};
use parking_lot::RwLock;
use shared::models::{
    PhotoAttachment, PhotoId, Shift, ShiftEndInput, ShiftId, ShiftStartInput, ShiftStatus,
    TankLevel,
};
use shared::util::now_millis;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Default)]
struct LedgerState {
    /// Every shift, deleted ones included
    shifts: BTreeMap<ShiftId, Shift>,
    /// Highest id ever assigned
    last_id: i64,
    /// Shifts with an open edit session
    sessions: HashSet<ShiftId>,
}

impl LedgerState {
    /// Stored, non-deleted shift
    fn live(&self, id: ShiftId) -> LedgerResult<&Shift> {
        match self.shifts.get(&id) {
            None => Err(LedgerError::NotFound(id)),
            Some(shift) if shift.is_deleted => Err(LedgerError::Deleted(id)),
            Some(shift) => Ok(shift),
        }
    }

    fn ensure_no_session(&self, id: ShiftId) -> LedgerResult<()> {
        if self.sessions.contains(&id) {
            tracing::warn!(shift_id = %id, "Rejected change: edit session open");
            return Err(LedgerError::SessionConflict(id));
        }
        Ok(())
    }
}

/// Shift ledger handle
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ShiftLedger {
    state: Arc<RwLock<LedgerState>>,
    storage: Option<ShiftStorage>,
    config: Arc<LedgerConfig>,
}

impl std::fmt::Debug for ShiftLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftLedger")
            .field("storage", &self.storage.as_ref().map(|_| "<ShiftStorage>"))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ShiftLedger {
    /// In-memory ledger (nothing is persisted)
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(LedgerState::default())),
            storage: None,
            config: Arc::new(config),
        }
    }

    /// Ledger restored from and writing through to `storage`
    pub fn with_storage(config: LedgerConfig, storage: ShiftStorage) -> LedgerResult<Self> {
        let mut state = LedgerState {
            last_id: i64::try_from(storage.current_sequence()?).unwrap_or(i64::MAX),
            ..LedgerState::default()
        };
        for shift in storage.load_all()? {
            state.last_id = state.last_id.max(shift.id.0);
            state.shifts.insert(shift.id, shift);
        }
        tracing::info!(
            shifts = state.shifts.len(),
            last_id = state.last_id,
            "Shift ledger restored"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            storage: Some(storage),
            config: Arc::new(config),
        })
    }

    /// Open (or create) the database at `path`
    pub fn open(config: LedgerConfig, path: impl AsRef<Path>) -> LedgerResult<Self> {
        let storage = ShiftStorage::open(path)?;
        Self::with_storage(config, storage)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn storage(&self) -> Option<&ShiftStorage> {
        self.storage.as_ref()
    }

    fn persist(&self, shift: &Shift) -> LedgerResult<()> {
        if let Some(storage) = &self.storage {
            storage.save_shift(shift).map_err(|e| {
                tracing::error!(shift_id = %shift.id, error = %e, "Failed to persist shift");
                LedgerError::from(e)
            })?;
        }
        Ok(())
    }

    // ========== Lifecycle ==========

    /// Create an active shift from the start form
    ///
    /// Photos attached to the form move into the new shift.
    pub fn create(&self, input: ShiftStartInput) -> LedgerResult<Shift> {
        let report = validate_start(&input);
        if !report.is_valid() {
            tracing::warn!(messages = report.len(), "Start gate rejected shift creation");
            return Err(LedgerError::rejected(report));
        }

        let (Some(date), Some(time), Some(mileage)) =
            (input.start_date, input.start_time, input.start_mileage)
        else {
            return Err(LedgerError::InvalidInput("incomplete start form".into()));
        };
        let tank = if input.has_full_tank_at_start {
            TankLevel::FULL
        } else {
            let level = input
                .start_tank_level
                .ok_or_else(|| LedgerError::InvalidInput("start tank level missing".into()))?;
            TankLevel::new(level)?
        };

        let mut state = self.state.write();
        if let Some(active) = state
            .shifts
            .values()
            .find(|s| !s.is_deleted && s.is_active())
        {
            tracing::warn!(active_id = %active.id, "Rejected creation: another shift is active");
            return Err(LedgerError::ActiveShiftExists(active.id));
        }

        let id = state
            .last_id
            .checked_add(1)
            .map(ShiftId)
            .ok_or(LedgerError::SequenceExhausted(state.last_id))?;
        let start_date = date_time_to_millis(date, time, self.config.timezone);
        let mut shift = Shift::new_active(id, start_date, mileage, tank, now_millis());
        shift.notes = input.notes;
        shift.photos = input.photos;

        self.persist(&shift)?;
        state.last_id = id.0;
        state.shifts.insert(id, shift.clone());

        tracing::info!(
            shift_id = %id,
            start_mileage = %shift.start_mileage,
            tank = %shift.start_tank_level,
            photos = shift.photos.len(),
            "Shift started"
        );
        Ok(shift)
    }

    /// Complete an active shift in one step
    ///
    /// Nothing changes unless every end-gate rule holds.
    pub fn complete(&self, id: ShiftId, input: ShiftEndInput) -> LedgerResult<Shift> {
        let mut state = self.state.write();
        let stored = state.live(id)?;
        state.ensure_no_session(id)?;
        if stored.is_completed() {
            tracing::warn!(shift_id = %id, "Rejected completion: already completed");
            return Err(LedgerError::AlreadyCompleted(id));
        }

        let report = validate_end(stored, &input, self.config.timezone);
        if !report.is_valid() {
            tracing::warn!(
                shift_id = %id,
                messages = report.len(),
                "End gate rejected completion"
            );
            return Err(LedgerError::rejected(report));
        }

        let (Some(date), Some(time), Some(end_mileage), Some(trip_count)) = (
            input.end_date,
            input.end_time,
            input.end_mileage,
            input.trip_count,
        ) else {
            return Err(LedgerError::InvalidInput("incomplete end form".into()));
        };

        let mut shift = stored.clone();
        shift.end_date = Some(date_time_to_millis(date, time, self.config.timezone));
        shift.end_mileage = Some(end_mileage);
        shift.end_tank_level = input.end_tank_level.map(TankLevel::new).transpose()?;
        shift.trip_count = Some(
            u32::try_from(trip_count).map_err(|e| LedgerError::InvalidInput(e.to_string()))?,
        );
        shift.net_fare = input.net_fare.unwrap_or_default();
        shift.tips = input.tips.unwrap_or_default();
        shift.promotions = input.promotions.unwrap_or_default();
        shift.tolls = input.tolls.unwrap_or_default();
        shift.tolls_reimbursed = input.tolls_reimbursed.unwrap_or_default();
        shift.parking_fees = input.parking_fees.unwrap_or_default();
        shift.misc_fees = input.misc_fees.unwrap_or_default();
        shift.did_refuel_at_end = input.did_refuel_at_end;
        if input.did_refuel_at_end {
            shift.gallons_filled = input.gallons_filled;
            shift.fuel_cost = input.fuel_cost;
        } else {
            shift.gallons_filled = None;
            shift.fuel_cost = None;
        }
        if input.notes.is_some() {
            shift.notes = input.notes;
        }
        shift.modified_date = now_millis();

        self.persist(&shift)?;
        state.shifts.insert(id, shift.clone());

        tracing::info!(
            shift_id = %id,
            miles = ?shift.miles_driven(),
            income = %shift.taxable_income(),
            "Shift completed"
        );
        Ok(shift)
    }

    /// Soft-delete a shift (idempotent)
    pub fn delete(&self, id: ShiftId) -> LedgerResult<()> {
        let mut state = self.state.write();
        let stored = state.shifts.get(&id).ok_or(LedgerError::NotFound(id))?;
        state.ensure_no_session(id)?;
        if stored.is_deleted {
            tracing::debug!(shift_id = %id, "Shift already deleted");
            return Ok(());
        }

        let mut shift = stored.clone();
        shift.is_deleted = true;
        shift.modified_date = now_millis();

        self.persist(&shift)?;
        state.shifts.insert(id, shift);

        tracing::info!(shift_id = %id, "Shift deleted");
        Ok(())
    }

    // ========== Photos (active shifts) ==========

    /// Apply `change` to a copy of an active shift, then persist and swap
    fn mutate_active<T>(
        &self,
        id: ShiftId,
        change: impl FnOnce(&mut Shift) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut state = self.state.write();
        let stored = state.live(id)?;
        state.ensure_no_session(id)?;
        if stored.is_completed() {
            return Err(LedgerError::ShiftCompleted(id));
        }

        let mut shift = stored.clone();
        let result = change(&mut shift)?;
        shift.modified_date = now_millis();

        self.persist(&shift)?;
        state.shifts.insert(id, shift);
        Ok(result)
    }

    pub fn add_photo(&self, id: ShiftId, image_data: Vec<u8>) -> LedgerResult<PhotoId> {
        let photo_id = self.mutate_active(id, |shift| Ok(shift.photos.add(image_data)))?;
        tracing::info!(shift_id = %id, photo_id = %photo_id, "Photo added");
        Ok(photo_id)
    }

    /// Set a photo's type from one of the configured labels
    pub fn set_photo_type(&self, id: ShiftId, photo_id: PhotoId, label: &str) -> LedgerResult<()> {
        let photo_type = self.config.photo_types.resolve(label)?;
        self.mutate_active(id, |shift| Ok(shift.photos.set_type(photo_id, photo_type)?))
    }

    pub fn set_photo_description(
        &self,
        id: ShiftId,
        photo_id: PhotoId,
        description: impl Into<String>,
    ) -> LedgerResult<()> {
        let description = description.into();
        self.mutate_active(id, |shift| {
            Ok(shift.photos.set_description(photo_id, description)?)
        })
    }

    pub fn remove_photo(&self, id: ShiftId, photo_id: PhotoId) -> LedgerResult<PhotoAttachment> {
        let removed = self.mutate_active(id, |shift| Ok(shift.photos.remove(photo_id)?))?;
        tracing::info!(shift_id = %id, photo_id = %photo_id, "Photo removed");
        Ok(removed)
    }

    // ========== Edit sessions ==========

    /// Open a copy-on-edit session; one per shift at a time
    pub fn edit(&self, id: ShiftId) -> LedgerResult<EditSession> {
        let mut state = self.state.write();
        let working = state.live(id)?.clone();
        state.ensure_no_session(id)?;
        state.sessions.insert(id);
        tracing::debug!(shift_id = %id, "Edit session opened");
        Ok(EditSession::new(self.clone(), working))
    }

    pub fn has_open_session(&self, id: ShiftId) -> bool {
        self.state.read().sessions.contains(&id)
    }

    /// Validate and swap in an edit session's working copy
    ///
    /// The session is released whether or not the save succeeds.
    fn commit_session(&self, id: ShiftId, mut working: Shift) -> LedgerResult<Shift> {
        let mut state = self.state.write();
        state.sessions.remove(&id);

        if working.id != id {
            tracing::warn!(shift_id = %id, found = %working.id, "Rejected save: identity changed");
            return Err(LedgerError::IdentityChanged {
                expected: id,
                found: working.id,
            });
        }
        let stored = state.live(id)?;
        working.created_date = stored.created_date;
        working.is_deleted = stored.is_deleted;

        let report = validate_shift(&working);
        if !report.is_valid() {
            tracing::warn!(
                shift_id = %id,
                messages = report.len(),
                "Rejected save: validation failed"
            );
            return Err(LedgerError::rejected(report));
        }

        if working.is_active()
            && let Some(other) = state
                .shifts
                .values()
                .find(|s| s.id != id && !s.is_deleted && s.is_active())
        {
            return Err(LedgerError::ActiveShiftExists(other.id));
        }

        working.modified_date = now_millis().max(stored.modified_date + 1);

        self.persist(&working)?;
        state.shifts.insert(id, working.clone());

        tracing::info!(shift_id = %id, photos = working.photos.len(), "Edit session saved");
        Ok(working)
    }

    fn release_session(&self, id: ShiftId) {
        if self.state.write().sessions.remove(&id) {
            tracing::debug!(shift_id = %id, "Edit session discarded");
        }
    }

    // ========== Queries ==========

    /// Non-deleted shift by id
    pub fn get(&self, id: ShiftId) -> Option<Shift> {
        self.state
            .read()
            .shifts
            .get(&id)
            .filter(|s| !s.is_deleted)
            .cloned()
    }

    /// Shift by id, including deleted ones
    pub fn get_including_deleted(&self, id: ShiftId) -> Option<Shift> {
        self.state.read().shifts.get(&id).cloned()
    }

    /// All non-deleted shifts ordered by start date, then id
    pub fn shifts(&self) -> Vec<Shift> {
        self.select(|_| true)
    }

    /// The active shift, if any
    pub fn active_shift(&self) -> Option<Shift> {
        self.select(Shift::is_active).into_iter().next()
    }

    fn select(&self, predicate: impl Fn(&Shift) -> bool) -> Vec<Shift> {
        let state = self.state.read();
        let mut shifts: Vec<Shift> = state
            .shifts
            .values()
            .filter(|s| !s.is_deleted && predicate(s))
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.start_date, s.id));
        shifts
    }

    /// Shift whose start falls on `date`, optionally limited to one status
    ///
    /// Exact calendar-day match in the ledger time zone; time of day is
    /// ignored. With several matches the earliest start wins.
    pub fn find_by_date(&self, date: NaiveDate, status: Option<ShiftStatus>) -> Option<Shift> {
        let tz = self.config.timezone;
        let found = self
            .select(|s| {
                local_date(s.start_date, tz) == date && status.is_none_or(|st| s.status() == st)
            })
            .into_iter()
            .next();
        tracing::debug!(%date, ?status, found = ?found.as_ref().map(|s| s.id), "Lookup by date");
        found
    }

    /// First day of the ledger week containing `date`
    pub fn week_start_for(&self, date: NaiveDate) -> NaiveDate {
        week_start_for(date, self.config.week_start)
    }

    /// Shifts starting in the 7-day week containing `week_start`
    ///
    /// A date that is not on the configured week-start day is normalized to
    /// the start of its week.
    pub fn shifts_in_week(&self, week_start: NaiveDate) -> Vec<Shift> {
        let tz = self.config.timezone;
        let first = self.week_start_for(week_start);
        let end = first.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
        self.select(|s| {
            let day = local_date(s.start_date, tz);
            day >= first && day < end
        })
    }

    /// Shifts whose start falls in calendar `year`
    pub fn shifts_in_year(&self, year: i32) -> Vec<Shift> {
        let tz = self.config.timezone;
        self.select(|s| local_year(s.start_date, tz) == year)
    }

    /// Calendar years that have at least one shift, ascending
    pub fn years(&self) -> Vec<i32> {
        let tz = self.config.timezone;
        let state = self.state.read();
        state
            .shifts
            .values()
            .filter(|s| !s.is_deleted)
            .map(|s| local_year(s.start_date, tz))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Start timestamp for a start form's date and time in the ledger zone
    pub fn start_millis(&self, date: NaiveDate, time: NaiveTime) -> i64 {
        date_time_to_millis(date, time, self.config.timezone)
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .shifts
            .values()
            .filter(|s| !s.is_deleted)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
