//! Copy-on-edit sessions
//!
//! An [`EditSession`] owns a private copy of one shift. Nothing the caller
//! does to the copy is visible in the ledger until [`EditSession::commit`];
//! [`EditSession::discard`] (or dropping the session) throws the copy away,
//! leaving the stored shift and its photo list exactly as they were.

use super::{LedgerResult, ShiftLedger};
use crate::validation::{ValidationReport, validate_shift};
use shared::models::{PhotoId, PhotoStore, Shift, ShiftId};

/// Open edit of a single shift
#[derive(Debug)]
pub struct EditSession {
    ledger: ShiftLedger,
    shift_id: ShiftId,
    working: Shift,
    resolved: bool,
}

impl EditSession {
    pub(super) fn new(ledger: ShiftLedger, working: Shift) -> Self {
        Self {
            ledger,
            shift_id: working.id,
            working,
            resolved: false,
        }
    }

    pub fn shift_id(&self) -> ShiftId {
        self.shift_id
    }

    pub fn working(&self) -> &Shift {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut Shift {
        &mut self.working
    }

    pub fn photos_mut(&mut self) -> &mut PhotoStore {
        &mut self.working.photos
    }

    /// Set a working-copy photo's type from one of the configured labels
    pub fn set_photo_type(&mut self, photo_id: PhotoId, label: &str) -> LedgerResult<()> {
        let photo_type = self.ledger.config().photo_types.resolve(label)?;
        self.working.photos.set_type(photo_id, photo_type)?;
        Ok(())
    }

    /// Gate state for the save action
    pub fn validate(&self) -> ValidationReport {
        validate_shift(&self.working)
    }

    /// Whether the working copy differs from the stored shift
    pub fn is_dirty(&self) -> bool {
        self.ledger
            .get_including_deleted(self.shift_id)
            .is_none_or(|stored| stored != self.working)
    }

    /// Save the working copy, replacing the stored shift atomically
    ///
    /// Immutable fields (`created_date`, deletion flag) are taken from the
    /// stored shift and `modified_date` advances. On failure the session is
    /// closed and the stored shift is unchanged.
    pub fn commit(mut self) -> LedgerResult<Shift> {
        self.resolved = true;
        let working = self.working.clone();
        self.ledger.commit_session(self.shift_id, working)
    }

    /// Drop the working copy
    pub fn discard(mut self) {
        self.resolved = true;
        self.ledger.release_session(self.shift_id);
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        if !self.resolved {
            self.ledger.release_session(self.shift_id);
        }
    }
}
