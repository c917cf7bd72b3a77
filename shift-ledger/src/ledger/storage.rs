//! redb-based storage for the shift ledger
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `shifts` | `shift_id` | JSON `Shift` | Every shift, deleted ones included |
//! | `sequence_counter` | `"shift_id"` | `u64` | Last assigned shift id |
//!
//! Photo bytes travel inside the shift document (base64), so a shift and
//! its attachments are always written in the same transaction.
//!
//! # Durability
//!
//! redb commits are durable once `commit()` returns (copy-on-write with an
//! atomic root swap), so a crash never leaves a half-written shift.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::models::{Shift, ShiftId};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for shift documents: key = shift id, value = JSON-serialized Shift
const SHIFTS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("shifts");

/// Table for the id counter: key = "shift_id", value = u64
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const SHIFT_ID_KEY: &str = "shift_id";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Shift storage backed by redb
#[derive(Clone)]
pub struct ShiftStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for ShiftStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftStorage").finish_non_exhaustive()
    }
}

impl ShiftStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SHIFTS_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SHIFT_ID_KEY)?.is_none() {
                seq_table.insert(SHIFT_ID_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence Operations ==========

    /// Last assigned shift id (read-only)
    pub fn current_sequence(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SHIFT_ID_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    /// Raise the counter to `id` if it is behind (within transaction)
    fn bump_sequence(&self, txn: &WriteTransaction, id: ShiftId) -> StorageResult<()> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(SHIFT_ID_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let id = u64::try_from(id.0).unwrap_or(0);
        if id > current {
            table.insert(SHIFT_ID_KEY, id)?;
        }
        Ok(())
    }

    // ========== Shift Operations ==========

    /// Store a shift document (within transaction)
    pub fn store_shift(&self, txn: &WriteTransaction, shift: &Shift) -> StorageResult<()> {
        let value = serde_json::to_vec(shift)?;
        {
            let mut table = txn.open_table(SHIFTS_TABLE)?;
            table.insert(shift.id.0, value.as_slice())?;
        }
        self.bump_sequence(txn, shift.id)
    }

    /// Store a shift in its own transaction
    pub fn save_shift(&self, shift: &Shift) -> StorageResult<()> {
        let txn = self.begin_write()?;
        self.store_shift(&txn, shift)?;
        txn.commit()?;
        tracing::debug!(shift_id = %shift.id, "Shift persisted");
        Ok(())
    }

    /// Get a shift by id, deleted or not
    pub fn get_shift(&self, id: ShiftId) -> StorageResult<Option<Shift>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SHIFTS_TABLE)?;
        match table.get(id.0)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Load every stored shift in id order
    pub fn load_all(&self) -> StorageResult<Vec<Shift>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SHIFTS_TABLE)?;

        let mut shifts = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let shift: Shift = serde_json::from_slice(value.value())?;
            shifts.push(shift);
        }
        Ok(shifts)
    }

    // ========== Statistics ==========

    /// Get storage statistics
    pub fn get_stats(&self) -> StorageResult<StorageStats> {
        let read_txn = self.db.begin_read()?;
        let shifts_table = read_txn.open_table(SHIFTS_TABLE)?;
        let seq_table = read_txn.open_table(SEQUENCE_TABLE)?;

        Ok(StorageStats {
            shift_count: shifts_table.len()?,
            current_sequence: seq_table
                .get(SHIFT_ID_KEY)?
                .map(|guard| guard.value())
                .unwrap_or(0),
        })
    }
}

/// Storage statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    pub shift_count: u64,
    pub current_sequence: u64,
}
