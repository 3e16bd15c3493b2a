//! In-memory roster and its CRUD operations.
//!
//! [`RosterStore`] owns the records behind an `RwLock`; callers only ever get
//! copies back (see [`RosterStore::snapshot`]). All writes to the backing
//! storage go through [`RosterStore::try_save`], which holds a dedicated save
//! lock and takes its snapshot while holding it, so concurrent saves from the
//! foreground and the autosave pump are serialized and the last one to finish
//! always carries the newest state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::model::{RecordId, ScoreRecord};
use crate::storage::{RosterStorage, StorageError};

pub mod seed;

pub use seed::SeedPolicy;

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("record name is blank")]
    BlankName,
    #[error("record name {0:?} contains a comma or line break")]
    InvalidName(String),
    #[error("a record named {0:?} already exists")]
    Duplicate(String),
    #[error("roster is full ({0} records)")]
    CapacityReached(usize),
    #[error("record {0:?} is not in the roster")]
    UnknownRecord(RecordId),
    #[error("new name is the same as the current name {0:?}")]
    SameName(String),
}

struct RosterInner {
    records: Vec<ScoreRecord>,
    next_id: u64,
}

impl RosterInner {
    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn find_name(&self, name: &str) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.matches_name(name))
    }

    fn push(&mut self, name: &str) -> &mut ScoreRecord {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(ScoreRecord::new(id, name));
        let last = self.records.len() - 1;
        &mut self.records[last]
    }
}

pub struct RosterStore {
    inner: RwLock<RosterInner>,
    storage: Box<dyn RosterStorage>,
    save_lock: Mutex<()>,
    capacity: usize,
    saves: AtomicU64,
}

impl RosterStore {
    /// Empty store backed by `storage`. Nothing is read from it yet.
    pub fn new(storage: Box<dyn RosterStorage>, capacity: usize) -> Self {
        Self {
            inner: RwLock::new(RosterInner {
                records: Vec::new(),
                next_id: 1,
            }),
            storage,
            save_lock: Mutex::new(()),
            capacity,
            saves: AtomicU64::new(0),
        }
    }

    /// Loads the stored roster and applies `seed` when it comes back empty.
    pub fn open(storage: Box<dyn RosterStorage>, capacity: usize, seed: SeedPolicy) -> Self {
        let store = Self::new(storage, capacity);
        let stored = store.storage.load();

        for record in stored {
            match store.add_record(&record.name) {
                Ok(id) => {
                    if let Err(err) = store.update_scores(id, record.scores) {
                        warn!(name = %record.name, error = %err, "failed to restore stored scores");
                    }
                }
                Err(err) => {
                    warn!(name = %record.name, error = %err, "skipping stored record");
                }
            }
        }

        if store.is_empty() {
            let seeded = seed.apply(&store);
            if seeded > 0 {
                info!(records = seeded, "loaded fresh demo data");
            } else {
                info!("starting with an empty roster");
            }
        } else {
            info!(
                records = store.len(),
                location = %store.storage.location(),
                "loaded roster from storage"
            );
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, RosterInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RosterInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a new record with no scores.
    pub fn add_record(&self, name: &str) -> Result<RecordId, RosterError> {
        let name = validate_name(name)?;
        let mut inner = self.write();
        if inner.records.len() >= self.capacity {
            return Err(RosterError::CapacityReached(self.capacity));
        }
        if let Some(existing) = inner.find_name(name) {
            return Err(RosterError::Duplicate(existing.name().to_string()));
        }
        Ok(inner.push(name).id())
    }

    /// Removes the record with identity `id` and hands it back.
    pub fn remove_record(&self, id: RecordId) -> Result<ScoreRecord, RosterError> {
        let mut inner = self.write();
        let idx = inner.position(id).ok_or(RosterError::UnknownRecord(id))?;
        Ok(inner.records.remove(idx))
    }

    /// Replaces the name of a record. The renamed record keeps its scores but
    /// gets a fresh identity and moves to the end of the roster, exactly as a
    /// remove followed by an add would.
    pub fn rename_record(&self, id: RecordId, new_name: &str) -> Result<RecordId, RosterError> {
        let new_name = validate_name(new_name)?;
        let mut inner = self.write();
        let idx = inner.position(id).ok_or(RosterError::UnknownRecord(id))?;
        if inner.records[idx].matches_name(new_name) {
            return Err(RosterError::SameName(inner.records[idx].name().to_string()));
        }
        if let Some(existing) = inner.find_name(new_name) {
            return Err(RosterError::Duplicate(existing.name().to_string()));
        }

        let old = inner.records.remove(idx);
        let renamed = inner.push(new_name);
        renamed.set_scores(old.scores().iter().map(|&s| i64::from(s)));
        Ok(renamed.id())
    }

    /// Case-insensitive exact match on the trimmed name.
    pub fn find_by_name(&self, name: &str) -> Option<ScoreRecord> {
        self.read().find_name(name).cloned()
    }

    pub fn get(&self, id: RecordId) -> Option<ScoreRecord> {
        let inner = self.read();
        inner.position(id).map(|idx| inner.records[idx].clone())
    }

    pub fn update_scores<I>(&self, id: RecordId, scores: I) -> Result<(), RosterError>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut inner = self.write();
        let idx = inner.position(id).ok_or(RosterError::UnknownRecord(id))?;
        inner.records[idx].set_scores(scores);
        Ok(())
    }

    /// Returns whether the score was in range and stored.
    pub fn add_score(&self, id: RecordId, value: i64) -> Result<bool, RosterError> {
        let mut inner = self.write();
        let idx = inner.position(id).ok_or(RosterError::UnknownRecord(id))?;
        Ok(inner.records[idx].add_score(value))
    }

    /// Owned copy of the current records in display order.
    pub fn snapshot(&self) -> Vec<ScoreRecord> {
        self.read().records.clone()
    }

    /// Writes the current roster to storage.
    pub fn try_save(&self) -> Result<usize, StorageError> {
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let records = self.snapshot();
        self.storage.write(&records)?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        info!(
            records = records.len(),
            location = %self.storage.location(),
            "roster saved"
        );
        Ok(records.len())
    }

    /// Foreground save: failures are logged and reported as `false`.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(_) => true,
            Err(err) => {
                error!(error = %err, "failed to save roster");
                false
            }
        }
    }

    /// Number of saves that completed successfully.
    pub fn completed_saves(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

fn validate_name(name: &str) -> Result<&str, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::BlankName);
    }
    if name.contains([',', '\n', '\r']) {
        return Err(RosterError::InvalidName(name.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
#[path = "../../tests/src_inline/roster/tests.rs"]
mod tests;
