// SPDX-License-Identifier: MPL-2.0
//! In-memory store implementing the [`MediaTransaction`] port trait.
//!
//! [`MemoryStore`] keeps media and EXIF records in maps behind a mutex.
//! [`MemoryStore::begin`] opens a [`MemoryTransaction`] that stages its writes
//! and publishes them on [`MemoryTransaction::commit`]. A transaction dropped
//! without committing leaves the store untouched.
//!
//! The store counts write calls and can be told to fail a given operation,
//! which makes it the default backend for tests and the demo binary.
//!
//! # Example
//!
//! ```
//! use media_exif::application::port::MediaTransaction;
//! use media_exif::domain::exif::ExifRecord;
//! use media_exif::domain::media::{MediaId, MediaRecord};
//! use media_exif::infrastructure::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let mut media = MediaRecord::new(MediaId(1), "/photos/a.jpg", chrono::NaiveDateTime::default());
//! store.insert_media(media.clone());
//!
//! let mut tx = store.begin();
//! let saved = tx.replace_exif(&mut media, ExifRecord { iso: Some(100), ..ExifRecord::default() }).unwrap();
//! tx.commit();
//!
//! assert_eq!(media.exif_id, saved.id);
//! assert_eq!(store.exif(saved.id.unwrap()).unwrap().iso, Some(100));
//! ```
//!
//! [`MediaTransaction`]: crate::application::port::MediaTransaction

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::port::{MediaTransaction, StoreError};
use crate::domain::exif::ExifRecord;
use crate::domain::media::{ExifId, MediaId, MediaRecord};

/// Operation a [`MemoryStore`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    FindExif,
    ReplaceExif,
    SaveMedia,
}

/// Thread-safe in-memory media store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    media: HashMap<MediaId, MediaRecord>,
    exif: HashMap<ExifId, ExifRecord>,
    last_exif_id: u64,
    fail_on: Option<StoreOperation>,
    /// `replace_exif` and `save_media` calls, successful or not.
    write_calls: usize,
    /// Writes published by committed transactions.
    committed_writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a media record directly, outside any transaction.
    pub fn insert_media(&self, media: MediaRecord) {
        self.state().media.insert(media.id, media);
    }

    /// Returns the committed version of a media record.
    #[must_use]
    pub fn media(&self, id: MediaId) -> Option<MediaRecord> {
        self.state().media.get(&id).cloned()
    }

    /// Returns a committed EXIF record.
    #[must_use]
    pub fn exif(&self, id: ExifId) -> Option<ExifRecord> {
        self.state().exif.get(&id).cloned()
    }

    /// Number of committed EXIF records.
    #[must_use]
    pub fn exif_count(&self) -> usize {
        self.state().exif.len()
    }

    /// Number of write calls made through any transaction, including failed
    /// and rolled back ones.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.state().write_calls
    }

    /// Number of writes published by committed transactions.
    #[must_use]
    pub fn committed_writes(&self) -> usize {
        self.state().committed_writes
    }

    /// Makes every subsequent call of `operation` fail, or clears the failure.
    pub fn fail_on(&self, operation: Option<StoreOperation>) {
        self.state().fail_on = operation;
    }

    /// Opens a transaction.
    #[must_use]
    pub fn begin(&self) -> MemoryTransaction {
        MemoryTransaction {
            store: self.clone(),
            media: HashMap::new(),
            exif: HashMap::new(),
            superseded: HashSet::new(),
            writes: 0,
        }
    }
}

/// A transaction on a [`MemoryStore`].
///
/// Reads see the transaction's own staged writes first.
#[derive(Debug)]
pub struct MemoryTransaction {
    store: MemoryStore,
    media: HashMap<MediaId, MediaRecord>,
    exif: HashMap<ExifId, ExifRecord>,
    superseded: HashSet<ExifId>,
    writes: usize,
}

impl MemoryTransaction {
    /// Publishes the staged writes.
    pub fn commit(self) {
        let mut state = self.store.state();
        for id in &self.superseded {
            state.exif.remove(id);
        }
        state.exif.extend(self.exif);
        state.media.extend(self.media);
        state.committed_writes += self.writes;
    }

    /// Discards the staged writes. Equivalent to dropping the transaction.
    pub fn rollback(self) {}

    /// Number of writes staged so far.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes
    }

    /// Counts a write call and checks the configured failure.
    fn start_write(&self, operation: StoreOperation) -> Result<(), StoreError> {
        let mut state = self.store.state();
        state.write_calls += 1;
        Self::check(&state, operation)
    }

    fn check(state: &StoreState, operation: StoreOperation) -> Result<(), StoreError> {
        if state.fail_on == Some(operation) {
            return Err(StoreError::Backend(format!("injected {operation:?} failure")));
        }
        Ok(())
    }

    fn media_exists(&self, id: MediaId) -> bool {
        self.media.contains_key(&id) || self.store.state().media.contains_key(&id)
    }
}

impl MediaTransaction for MemoryTransaction {
    fn find_exif(&mut self, id: ExifId) -> Result<ExifRecord, StoreError> {
        let state = self.store.state();
        Self::check(&state, StoreOperation::FindExif)?;

        if let Some(exif) = self.exif.get(&id) {
            return Ok(exif.clone());
        }
        if self.superseded.contains(&id) {
            return Err(StoreError::NotFound(id));
        }
        state.exif.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn replace_exif(
        &mut self,
        media: &mut MediaRecord,
        mut exif: ExifRecord,
    ) -> Result<ExifRecord, StoreError> {
        self.start_write(StoreOperation::ReplaceExif)?;
        if !self.media_exists(media.id) {
            return Err(StoreError::MediaNotFound(media.id));
        }

        let id = {
            let mut state = self.store.state();
            state.last_exif_id += 1;
            ExifId(state.last_exif_id)
        };
        exif.id = Some(id);

        if let Some(previous) = media.exif_id {
            self.exif.remove(&previous);
            self.superseded.insert(previous);
        }
        self.exif.insert(id, exif.clone());

        let mut linked = media.clone();
        linked.exif_id = Some(id);
        self.media.insert(linked.id, linked);
        media.exif_id = Some(id);

        self.writes += 1;
        Ok(exif)
    }

    fn save_media(&mut self, media: &MediaRecord) -> Result<(), StoreError> {
        self.start_write(StoreOperation::SaveMedia)?;
        if !self.media_exists(media.id) {
            return Err(StoreError::MediaNotFound(media.id));
        }

        self.media.insert(media.id, media.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn media(id: u64) -> MediaRecord {
        MediaRecord::new(MediaId(id), format!("/photos/{id}.jpg"), NaiveDateTime::default())
    }

    fn exif_with_iso(iso: i64) -> ExifRecord {
        ExifRecord {
            iso: Some(iso),
            ..ExifRecord::default()
        }
    }

    #[test]
    fn uncommitted_transaction_leaves_no_trace() {
        let store = MemoryStore::new();
        let mut m = media(1);
        store.insert_media(m.clone());

        {
            let mut tx = store.begin();
            tx.replace_exif(&mut m, exif_with_iso(100)).expect("replace");
            assert_eq!(tx.pending_writes(), 1);
        }

        assert_eq!(store.exif_count(), 0);
        assert_eq!(store.media(MediaId(1)).and_then(|m| m.exif_id), None);
        assert_eq!(store.committed_writes(), 0);
        assert_eq!(store.write_calls(), 1);
    }

    #[test]
    fn commit_publishes_record_and_link() {
        let store = MemoryStore::new();
        let mut m = media(1);
        store.insert_media(m.clone());

        let mut tx = store.begin();
        let saved = tx.replace_exif(&mut m, exif_with_iso(100)).expect("replace");
        tx.commit();

        let id = saved.id.expect("store assigns an id");
        assert_eq!(m.exif_id, Some(id));
        assert_eq!(store.media(MediaId(1)).and_then(|m| m.exif_id), Some(id));
        assert_eq!(store.exif(id), Some(saved));
        assert_eq!(store.committed_writes(), 1);
    }

    #[test]
    fn replace_supersedes_previous_record() {
        let store = MemoryStore::new();
        let mut m = media(1);
        store.insert_media(m.clone());

        let mut tx = store.begin();
        let first = tx.replace_exif(&mut m, exif_with_iso(100)).expect("first");
        tx.commit();

        let mut tx = store.begin();
        let second = tx.replace_exif(&mut m, exif_with_iso(200)).expect("second");
        let first_id = first.id.expect("id");
        assert_eq!(tx.find_exif(first_id), Err(StoreError::NotFound(first_id)));
        tx.commit();

        assert_eq!(store.exif_count(), 1);
        assert_ne!(first.id, second.id);
        assert_eq!(m.exif_id, second.id);
        assert!(store.exif(first_id).is_none());
    }

    #[test]
    fn find_sees_staged_and_committed_records() {
        let store = MemoryStore::new();
        let mut m = media(1);
        store.insert_media(m.clone());

        let mut tx = store.begin();
        let staged = tx.replace_exif(&mut m, exif_with_iso(50)).expect("replace");
        let id = staged.id.expect("id");
        assert_eq!(tx.find_exif(id), Ok(staged.clone()));
        tx.commit();

        let mut tx = store.begin();
        assert_eq!(tx.find_exif(id), Ok(staged));
        assert_eq!(
            tx.find_exif(ExifId(999)),
            Err(StoreError::NotFound(ExifId(999)))
        );
    }

    #[test]
    fn unknown_media_is_rejected() {
        let store = MemoryStore::new();
        let mut m = media(42);

        let mut tx = store.begin();
        assert_eq!(
            tx.replace_exif(&mut m, exif_with_iso(1)),
            Err(StoreError::MediaNotFound(MediaId(42)))
        );
        assert_eq!(
            tx.save_media(&m),
            Err(StoreError::MediaNotFound(MediaId(42)))
        );
        assert_eq!(m.exif_id, None);
    }

    #[test]
    fn injected_failure_leaves_media_unlinked() {
        let store = MemoryStore::new();
        let mut m = media(1);
        store.insert_media(m.clone());
        store.fail_on(Some(StoreOperation::ReplaceExif));

        let mut tx = store.begin();
        let result = tx.replace_exif(&mut m, exif_with_iso(1));
        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert_eq!(m.exif_id, None);
        assert_eq!(tx.pending_writes(), 0);

        store.fail_on(None);
        assert!(tx.replace_exif(&mut m, exif_with_iso(1)).is_ok());
    }
}
