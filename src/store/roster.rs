//! The roster store owns the ordered student list and keeps a persisted
//! mirror consistent with it.
//!
//! All mutation goes through `add`, which prepends in memory and fires one
//! background write of the entire roster. Write outcomes are reported over
//! an mpsc channel so the UI can surface failures without blocking.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::models::StudentRecord;
use crate::storage::KeyValueStore;

/// Fixed storage key for the serialized roster blob.
pub const ROSTER_KEY: &str = "studentsList";

/// Outcome of a background roster write.
#[derive(Debug)]
pub enum PersistResult {
    /// The full roster was written; `count` entries at time `at`.
    Saved { count: usize, at: DateTime<Utc> },
    /// The write failed; the in-memory roster is ahead of storage until the
    /// next successful write.
    Failed(String),
}

pub struct RosterStore {
    storage: Arc<dyn KeyValueStore>,
    roster: Vec<StudentRecord>,
    persist_tx: mpsc::Sender<PersistResult>,
}

impl RosterStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, persist_tx: mpsc::Sender<PersistResult>) -> Self {
        Self {
            storage,
            roster: Vec::new(),
            persist_tx,
        }
    }

    /// Load the previously persisted roster, replacing the in-memory one.
    ///
    /// Missing data yields an empty roster. Unreadable or malformed data is
    /// logged and also yields an empty roster; the bad blob stays on disk
    /// until the next successful write overwrites it.
    pub fn restore(&mut self) {
        self.roster = match self.storage.get(ROSTER_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<StudentRecord>>(&blob) {
                Ok(records) => {
                    debug!(count = records.len(), "Roster restored");
                    records
                }
                Err(e) => {
                    warn!(error = %e, "Stored roster is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored roster found");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored roster, starting empty");
                Vec::new()
            }
        };
    }

    /// Prepend a new student and write the updated roster in the background.
    ///
    /// The in-memory update is synchronous and is what the caller renders.
    /// A failed write does not roll the entry back; it is reported on the
    /// persist channel.
    pub fn add(&mut self, first_name: &str, last_name: &str) -> &[StudentRecord] {
        self.roster
            .insert(0, StudentRecord::new(first_name, last_name));
        self.persist_in_background();
        &self.roster
    }

    /// Read-only rendering snapshot, most recently added first.
    pub fn students(&self) -> &[StudentRecord] {
        &self.roster
    }

    // Each write carries the entire roster, not a delta, so the last
    // completed write always leaves a self-contained blob in storage.
    fn persist_in_background(&self) {
        let records = self.roster.clone();
        let storage = Arc::clone(&self.storage);
        let tx = self.persist_tx.clone();

        tokio::spawn(async move {
            let result = match Self::write_roster(storage.as_ref(), &records) {
                Ok(()) => {
                    debug!(count = records.len(), "Roster persisted");
                    PersistResult::Saved {
                        count: records.len(),
                        at: Utc::now(),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Roster write failed");
                    PersistResult::Failed(e.to_string())
                }
            };

            if let Err(e) = tx.send(result).await {
                error!(error = %e, "Failed to send persist result - channel closed");
            }
        });
    }

    fn write_roster(storage: &dyn KeyValueStore, records: &[StudentRecord]) -> Result<()> {
        let blob = serde_json::to_string_pretty(records)?;
        storage.set(ROSTER_KEY, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn store_with(
        storage: Arc<dyn KeyValueStore>,
    ) -> (RosterStore, mpsc::Receiver<PersistResult>) {
        let (tx, rx) = mpsc::channel(8);
        (RosterStore::new(storage, tx), rx)
    }

    #[test]
    fn test_restore_from_empty_storage_is_empty() {
        let (mut store, _rx) = store_with(Arc::new(MemoryStore::new()));
        store.restore();
        assert!(store.students().is_empty());
    }

    #[test]
    fn test_restore_parses_stored_blob() {
        let storage = MemoryStore::with_entry(
            ROSTER_KEY,
            r#"[{"firstName":"Grace","lastName":"Hopper"}]"#,
        );
        let (mut store, _rx) = store_with(Arc::new(storage));
        store.restore();

        assert_eq!(store.students().len(), 1);
        assert_eq!(store.students()[0].full_name(), "Grace Hopper");
    }

    #[test]
    fn test_restore_malformed_blob_falls_back_to_empty() {
        let storage = MemoryStore::with_entry(ROSTER_KEY, "not-json");
        let (mut store, _rx) = store_with(Arc::new(storage));
        store.restore();
        assert!(store.students().is_empty());
    }

    #[test]
    fn test_restore_replaces_in_memory_roster() {
        let storage = MemoryStore::with_entry(ROSTER_KEY, "[]");
        let (mut store, _rx) = store_with(Arc::new(storage));
        store.roster.push(StudentRecord::new("Stray", "Entry"));
        store.restore();
        assert!(store.students().is_empty());
    }

    #[tokio::test]
    async fn test_add_prepends_and_persists() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, mut rx) = store_with(storage.clone());

        let roster = store.add("Ada", "Lovelace");
        assert_eq!(roster.len(), 1);

        match rx.recv().await.unwrap() {
            PersistResult::Saved { count, .. } => assert_eq!(count, 1),
            other => panic!("expected Saved, got {:?}", other),
        }

        let blob = storage.get(ROSTER_KEY).unwrap().unwrap();
        let stored: Vec<StudentRecord> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored, vec![StudentRecord::new("Ada", "Lovelace")]);
    }

    #[tokio::test]
    async fn test_most_recent_entry_is_first() {
        let (mut store, mut rx) = store_with(Arc::new(MemoryStore::new()));

        store.add("Ada", "Lovelace");
        rx.recv().await.unwrap();
        store.add("Alan", "Turing");
        rx.recv().await.unwrap();

        let names: Vec<String> = store.students().iter().map(|s| s.full_name()).collect();
        assert_eq!(names, vec!["Alan Turing", "Ada Lovelace"]);
    }

    #[tokio::test]
    async fn test_persisted_roster_round_trips() {
        let storage = Arc::new(MemoryStore::new());
        let (mut store, mut rx) = store_with(storage.clone());

        store.add("Ada", "Lovelace");
        rx.recv().await.unwrap();
        store.add("Alan", "Turing");
        rx.recv().await.unwrap();

        let (mut reloaded, _rx2) = store_with(storage);
        reloaded.restore();

        assert_eq!(reloaded.students(), store.students());
    }

    #[tokio::test]
    async fn test_write_failure_does_not_roll_back() {
        let (mut store, mut rx) = store_with(Arc::new(MemoryStore::failing()));

        store.add("Ada", "Lovelace");

        match rx.recv().await.unwrap() {
            PersistResult::Failed(msg) => assert!(msg.contains("studentsList")),
            other => panic!("expected Failed, got {:?}", other),
        }
        // The entry stays visible to the user even though the write failed
        assert_eq!(store.students().len(), 1);
    }
}
