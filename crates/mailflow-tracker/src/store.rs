//! In-memory operation record store.
//!
//! Holds the current set of in-flight and recently finished jobs, keyed by
//! subject id. The store is an explicit injectable object rather than a
//! module-level global so the poller can be exercised against a private
//! instance in tests. Records live only in memory for the session; failures
//! are reported by the poller, never by the store.

use crate::record::{OperationRecord, OperationStatus};
use mailflow_core::{SubjectId, Timestamp};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Shared, lock-protected map of tracked operations.
///
/// Cloning the store is cheap and yields a handle to the same records.
#[derive(Clone, Default)]
pub struct OperationStore {
    records: Arc<RwLock<HashMap<SubjectId, OperationRecord>>>,
}

impl OperationStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, keyed by its subject id.
    ///
    /// Tokens are server-generated, so key collisions are not expected
    /// under normal use; on a duplicate key the last write wins.
    pub fn add(&self, record: OperationRecord) {
        let mut records = self
            .records
            .write()
            .expect("acquire write lock on records");

        debug!(subject_id = %record.subject_id, token = %record.token, "tracking operation");
        records.insert(record.subject_id, record);
    }

    /// Move a record to a new status.
    ///
    /// Transitions are monotonic: once a record is terminal it is never
    /// mutated again. When the new status is terminal, the completion
    /// timestamp is recorded (defaulting to now).
    ///
    /// Returns `false` if the subject is unknown or already terminal.
    pub fn update_status(
        &self,
        subject_id: SubjectId,
        status: OperationStatus,
        completed_at: Option<Timestamp>,
    ) -> bool {
        let mut records = self
            .records
            .write()
            .expect("acquire write lock on records");

        let Some(record) = records.get_mut(&subject_id) else {
            return false;
        };
        if record.status.is_terminal() {
            return false;
        }

        record.status = status;
        if status.is_terminal() {
            record.completed_at = Some(completed_at.unwrap_or_else(Timestamp::now));
        }

        debug!(%subject_id, status = %status, "operation status updated");
        true
    }

    /// Remove a record (manual dismissal).
    ///
    /// Returns `true` if the record was present, `false` otherwise.
    pub fn remove(&self, subject_id: SubjectId) -> bool {
        let mut records = self
            .records
            .write()
            .expect("acquire write lock on records");

        let removed = records.remove(&subject_id).is_some();

        if removed {
            debug!(%subject_id, "operation dismissed");
        }

        removed
    }

    /// Get a record by subject id.
    #[must_use]
    pub fn get(&self, subject_id: SubjectId) -> Option<OperationRecord> {
        let records = self.records.read().expect("acquire read lock on records");
        records.get(&subject_id).cloned()
    }

    /// Get all records with the given status.
    #[must_use]
    pub fn by_status(&self, status: OperationStatus) -> Vec<OperationRecord> {
        let records = self.records.read().expect("acquire read lock on records");
        records
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect()
    }

    /// Get all records.
    #[must_use]
    pub fn all(&self) -> Vec<OperationRecord> {
        let records = self.records.read().expect("acquire read lock on records");
        records.values().cloned().collect()
    }

    /// Number of tracked records.
    #[must_use]
    pub fn count(&self) -> usize {
        let records = self.records.read().expect("acquire read lock on records");
        records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OperationKind;
    use mailflow_core::{ContactId, ContactType, DispatchMode, MailboxId};

    fn dispatch_record(subject: i64, mode: DispatchMode) -> OperationRecord {
        OperationRecord::new(
            format!("token-{subject}"),
            SubjectId::new(subject),
            OperationKind::DispatchSend {
                mailbox_ids: vec![MailboxId::new(1)],
                mode,
            },
        )
    }

    #[test]
    fn test_add_and_get() {
        let store = OperationStore::new();
        store.add(dispatch_record(42, DispatchMode::Immediate));

        let record = store.get(SubjectId::new(42)).expect("record present");
        assert_eq!(record.status, OperationStatus::Processing);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_add_duplicate_last_write_wins() {
        // Collisions are not expected in practice, but the behavior is defined
        let store = OperationStore::new();
        store.add(dispatch_record(42, DispatchMode::Immediate));
        store.add(dispatch_record(42, DispatchMode::Scheduled));

        assert_eq!(store.count(), 1);
        let record = store.get(SubjectId::new(42)).expect("record present");
        assert_eq!(record.status, OperationStatus::Scheduled);
    }

    #[test]
    fn test_update_status_terminal_sets_completed_at() {
        let store = OperationStore::new();
        store.add(dispatch_record(42, DispatchMode::Immediate));

        let updated = store.update_status(SubjectId::new(42), OperationStatus::Completed, None);
        assert!(updated);

        let record = store.get(SubjectId::new(42)).expect("record present");
        assert_eq!(record.status, OperationStatus::Completed);
        assert!(record.completed_at.is_some());
    }

    #[test]
    fn test_update_status_monotonic() {
        let store = OperationStore::new();
        store.add(dispatch_record(42, DispatchMode::Immediate));
        store.update_status(SubjectId::new(42), OperationStatus::Completed, None);

        // Terminal records are final
        let updated = store.update_status(SubjectId::new(42), OperationStatus::Failed, None);
        assert!(!updated);

        let record = store.get(SubjectId::new(42)).expect("record present");
        assert_eq!(record.status, OperationStatus::Completed);
    }

    #[test]
    fn test_update_status_unknown_subject() {
        let store = OperationStore::new();
        let updated = store.update_status(SubjectId::new(99), OperationStatus::Completed, None);
        assert!(!updated);
    }

    #[test]
    fn test_remove() {
        let store = OperationStore::new();
        store.add(dispatch_record(42, DispatchMode::Immediate));

        assert!(store.remove(SubjectId::new(42)));
        assert!(store.get(SubjectId::new(42)).is_none());

        // Removing again should return false
        assert!(!store.remove(SubjectId::new(42)));
    }

    #[test]
    fn test_by_status() {
        let store = OperationStore::new();
        store.add(dispatch_record(1, DispatchMode::Immediate));
        store.add(dispatch_record(2, DispatchMode::Scheduled));
        store.add(dispatch_record(3, DispatchMode::Immediate));
        store.update_status(SubjectId::new(3), OperationStatus::Failed, None);

        assert_eq!(store.by_status(OperationStatus::Processing).len(), 1);
        assert_eq!(store.by_status(OperationStatus::Scheduled).len(), 1);
        assert_eq!(store.by_status(OperationStatus::Failed).len(), 1);
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn test_research_record_keyed_by_subject() {
        let store = OperationStore::new();
        store.add(OperationRecord::new(
            "xyz",
            SubjectId::new(7),
            OperationKind::Research {
                contact_id: ContactId::new(9),
                contact_type: ContactType::Person,
            },
        ));

        let record = store.get(SubjectId::new(7)).expect("record present");
        assert_eq!(record.token, "xyz");
    }
}
