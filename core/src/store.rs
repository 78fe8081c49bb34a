//! Client-held cache of the canonical task set.
//!
//! # Design
//! The store is an insertion-ordered sequence keyed by `id`, and only ever
//! absorbs records the server returned — a mutation's result is applied
//! verbatim, so after any successful round trip the cached record is the
//! server's canonical copy, never a locally-edited one. There is no
//! speculative insert: ids are server-assigned, so nothing exists client-side
//! until the create round trip completes.

use std::fmt;

use uuid::Uuid;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::Task;

/// The client's current belief about the full task set.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All cached tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fetch the full set from the server and replace the cache with it.
    ///
    /// The swap happens only after a fully parsed success — a failed or
    /// malformed response leaves the prior sequence untouched.
    pub fn load(&mut self, client: &TaskClient, transport: &dyn Transport) -> Result<(), ApiError> {
        let fetched = client.list(transport)?;
        self.tasks = fetched;
        Ok(())
    }

    /// Append a record the server just created.
    pub fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the cached record matching the updated record's `id`.
    ///
    /// The server confirmed an update for a task this cache does not hold —
    /// that is a client/server disagreement and is reported, not ignored.
    pub fn apply_updated(&mut self, task: Task) -> Result<(), ReconcileError> {
        match self.tasks.iter_mut().find(|held| held.id == task.id) {
            Some(held) => {
                *held = task;
                Ok(())
            }
            None => Err(ReconcileError::UnknownTask(task.id)),
        }
    }

    /// Drop the record with the given `id`. Removing an id that is not held
    /// is a no-op: deletes are idempotent.
    pub fn apply_deleted(&mut self, id: Uuid) {
        self.tasks.retain(|task| task.id != id);
    }
}

/// The server's authoritative copy could not be reconciled into the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// An update result referenced an id the cache does not hold.
    UnknownTask(Uuid),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::UnknownTask(id) => {
                write!(f, "updated task {id} is not present in the local cache")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn task(title: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            priority: Priority::Medium,
            due_date: "2024-11-25".parse().unwrap(),
        }
    }

    #[test]
    fn apply_created_appends_in_order() {
        let mut store = TaskStore::new();
        let first = task("first");
        let second = task("second");
        store.apply_created(first.clone());
        store.apply_created(second.clone());
        assert_eq!(store.tasks(), [first, second]);
    }

    #[test]
    fn apply_updated_replaces_matching_record_only() {
        let mut store = TaskStore::new();
        let first = task("first");
        let second = task("second");
        store.apply_created(first.clone());
        store.apply_created(second.clone());

        let mut updated = first.clone();
        updated.title = "first v2".to_string();
        updated.priority = Priority::High;
        store.apply_updated(updated.clone()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(first.id), Some(&updated));
        assert_eq!(store.get(second.id), Some(&second));
    }

    #[test]
    fn apply_updated_for_unknown_id_is_a_reconcile_error() {
        let mut store = TaskStore::new();
        store.apply_created(task("held"));
        let before: Vec<Task> = store.tasks().to_vec();

        let stranger = task("stranger");
        let err = store.apply_updated(stranger.clone()).unwrap_err();
        assert_eq!(err, ReconcileError::UnknownTask(stranger.id));
        // prior state intact
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn apply_deleted_removes_exactly_the_matching_record() {
        let mut store = TaskStore::new();
        let first = task("first");
        let second = task("second");
        store.apply_created(first.clone());
        store.apply_created(second.clone());

        store.apply_deleted(first.id);
        assert_eq!(store.tasks(), [second]);
    }

    #[test]
    fn apply_deleted_twice_is_a_no_op() {
        let mut store = TaskStore::new();
        let only = task("only");
        store.apply_created(only.clone());

        store.apply_deleted(only.id);
        store.apply_deleted(only.id);
        assert!(store.is_empty());
    }

    #[test]
    fn get_finds_by_id() {
        let mut store = TaskStore::new();
        let held = task("held");
        store.apply_created(held.clone());
        assert_eq!(store.get(held.id), Some(&held));
        assert_eq!(store.get(Uuid::new_v4()), None);
    }
}
