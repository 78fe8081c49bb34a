//! Derivation of the visible task subset.
//!
//! # Design
//! `visible` is a pure function over the store's sequence and the current
//! criteria. It borrows, never clones and never reorders — the view is
//! recomputed from scratch on every render, so the store stays the only
//! owner of task state.

use crate::types::{Priority, Task};

/// What the list view is currently filtered by. Client-only, no lifecycle
/// of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring to match against titles. Empty matches
    /// every title.
    pub search_text: String,
    pub priority: PriorityFilter,
}

/// Priority side of the criteria: everything, or exactly one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    fn matches(self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => wanted == priority,
        }
    }
}

/// Select the tasks matching `criteria`, preserving input order.
///
/// A task is included iff its title contains the search text as a
/// case-insensitive substring and its priority passes the priority filter.
pub fn visible<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    let needle = criteria.search_text.to_lowercase();
    tasks
        .iter()
        .filter(|task| task.title.to_lowercase().contains(&needle))
        .filter(|task| criteria.priority.matches(task.priority))
        .collect()
}
