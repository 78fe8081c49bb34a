//! Domain types for the task API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Validation has a single chokepoint: `TaskInput::new`. A draft becomes a
//! `TaskInput` only by passing it, so anything handed to the client for a
//! create or update round trip is already known to be well-formed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task as persisted by the server.
///
/// `id` is server-assigned and immutable; the other three fields are
/// replaced wholesale by a successful update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

/// Task priority. Serialized as the bare variant name (`"Low"`, `"Medium"`,
/// `"High"`) on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

/// An unpersisted, editable copy of a task's fields.
///
/// Owned exclusively by the modal state machine while a create/edit form is
/// open. The due date stays raw text until `validate` parses it, so a
/// half-typed date never poisons the draft itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub priority: Priority,
    pub due_date: String,
}

impl Default for Draft {
    /// The blank form: empty title, `Low` priority, empty date.
    fn default() -> Self {
        Draft {
            title: String::new(),
            priority: Priority::Low,
            due_date: String::new(),
        }
    }
}

impl Draft {
    /// Pre-populate a draft from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Draft {
            title: task.title.clone(),
            priority: task.priority,
            due_date: task.due_date.to_string(),
        }
    }

    /// Run the validation predicate, yielding a payload fit for a create or
    /// update round trip.
    pub fn validate(&self) -> Result<TaskInput, ValidationError> {
        TaskInput::new(&self.title, self.priority, &self.due_date)
    }
}

/// Validated request payload for creating or replacing a task. The three
/// mutable fields, all required — updates are full replacement, not patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

impl TaskInput {
    /// The validation predicate: title must be non-empty after trimming and
    /// the due date must parse as an ISO calendar date. The priority is a
    /// member of the enum by construction.
    ///
    /// The title is stored as given; trimming applies only to the emptiness
    /// check.
    pub fn new(title: &str, priority: Priority, due_date: &str) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let due_date = due_date
            .parse::<NaiveDate>()
            .map_err(|_| ValidationError::InvalidDueDate(due_date.to_string()))?;
        Ok(TaskInput {
            title: title.to_string(),
            priority,
            due_date,
        })
    }
}

/// A draft or payload failed the validation predicate.
///
/// Kept separate from `ApiError`: validation failures are detected before
/// any network call and leave the draft open for correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty or whitespace-only.
    EmptyTitle,

    /// The priority string is not one of `Low`, `Medium`, `High`.
    InvalidPriority(String),

    /// The due date does not parse as a calendar date.
    InvalidDueDate(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title must not be empty"),
            ValidationError::InvalidPriority(got) => {
                write!(f, "priority must be Low, Medium or High, got {got:?}")
            }
            ValidationError::InvalidDueDate(got) => {
                write!(f, "due date {got:?} is not a valid calendar date")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
