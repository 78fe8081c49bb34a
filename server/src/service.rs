//! Task service: validation, identifier assignment and persistence
//! mutation.
//!
//! # Design
//! The wire form carries priority and due date as raw strings; nothing is
//! persisted until the validation predicate has turned them into typed
//! values. Storage is an insertion-ordered sequence, so `list` output is
//! stable. These types mirror the client crate's schema but are defined
//! independently; integration tests catch any drift.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A persisted task.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            other => Err(ServiceError::InvalidPriority(other.to_string())),
        }
    }
}

/// Create/update payload as received on the wire. Priority and due date
/// arrive as strings and are validated, not trusted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    pub title: String,
    pub priority: String,
    pub due_date: String,
}

/// Why a mutation was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("priority must be Low, Medium or High, got {0:?}")]
    InvalidPriority(String),

    #[error("due date {0:?} is not a valid calendar date")]
    InvalidDueDate(String),

    #[error("task {0} not found")]
    NotFound(Uuid),
}

/// In-memory persistence for tasks, in insertion order.
#[derive(Debug, Default)]
pub struct TaskService {
    tasks: Vec<Task>,
}

impl TaskService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every persisted record, oldest first.
    pub fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Validate the form, assign a fresh id and persist the record.
    pub fn create(&mut self, form: &TaskForm) -> Result<Task, ServiceError> {
        let (title, priority, due_date) = validate(form)?;
        let task = Task {
            id: Uuid::new_v4(),
            title,
            priority,
            due_date,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replace the three mutable fields of an existing record. The id
    /// itself never changes.
    pub fn update(&mut self, id: Uuid, form: &TaskForm) -> Result<Task, ServiceError> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        let (title, priority, due_date) = validate(form)?;
        let task = &mut self.tasks[position];
        task.title = title;
        task.priority = priority;
        task.due_date = due_date;
        Ok(task.clone())
    }

    /// Remove the record if present. Returns whether anything was removed;
    /// deleting an unknown id is a no-op, not an error.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }
}

/// The validation predicate: non-empty trimmed title, enum priority,
/// parseable ISO date.
fn validate(form: &TaskForm) -> Result<(String, Priority, NaiveDate), ServiceError> {
    if form.title.trim().is_empty() {
        return Err(ServiceError::EmptyTitle);
    }
    let priority = form.priority.parse::<Priority>()?;
    let due_date = form
        .due_date
        .parse::<NaiveDate>()
        .map_err(|_| ServiceError::InvalidDueDate(form.due_date.clone()))?;
    Ok((form.title.clone(), priority, due_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, priority: &str, due_date: &str) -> TaskForm {
        TaskForm {
            title: title.to_string(),
            priority: priority.to_string(),
            due_date: due_date.to_string(),
        }
    }

    #[test]
    fn create_assigns_unique_ids_and_keeps_insertion_order() {
        let mut service = TaskService::new();
        let first = service.create(&form("Learn X", "High", "2024-11-25")).unwrap();
        let second = service.create(&form("Ship", "Low", "2024-12-01")).unwrap();
        assert_ne!(first.id, second.id);

        let listed = service.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], first);
        assert_eq!(listed[1], second);
    }

    #[test]
    fn create_rejects_empty_and_whitespace_titles() {
        let mut service = TaskService::new();
        assert_eq!(
            service.create(&form("", "Low", "2024-12-01")).unwrap_err(),
            ServiceError::EmptyTitle
        );
        assert_eq!(
            service.create(&form("  ", "Low", "2024-12-01")).unwrap_err(),
            ServiceError::EmptyTitle
        );
        assert!(service.list().is_empty());
    }

    #[test]
    fn create_rejects_priority_outside_the_enum() {
        let mut service = TaskService::new();
        let err = service
            .create(&form("Learn X", "Urgent", "2024-12-01"))
            .unwrap_err();
        assert_eq!(err, ServiceError::InvalidPriority("Urgent".to_string()));
    }

    #[test]
    fn create_rejects_unparseable_due_date() {
        let mut service = TaskService::new();
        let err = service
            .create(&form("Learn X", "Low", "next week"))
            .unwrap_err();
        assert_eq!(err, ServiceError::InvalidDueDate("next week".to_string()));
    }

    #[test]
    fn update_replaces_fields_and_preserves_id() {
        let mut service = TaskService::new();
        let created = service.create(&form("Learn X", "High", "2024-11-25")).unwrap();

        let updated = service
            .update(created.id, &form("Learn X v2", "Medium", "2024-11-30"))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Learn X v2");
        assert_eq!(updated.priority, Priority::Medium);
        assert_eq!(updated.due_date, "2024-11-30".parse::<NaiveDate>().unwrap());
        assert_eq!(service.list(), vec![updated]);
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let mut service = TaskService::new();
        let id = Uuid::new_v4();
        let err = service
            .update(id, &form("Learn X", "Low", "2024-12-01"))
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound(id));
    }

    #[test]
    fn update_checks_existence_before_validating() {
        let mut service = TaskService::new();
        let id = Uuid::new_v4();
        // invalid form, unknown id: the miss wins
        let err = service.update(id, &form("", "Nope", "bad")).unwrap_err();
        assert_eq!(err, ServiceError::NotFound(id));
    }

    #[test]
    fn delete_removes_only_the_addressed_record() {
        let mut service = TaskService::new();
        let first = service.create(&form("Learn X", "High", "2024-11-25")).unwrap();
        let second = service.create(&form("Ship", "Low", "2024-12-01")).unwrap();

        assert!(service.delete(first.id));
        assert_eq!(service.list(), vec![second]);
    }

    #[test]
    fn delete_of_unknown_id_reports_nothing_removed() {
        let mut service = TaskService::new();
        assert!(!service.delete(Uuid::new_v4()));
    }

    #[test]
    fn task_serializes_to_the_wire_shape() {
        let task = Task {
            id: Uuid::nil(),
            title: "Learn X".to_string(),
            priority: Priority::High,
            due_date: "2024-11-25".parse().unwrap(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Learn X");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["dueDate"], "2024-11-25");
    }

    #[test]
    fn form_deserializes_camel_case_due_date() {
        let form: TaskForm = serde_json::from_str(
            r#"{"title":"Learn X","priority":"High","dueDate":"2024-11-25"}"#,
        )
        .unwrap();
        assert_eq!(form.title, "Learn X");
        assert_eq!(form.priority, "High");
        assert_eq!(form.due_date, "2024-11-25");
    }

    #[test]
    fn form_rejects_missing_title() {
        let result: Result<TaskForm, _> =
            serde_json::from_str(r#"{"priority":"High","dueDate":"2024-11-25"}"#);
        assert!(result.is_err());
    }
}
