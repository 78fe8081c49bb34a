//! Draft/modal state machine governing create-vs-edit intent.
//!
//! # Design
//! The machine owns the draft exclusively: nothing else can observe or edit
//! it. Transitions are guarded — opening a modal over an open one, or
//! editing with no modal open, returns an error rather than clobbering the
//! draft. Submission is orchestrated by the session, which inspects the
//! state here, runs validation and the network round trip, and closes the
//! modal only on success.

use std::fmt;

use uuid::Uuid;

use crate::types::{Draft, Priority, Task};

/// Whether a create/edit form is open, and for what.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,

    /// Creating a new task from a draft that has no identity yet.
    Creating(Draft),

    /// Editing the task with the given id through a copy of its fields.
    Editing { id: Uuid, draft: Draft },
}

/// One field edit, as delivered by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Title(String),
    Priority(Priority),
    DueDate(String),
}

impl ModalState {
    /// Open the form with a blank draft. Errors if a draft is already open.
    pub fn open_for_create(&mut self) -> Result<(), ModalError> {
        if !self.is_closed() {
            return Err(ModalError::DraftInProgress);
        }
        *self = ModalState::Creating(Draft::default());
        Ok(())
    }

    /// Open the form pre-populated with a copy of `task`'s fields. Errors if
    /// a draft is already open.
    pub fn open_for_edit(&mut self, task: &Task) -> Result<(), ModalError> {
        if !self.is_closed() {
            return Err(ModalError::DraftInProgress);
        }
        *self = ModalState::Editing {
            id: task.id,
            draft: Draft::from_task(task),
        };
        Ok(())
    }

    /// Apply one field edit to the open draft.
    pub fn edit_field(&mut self, field: DraftField) -> Result<(), ModalError> {
        let draft = self.draft_mut().ok_or(ModalError::NoActiveDraft)?;
        match field {
            DraftField::Title(title) => draft.title = title,
            DraftField::Priority(priority) => draft.priority = priority,
            DraftField::DueDate(due_date) => draft.due_date = due_date,
        }
        Ok(())
    }

    /// Discard the draft and close. Closing an already-closed modal is
    /// harmless.
    pub fn cancel(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ModalState::Closed)
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    /// The open draft, if any.
    pub fn draft(&self) -> Option<&Draft> {
        match self {
            ModalState::Closed => None,
            ModalState::Creating(draft) | ModalState::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            ModalState::Closed => None,
            ModalState::Creating(draft) | ModalState::Editing { draft, .. } => Some(draft),
        }
    }

    /// The id being edited, when in the editing state.
    pub fn editing_target(&self) -> Option<Uuid> {
        match self {
            ModalState::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// A command arrived in a state that does not accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalError {
    /// open-for-create/open-for-edit while a draft is already open.
    DraftInProgress,

    /// edit/submit while no draft is open.
    NoActiveDraft,
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalError::DraftInProgress => write!(f, "a draft is already open"),
            ModalError::NoActiveDraft => write!(f, "no draft is open"),
        }
    }
}

impl std::error::Error for ModalError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Learn X".to_string(),
            priority: Priority::High,
            due_date: "2024-11-25".parse().unwrap(),
        }
    }

    #[test]
    fn starts_closed() {
        assert!(ModalState::default().is_closed());
    }

    #[test]
    fn open_for_create_yields_blank_draft() {
        let mut modal = ModalState::default();
        modal.open_for_create().unwrap();
        assert_eq!(modal.draft(), Some(&Draft::default()));
        assert_eq!(modal.editing_target(), None);
    }

    #[test]
    fn open_for_edit_copies_task_fields_and_remembers_id() {
        let task = sample_task();
        let mut modal = ModalState::default();
        modal.open_for_edit(&task).unwrap();
        assert_eq!(modal.draft(), Some(&Draft::from_task(&task)));
        assert_eq!(modal.editing_target(), Some(task.id));
    }

    #[test]
    fn opening_over_an_open_draft_is_rejected() {
        let mut modal = ModalState::default();
        modal.open_for_create().unwrap();
        assert_eq!(modal.open_for_create(), Err(ModalError::DraftInProgress));
        assert_eq!(
            modal.open_for_edit(&sample_task()),
            Err(ModalError::DraftInProgress)
        );
    }

    #[test]
    fn edit_field_updates_the_draft_in_place() {
        let mut modal = ModalState::default();
        modal.open_for_create().unwrap();
        modal
            .edit_field(DraftField::Title("Ship".to_string()))
            .unwrap();
        modal
            .edit_field(DraftField::Priority(Priority::Medium))
            .unwrap();
        modal
            .edit_field(DraftField::DueDate("2024-12-01".to_string()))
            .unwrap();

        let draft = modal.draft().unwrap();
        assert_eq!(draft.title, "Ship");
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.due_date, "2024-12-01");
    }

    #[test]
    fn edit_field_without_open_draft_is_rejected() {
        let mut modal = ModalState::default();
        let err = modal
            .edit_field(DraftField::Title("Ship".to_string()))
            .unwrap_err();
        assert_eq!(err, ModalError::NoActiveDraft);
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut modal = ModalState::default();
        modal.open_for_create().unwrap();
        modal
            .edit_field(DraftField::Title("half-typed".to_string()))
            .unwrap();
        modal.cancel();
        assert!(modal.is_closed());
        assert_eq!(modal.draft(), None);
    }

    #[test]
    fn cancel_while_closed_is_harmless() {
        let mut modal = ModalState::default();
        modal.cancel();
        assert!(modal.is_closed());
    }

    #[test]
    fn editing_the_draft_does_not_touch_the_source_task() {
        let task = sample_task();
        let mut modal = ModalState::default();
        modal.open_for_edit(&task).unwrap();
        modal
            .edit_field(DraftField::Title("changed".to_string()))
            .unwrap();
        assert_eq!(task.title, "Learn X");
    }
}
