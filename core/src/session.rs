//! Top-level dashboard session: the view state and its command surface.
//!
//! # Design
//! `Dashboard` owns every piece of client state explicitly — client,
//! transport, store, modal, filter criteria are constructor-injected, with
//! no module-level singletons. Each UI action is an explicit command method
//! returning a `Result`, never an unobserved side effect.
//!
//! Every mutating command takes `&mut self`, so one session can never have
//! two mutating round trips in flight: the exclusive borrow is the
//! serialization guarantee. A `refresh` racing a mutation issued from
//! elsewhere (another session against the same server) is not ordered —
//! whichever response is applied last wins. That race is accepted; there is
//! no versioning or compare-and-swap at this layer.

use std::fmt;

use uuid::Uuid;

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::filter::{visible, FilterCriteria, PriorityFilter};
use crate::http::Transport;
use crate::modal::{DraftField, ModalError, ModalState};
use crate::store::{ReconcileError, TaskStore};
use crate::types::{Task, ValidationError};

/// Client state for the task dashboard, driving the store and modal through
/// the API client.
pub struct Dashboard {
    client: TaskClient,
    transport: Box<dyn Transport>,
    store: TaskStore,
    modal: ModalState,
    criteria: FilterCriteria,
}

impl Dashboard {
    pub fn new(client: TaskClient, transport: Box<dyn Transport>) -> Self {
        Dashboard {
            client,
            transport,
            store: TaskStore::new(),
            modal: ModalState::default(),
            criteria: FilterCriteria::default(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The tasks currently passing the filter, in store order.
    pub fn visible(&self) -> Vec<&Task> {
        visible(self.store.tasks(), &self.criteria)
    }

    /// Re-fetch the full task set. On failure the cache keeps its prior
    /// contents.
    pub fn refresh(&mut self) -> Result<(), DashboardError> {
        self.store
            .load(&self.client, self.transport.as_ref())
            .map_err(DashboardError::Api)
    }

    pub fn open_for_create(&mut self) -> Result<(), DashboardError> {
        self.modal.open_for_create().map_err(DashboardError::Modal)
    }

    /// Open the edit form for a task held in the store.
    pub fn open_for_edit(&mut self, id: Uuid) -> Result<(), DashboardError> {
        let task = self
            .store
            .get(id)
            .cloned()
            .ok_or(DashboardError::UnknownTask(id))?;
        self.modal
            .open_for_edit(&task)
            .map_err(DashboardError::Modal)
    }

    pub fn edit_field(&mut self, field: DraftField) -> Result<(), DashboardError> {
        self.modal.edit_field(field).map_err(DashboardError::Modal)
    }

    /// Discard the open draft, if any. The store is untouched.
    pub fn cancel(&mut self) {
        self.modal.cancel();
    }

    /// Submit the open draft.
    ///
    /// An invalid draft is rejected before any network call, and a failed
    /// round trip leaves the modal open with the draft intact so the user
    /// can retry or cancel. Only a successful round trip closes the modal
    /// and reconciles the server's record into the store.
    pub fn submit(&mut self) -> Result<(), DashboardError> {
        let (target, input) = match &self.modal {
            ModalState::Closed => return Err(DashboardError::Modal(ModalError::NoActiveDraft)),
            ModalState::Creating(draft) => (None, draft.validate()?),
            ModalState::Editing { id, draft } => (Some(*id), draft.validate()?),
        };

        match target {
            None => {
                let created = self.client.create(self.transport.as_ref(), &input)?;
                self.modal.cancel();
                self.store.apply_created(created);
            }
            Some(id) => {
                let updated = self.client.update(self.transport.as_ref(), id, &input)?;
                self.modal.cancel();
                self.store.apply_updated(updated)?;
            }
        }
        Ok(())
    }

    /// Delete a task straight from the list view; the modal is not
    /// involved. On failure the store keeps the record.
    pub fn delete(&mut self, id: Uuid) -> Result<(), DashboardError> {
        self.client.delete(self.transport.as_ref(), id)?;
        self.store.apply_deleted(id);
        Ok(())
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
    }

    pub fn set_priority_filter(&mut self, filter: PriorityFilter) {
        self.criteria.priority = filter;
    }
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("client", &self.client)
            .field("store", &self.store)
            .field("modal", &self.modal)
            .field("criteria", &self.criteria)
            .finish_non_exhaustive()
    }
}

/// A dashboard command failed.
#[derive(Debug)]
pub enum DashboardError {
    /// The draft failed validation; no network call was made.
    Validation(ValidationError),

    /// The round trip failed; for submits the draft stays open.
    Api(ApiError),

    /// The server's result could not be reconciled into the store.
    Reconcile(ReconcileError),

    /// The command does not apply in the current modal state.
    Modal(ModalError),

    /// open-for-edit targeted an id the store does not hold.
    UnknownTask(Uuid),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Validation(err) => write!(f, "invalid draft: {err}"),
            DashboardError::Api(err) => write!(f, "request failed: {err}"),
            DashboardError::Reconcile(err) => write!(f, "reconciliation failed: {err}"),
            DashboardError::Modal(err) => write!(f, "{err}"),
            DashboardError::UnknownTask(id) => write!(f, "no task {id} in the local cache"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Validation(err) => Some(err),
            DashboardError::Api(err) => Some(err),
            DashboardError::Reconcile(err) => Some(err),
            DashboardError::Modal(err) => Some(err),
            DashboardError::UnknownTask(_) => None,
        }
    }
}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err)
    }
}

impl From<ApiError> for DashboardError {
    fn from(err: ApiError) -> Self {
        DashboardError::Api(err)
    }
}

impl From<ReconcileError> for DashboardError {
    fn from(err: ReconcileError) -> Self {
        DashboardError::Reconcile(err)
    }
}
