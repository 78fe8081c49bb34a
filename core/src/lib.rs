//! Client-side core for the taskmaster service.
//!
//! # Overview
//! Everything a task dashboard needs between the UI and the wire: the
//! entity model and validation predicate, a pure filter over the task list,
//! a typed CRUD client, the client-held cache with its reconciliation
//! rules, and the draft/modal state machine, tied together by the
//! `Dashboard` session.
//!
//! # Design
//! - Sans-IO: the core builds `HttpRequest` values and parses
//!   `HttpResponse` values; the actual round trip goes through the
//!   `Transport` trait supplied by the host. Retries, timeouts and
//!   cancellation are transport concerns.
//! - The store only ever holds records the server returned; after any
//!   successful mutation its copy of the affected record is the server's
//!   canonical one.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod modal;
pub mod session;
pub mod store;
pub mod types;

pub use client::TaskClient;
pub use error::ApiError;
pub use filter::{visible, FilterCriteria, PriorityFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use modal::{DraftField, ModalError, ModalState};
pub use session::{Dashboard, DashboardError};
pub use store::{ReconcileError, TaskStore};
pub use types::{Draft, Priority, Task, TaskInput, ValidationError};
