//! Error type for the task API client.
//!
//! # Design
//! `NotFound` and `Rejected` get dedicated variants because callers treat
//! them differently: a missing task is a reconciliation signal, a rejected
//! payload means the server's validation disagreed with ours. All other
//! non-2xx responses land in `Server` with the raw status and body for
//! debugging. `Network` wraps transport failures where no response was
//! obtained at all.

use std::fmt;

use crate::http::TransportError;

/// Errors returned by `TaskClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the addressed task does not exist.
    NotFound,

    /// The server returned 400: it rejected the payload as invalid. Carries
    /// the server's `error` message.
    Rejected(String),

    /// The server returned a non-2xx status other than 400/404.
    Server { status: u16, body: String },

    /// The transport failed before any response was obtained.
    Network(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "task not found"),
            ApiError::Rejected(message) => write!(f, "server rejected request: {message}"),
            ApiError::Server { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Network(message) => write!(f, "network failure: {message}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.0)
    }
}
