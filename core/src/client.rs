//! HTTP request builder, response parser and round-trip driver for the
//! task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//! keeping request construction and status interpretation deterministic and
//! testable without a network. The `list`/`create`/`update`/`delete`
//! combinators run one full round trip through a caller-supplied
//! `Transport`. No retries and no timeouts here — that policy lives in the
//! transport implementation.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{Task, TaskInput};

/// Stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- request builders ---

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/tasks", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, input: &TaskInput) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/tasks", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_task(&self, id: Uuid, input: &TaskInput) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/tasks/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_task(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/tasks/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    // --- response parsers ---

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Delete replies with `200 {"message": ...}`; the body is checked for
    /// shape and then discarded.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)?;
        let _: DeleteReply = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(())
    }

    // --- round trips ---

    pub fn list(&self, transport: &dyn Transport) -> Result<Vec<Task>, ApiError> {
        let request = self.build_list_tasks();
        let response = transport.execute(&request)?;
        self.parse_list_tasks(response)
    }

    pub fn create(&self, transport: &dyn Transport, input: &TaskInput) -> Result<Task, ApiError> {
        let request = self.build_create_task(input)?;
        let response = transport.execute(&request)?;
        self.parse_create_task(response)
    }

    pub fn update(
        &self,
        transport: &dyn Transport,
        id: Uuid,
        input: &TaskInput,
    ) -> Result<Task, ApiError> {
        let request = self.build_update_task(id, input)?;
        let response = transport.execute(&request)?;
        self.parse_update_task(response)
    }

    pub fn delete(&self, transport: &dyn Transport, id: Uuid) -> Result<(), ApiError> {
        let request = self.build_delete_task(id);
        let response = transport.execute(&request)?;
        self.parse_delete_task(response)
    }
}

#[derive(Deserialize)]
struct DeleteReply {
    #[allow(dead_code)]
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
///
/// 400 bodies carry `{"error": message}`; if that shape does not parse the
/// raw body is used as the message.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|b| b.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::Rejected(message))
        }
        status => Err(ApiError::Server {
            status,
            body: response.body.clone(),
        }),
    }
}
