//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each route is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Mutation parsers only check the status. The controller reloads the full
//! list after every mutation, so the echoed todo in the body is never needed.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Todo, TodoId, TodoInput};

/// Collection root, appended to the base URL.
pub const API_PATH: &str = "/api/todos";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}{API_PATH}", self.base_url)
    }

    fn item(&self, id: TodoId) -> String {
        format!("{}{API_PATH}/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        get(self.collection())
    }

    /// Server-side search. The query is sent as given; callers decide how
    /// to treat blank input.
    pub fn build_search_todos(&self, query: &str) -> HttpRequest {
        get(format!(
            "{}/search?query={}",
            self.collection(),
            urlencoding::encode(query)
        ))
    }

    pub fn build_create_todo(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        json(HttpMethod::Post, self.collection(), input)
    }

    pub fn build_update_todo(&self, id: TodoId, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        json(HttpMethod::Put, self.item(id), input)
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_toggle_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/toggle", self.item(id)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, |status| status == 200)?;
        serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
    }

    pub fn parse_search_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        self.parse_list_todos(response)
    }

    /// Servers answer either `200` or `201` on create.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, |status| matches!(status, 200 | 201))
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, |status| status == 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, |status| matches!(status, 200 | 204))
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, |status| (200..300).contains(&status))
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json(method: HttpMethod, path: String, input: &TodoInput) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Map statuses the operation does not accept to the appropriate `ApiError`.
fn check_status(response: &HttpResponse, accept: impl Fn(u16) -> bool) -> Result<(), ApiError> {
    if accept(response.status) {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::BadRequest {
            body: response.body.clone(),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
