//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because they are the
//! two statuses the todo server answers deliberately (unknown id, missing
//! field). All other unexpected statuses land in `HttpError` with the raw
//! status code and body for debugging.
//!
//! `ClientError` is what the controller returns: either the server said no
//! (`Api`) or the host never got an answer (`Transport`).

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400, usually a missing title or description.
    #[error("bad request: {body}")]
    BadRequest { body: String },

    /// Any other status the operation does not accept.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api(ApiError::NotFound))
    }
}
