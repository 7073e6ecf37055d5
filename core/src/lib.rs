//! Client core for the todo list service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sits a view
//! controller: it caches the last fetched list, filters it, renders it to a
//! plain display description and routes user events to REST mutations.
//!
//! # Design
//! - `TodoClient` is stateless. It holds only `base_url`.
//! - Each route is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `Controller` owns the `ViewModel` and a host `Transport`; every
//!   mutation is followed by a full reload.
//! - `render` is pure: same list and filter, same `ListDisplay`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod event;
pub mod filter;
pub mod http;
pub mod render;
pub mod types;

pub use client::TodoClient;
pub use controller::{Confirm, Controller, EditSession, Outcome, SkipReason, ViewModel};
pub use error::{ApiError, ClientError};
pub use event::UiEvent;
pub use filter::Filter;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use render::{ActionKind, ItemRow, ListDisplay, Row, RowAction, render};
pub use types::{Draft, Todo, TodoId, TodoInput, ValidationError};
