//! Blocking HTTP transport backed by ureq.

use todo_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::trace;

/// Executes core requests over the network.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
/// come back as data and the core client decides what they mean.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = &self.agent;
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => {
                agent.post(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                agent.put(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::new(&req, e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(&req, e))?;
        trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse::new(status, body))
    }
}
