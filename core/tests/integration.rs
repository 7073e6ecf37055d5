//! Full controller lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `Controller` whose
//! transport executes requests over real HTTP with ureq. Validates that the
//! core's request building, response parsing and reload ordering work
//! end-to-end with the actual server.

use todo_core::{
    ClientError, Controller, Filter, HttpMethod, HttpRequest, HttpResponse, Outcome, TodoClient, TodoId,
    Transport, TransportError, UiEvent,
};

/// Executes requests with ureq and counts them.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
    sent: Vec<(HttpMethod, String)>,
}

impl UreqTransport {
    fn new() -> Self {
        Self {
            agent: ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
            sent: Vec::new(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.push((req.method, req.path.clone()));
        let agent = &self.agent;
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => agent.post(&req.path).content_type("application/json").send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent.put(&req.path).content_type("application/json").send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
            (HttpMethod::Patch, Some(body)) => agent.patch(&req.path).content_type("application/json").send(body.as_bytes()),
            (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::new(&req, e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(&req, e))?;
        Ok(HttpResponse::new(status, body))
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn titles(outcome: &Outcome) -> Vec<String> {
    outcome.display().unwrap().items().map(|row| row.title.clone()).collect()
}

#[test]
fn controller_lifecycle() {
    let base_url = start_server();
    let mut c = Controller::new(TodoClient::new(&base_url), UreqTransport::new());
    let mut yes = |_: TodoId| true;

    // Step 1: initial load: empty list renders the placeholder.
    let display = c.load().unwrap();
    assert!(display.is_placeholder());

    // Step 2: blank input is rejected locally.
    let sent_before = c.transport().sent.len();
    assert!(matches!(c.add(" ", "x").unwrap(), Outcome::Skipped(_)));
    assert_eq!(c.transport().sent.len(), sent_before);

    // Step 3: create two todos.
    c.add("Buy milk", "corner shop").unwrap();
    let outcome = c.add("Walk dog", "park").unwrap();
    assert_eq!(titles(&outcome), vec!["Buy milk", "Walk dog"]);

    // Step 4: toggle the first one; exactly one PATCH then one GET.
    let first = c.view().todos()[0].id;
    let sent_before = c.transport().sent.len();
    c.toggle(first).unwrap();
    let sent = &c.transport().sent[sent_before..];
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], (HttpMethod::Patch, format!("{base_url}/api/todos/{first}/toggle")));
    assert_eq!(sent[1], (HttpMethod::Get, format!("{base_url}/api/todos")));
    assert!(c.view().get(first).unwrap().completed);

    // Step 5: filters over the cache.
    let active = c.dispatch(UiEvent::FilterSelected(Filter::Active), &mut yes).unwrap();
    assert_eq!(titles(&active), vec!["Walk dog"]);
    let completed = c.set_filter(Filter::Completed);
    assert_eq!(completed.items().count(), 1);

    // Step 6: search composes with the completed filter.
    let found = c.search("o").unwrap();
    assert_eq!(c.view().todos().len(), 2, "both todos mention an o");
    assert_eq!(found.items().map(|r| r.title.as_str()).collect::<Vec<_>>(), vec!["Buy milk"]);
    c.set_filter(Filter::All);

    // Step 7: edit the second todo.
    let second = c.view().todos()[1].id;
    c.open_edit_by_id(second);
    if let Some(draft) = c.edit_draft_mut() {
        draft.title = "Walk cat".to_string();
    }
    let outcome = c.save_edit().unwrap();
    assert_eq!(titles(&outcome), vec!["Buy milk", "Walk cat"]);
    assert!(c.view().editing().is_none());

    // Step 8: declined delete keeps the item, confirmed delete removes it.
    assert_eq!(c.delete(first, &mut |_: TodoId| false).unwrap(), Outcome::Cancelled);
    let outcome = c.delete(first, &mut yes).unwrap();
    assert_eq!(titles(&outcome), vec!["Walk cat"]);

    // Step 9: deleting again surfaces NotFound after a reload.
    let sent_before = c.transport().sent.len();
    let err = c.delete(first, &mut yes).unwrap_err();
    assert!(matches!(err, ClientError::Api(todo_core::ApiError::NotFound)));
    let sent = &c.transport().sent[sent_before..];
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1], (HttpMethod::Get, format!("{base_url}/api/todos")));
    assert_eq!(c.view().todos().len(), 1);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut c = Controller::new(TodoClient::new(&format!("http://{addr}")), UreqTransport::new());
    let err = c.load().unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(c.view().todos().is_empty());
}
