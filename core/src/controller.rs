//! View model and the controller that drives it.
//!
//! # Design
//! `ViewModel` is the only client state: the cached list, the active filter,
//! the staged edit session and the new-entry form. `Controller` owns it
//! together with a `TodoClient` and a host-supplied `Transport`.
//!
//! Every mutation is request, then full reload. The cache is replaced
//! wholesale by each list/search response and is never patched locally, so
//! a toggle is not visible until the reload lands. Once a mutation gets any
//! response, even a 4xx/5xx, the list is reloaded before the status error is
//! returned. Only a transport failure skips the reload, and then the view
//! model is left as it was.

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, ClientError};
use crate::filter::Filter;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::render::{ListDisplay, render};
use crate::types::{Draft, Todo, TodoId, ValidationError};

/// Staged edit: the id being edited and the form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TodoId,
    pub draft: Draft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    todos: Vec<Todo>,
    filter: Filter,
    editing: Option<EditSession>,
    new_entry: Draft,
}

impl ViewModel {
    /// Cached todos from the last list or search response, in server order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn editing_id(&self) -> Option<TodoId> {
        self.editing.as_ref().map(|session| session.id)
    }

    pub fn new_entry(&self) -> &Draft {
        &self.new_entry
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn display(&self) -> ListDisplay {
        render(&self.todos, self.filter)
    }
}

/// Why an operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Invalid(ValidationError),
    NoEditSession,
    UnknownTodo(TodoId),
}

/// Result of a user operation that reached the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran; this is the display to paint.
    Applied(ListDisplay),
    /// Rejected before any request was sent.
    Skipped(SkipReason),
    /// The user declined the confirmation prompt.
    Cancelled,
}

impl Outcome {
    pub fn display(&self) -> Option<&ListDisplay> {
        match self {
            Outcome::Applied(display) => Some(display),
            Outcome::Skipped(_) | Outcome::Cancelled => None,
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm_delete(&mut self, id: TodoId) -> bool;
}

impl<F: FnMut(TodoId) -> bool> Confirm for F {
    fn confirm_delete(&mut self, id: TodoId) -> bool {
        self(id)
    }
}

pub struct Controller<T> {
    client: TodoClient,
    transport: T,
    view: ViewModel,
}

impl<T: Transport> Controller<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            view: ViewModel::default(),
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn display(&self) -> ListDisplay {
        self.view.display()
    }

    /// Fetch the full collection and replace the cache.
    pub fn load(&mut self) -> Result<ListDisplay, ClientError> {
        let request = self.client.build_list_todos();
        let response = self.send(request)?;
        let todos = self.client.parse_list_todos(response)?;
        Ok(self.replace_cache(todos))
    }

    /// Server-side search. A blank query is a plain `load`. The active filter
    /// still applies to the results.
    pub fn search(&mut self, query: &str) -> Result<ListDisplay, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return self.load();
        }
        let request = self.client.build_search_todos(query);
        let response = self.send(request)?;
        let todos = self.client.parse_search_todos(response)?;
        Ok(self.replace_cache(todos))
    }

    /// Change the filter and re-render the cache. No request is made.
    pub fn set_filter(&mut self, filter: Filter) -> ListDisplay {
        debug!(%filter, "filter changed");
        self.view.filter = filter;
        self.view.display()
    }

    /// The new-entry form, as the host's input fields see it.
    pub fn new_entry_mut(&mut self) -> &mut Draft {
        &mut self.view.new_entry
    }

    pub fn add(&mut self, title: &str, description: &str) -> Result<Outcome, ClientError> {
        let input = match Draft::new(title, description).validate() {
            Ok(input) => input,
            Err(reason) => {
                debug!(%reason, "add skipped");
                return Ok(Outcome::Skipped(SkipReason::Invalid(reason)));
            }
        };
        let request = self.client.build_create_todo(&input)?;
        let response = self.send(request)?;
        let status = self.client.parse_create_todo(response);
        if status.is_ok() {
            info!(title = %input.title, "todo created");
            self.view.new_entry.clear();
        }
        self.reload_after(status)
    }

    /// Submit whatever is in the new-entry form.
    pub fn submit_new_entry(&mut self) -> Result<Outcome, ClientError> {
        let Draft { title, description } = self.view.new_entry.clone();
        self.add(&title, &description)
    }

    pub fn delete(&mut self, id: TodoId, confirm: &mut impl Confirm) -> Result<Outcome, ClientError> {
        if !confirm.confirm_delete(id) {
            debug!(%id, "delete cancelled");
            return Ok(Outcome::Cancelled);
        }
        let request = self.client.build_delete_todo(id);
        let response = self.send(request)?;
        let status = self.client.parse_delete_todo(response);
        if status.is_ok() {
            info!(%id, "todo deleted");
        }
        self.reload_after(status)
    }

    pub fn toggle(&mut self, id: TodoId) -> Result<Outcome, ClientError> {
        let request = self.client.build_toggle_todo(id);
        let response = self.send(request)?;
        let status = self.client.parse_toggle_todo(response);
        if status.is_ok() {
            info!(%id, "todo toggled");
        }
        self.reload_after(status)
    }

    /// Stage `todo` for editing with its current field values.
    pub fn open_edit(&mut self, todo: &Todo) {
        debug!(id = %todo.id, "edit opened");
        self.view.editing = Some(EditSession {
            id: todo.id,
            draft: Draft::from(todo),
        });
    }

    /// Stage a cached todo by id.
    pub fn open_edit_by_id(&mut self, id: TodoId) -> Outcome {
        match self.view.get(id).cloned() {
            Some(todo) => {
                self.open_edit(&todo);
                Outcome::Applied(self.view.display())
            }
            None => Outcome::Skipped(SkipReason::UnknownTodo(id)),
        }
    }

    /// The staged edit form, if a session is open.
    pub fn edit_draft_mut(&mut self) -> Option<&mut Draft> {
        self.view.editing.as_mut().map(|session| &mut session.draft)
    }

    pub fn close_edit(&mut self) {
        if let Some(session) = self.view.editing.take() {
            debug!(id = %session.id, "edit closed");
        }
    }

    /// Validate and submit the staged edit. The session stays open when the
    /// draft is invalid or the server rejects the update.
    pub fn save_edit(&mut self) -> Result<Outcome, ClientError> {
        let Some(session) = self.view.editing.as_ref() else {
            return Ok(Outcome::Skipped(SkipReason::NoEditSession));
        };
        let id = session.id;
        let input = match session.draft.validate() {
            Ok(input) => input,
            Err(reason) => {
                debug!(%id, %reason, "save skipped");
                return Ok(Outcome::Skipped(SkipReason::Invalid(reason)));
            }
        };
        let request = self.client.build_update_todo(id, &input)?;
        let response = self.send(request)?;
        let status = self.client.parse_update_todo(response);
        if status.is_ok() {
            info!(%id, "todo updated");
            self.view.editing = None;
        }
        self.reload_after(status)
    }

    /// Reload after a mutation the server answered. A rejected status is
    /// returned after the reload; a reload failure wins only when the
    /// mutation itself was accepted.
    fn reload_after(&mut self, status: Result<(), ApiError>) -> Result<Outcome, ClientError> {
        let reloaded = self.load().map(Outcome::Applied);
        if let Err(err) = status {
            warn!(error = %err, "mutation rejected, list reloaded");
            return Err(err.into());
        }
        reloaded
    }

    fn replace_cache(&mut self, todos: Vec<Todo>) -> ListDisplay {
        info!(count = todos.len(), filter = %self.view.filter, "todo cache replaced");
        self.view.todos = todos;
        self.view.display()
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let method = request.method;
        let response = self.transport.execute(request).inspect_err(|err| {
            warn!(error = %err, "request failed");
        })?;
        if !response.is_success() {
            warn!(%method, status = response.status, "unexpected status");
        }
        Ok(response)
    }
}
