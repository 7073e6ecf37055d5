//! Event delegation: one entry point for everything a user can do.
//!
//! Hosts translate clicks and key presses into a `UiEvent` and call
//! `Controller::dispatch`. Row controls already carry their target id in
//! `RowAction`, so no per-row handler has to be bound.

use crate::controller::{Confirm, Controller, Outcome};
use crate::error::ClientError;
use crate::filter::Filter;
use crate::http::Transport;
use crate::render::{ActionKind, RowAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Initial page load or an explicit refresh.
    Load,
    SearchSubmitted(String),
    FilterSelected(Filter),
    /// Submit the new-entry form.
    AddSubmitted,
    /// A toggle, edit or delete control on a row.
    Row(RowAction),
    EditSaved,
    EditClosed,
}

impl From<RowAction> for UiEvent {
    fn from(action: RowAction) -> Self {
        UiEvent::Row(action)
    }
}

impl<T: Transport> Controller<T> {
    pub fn dispatch(&mut self, event: UiEvent, confirm: &mut impl Confirm) -> Result<Outcome, ClientError> {
        match event {
            UiEvent::Load => self.load().map(Outcome::Applied),
            UiEvent::SearchSubmitted(query) => self.search(&query).map(Outcome::Applied),
            UiEvent::FilterSelected(filter) => Ok(Outcome::Applied(self.set_filter(filter))),
            UiEvent::AddSubmitted => self.submit_new_entry(),
            UiEvent::Row(RowAction { kind, id }) => match kind {
                ActionKind::Toggle => self.toggle(id),
                ActionKind::Edit => Ok(self.open_edit_by_id(id)),
                ActionKind::Delete => self.delete(id, confirm),
            },
            UiEvent::EditSaved => self.save_edit(),
            UiEvent::EditClosed => {
                self.close_edit();
                Ok(Outcome::Applied(self.display()))
            }
        }
    }
}
