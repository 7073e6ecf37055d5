//! Pure mapping from (cached todos, filter) to a display description.
//!
//! # Design
//! A `ListDisplay` is everything a host needs to paint the list: which
//! filter control is marked, and one `Row` per visible item. Rows carry
//! `RowAction` values instead of callbacks; the host turns a clicked action
//! back into a `UiEvent` and hands it to the controller.

use serde::Serialize;

use crate::filter::Filter;
use crate::types::{Todo, TodoId};

/// Text shown in the single row of an empty list.
pub const PLACEHOLDER_TEXT: &str = "No todos to show";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListDisplay {
    pub filter: Filter,
    pub controls: [FilterControl; 3],
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterControl {
    pub kind: Filter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row {
    Placeholder { text: &'static str },
    Item(ItemRow),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub struck_through: bool,
    pub actions: [RowAction; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Toggle,
    Edit,
    Delete,
}

/// A control bound to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RowAction {
    pub kind: ActionKind,
    pub id: TodoId,
}

impl ListDisplay {
    pub fn items(&self) -> impl Iterator<Item = &ItemRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::Item(item) => Some(item),
            Row::Placeholder { .. } => None,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [Row::Placeholder { .. }])
    }

    pub fn action_count(&self) -> usize {
        self.items().map(|item| item.actions.len()).sum()
    }
}

pub fn render(todos: &[Todo], filter: Filter) -> ListDisplay {
    let mut rows: Vec<Row> = filter
        .apply(todos)
        .into_iter()
        .map(|todo| Row::Item(item_row(todo)))
        .collect();
    if rows.is_empty() {
        rows.push(Row::Placeholder {
            text: PLACEHOLDER_TEXT,
        });
    }
    ListDisplay {
        filter,
        controls: Filter::ALL.map(|kind| FilterControl {
            kind,
            active: kind == filter,
        }),
        rows,
    }
}

fn item_row(todo: &Todo) -> ItemRow {
    let action = |kind| RowAction { kind, id: todo.id };
    ItemRow {
        id: todo.id,
        title: todo.title.clone(),
        description: todo.description.clone(),
        struck_through: todo.completed,
        actions: [
            action(ActionKind::Toggle),
            action(ActionKind::Edit),
            action(ActionKind::Delete),
        ],
    }
}
