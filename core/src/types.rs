//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Form text lives in `Draft` until it passes `Draft::validate`, which is the
//! only place the non-empty title/description rule is enforced on the client.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Server-assigned identifier of a todo. Opaque to the client apart from
/// being embedded in request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for TodoId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request payload for both create and update. The server replaces both
/// fields on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
}

/// Raw form text, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

/// Why a draft was not submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must not be empty")]
    EmptyDescription,
}

impl Draft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Trim both fields and reject empty ones. Title is checked first.
    pub fn validate(&self) -> Result<TodoInput, ValidationError> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(TodoInput {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}

impl From<&Todo> for Draft {
    fn from(todo: &Todo) -> Self {
        Self::new(todo.title.clone(), todo.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_fields() {
        let input = Draft::new("  Buy milk ", "\tsemi-skimmed\n").validate().unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, "semi-skimmed");
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert_eq!(Draft::new("", "x").validate(), Err(ValidationError::EmptyTitle));
        assert_eq!(Draft::new("x", "   ").validate(), Err(ValidationError::EmptyDescription));
        assert_eq!(Draft::new(" ", "").validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn todo_id_is_a_bare_number_on_the_wire() {
        let todo = Todo {
            id: TodoId(7),
            title: "A".to_string(),
            description: "B".to_string(),
            completed: true,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["completed"], true);
    }

    #[test]
    fn todo_tolerates_missing_completed_and_null_description() {
        let todo: Todo = serde_json::from_str(r#"{"id":3,"title":"T","description":null}"#).unwrap();
        assert_eq!(todo.id, TodoId(3));
        assert_eq!(todo.description, "");
        assert!(!todo.completed);
    }

    #[test]
    fn draft_from_todo_copies_fields() {
        let todo = Todo {
            id: TodoId(1),
            title: "Title".to_string(),
            description: "Desc".to_string(),
            completed: false,
        };
        assert_eq!(Draft::from(&todo), Draft::new("Title", "Desc"));
    }
}
