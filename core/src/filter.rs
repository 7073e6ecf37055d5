//! Client-side display filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Display order of the filter controls.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// Borrow the matching items in their original order.
    pub fn apply(self, todos: &[Todo]) -> Vec<&Todo> {
        todos.iter().filter(|todo| self.matches(todo)).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter {0:?}, expected all, active or completed")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::TodoId;

    fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId(id),
            title: title.to_string(),
            description: format!("{title} description"),
            completed,
        }
    }

    fn ids(todos: &[&Todo]) -> Vec<u64> {
        todos.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn two_item_cache() {
        let cache = vec![todo(1, "A", false), todo(2, "B", true)];
        assert_eq!(ids(&Filter::Active.apply(&cache)), vec![1]);
        assert_eq!(ids(&Filter::Completed.apply(&cache)), vec![2]);
        assert_eq!(ids(&Filter::All.apply(&cache)), vec![1, 2]);
    }

    #[test]
    fn default_is_all() {
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Active".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!(" completed ".parse::<Filter>().unwrap(), Filter::Completed);
        assert!("done".parse::<Filter>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_value(Filter::Completed).unwrap(), "completed");
    }

    fn cache_strategy() -> impl Strategy<Value = Vec<Todo>> {
        prop::collection::vec(any::<bool>(), 0..40).prop_map(|flags| {
            flags
                .into_iter()
                .enumerate()
                .map(|(i, completed)| todo(i as u64, &format!("t{i}"), completed))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn all_is_identity(cache in cache_strategy()) {
            let shown: Vec<Todo> = Filter::All.apply(&cache).into_iter().cloned().collect();
            prop_assert_eq!(shown, cache);
        }

        #[test]
        fn active_and_completed_partition_the_cache(cache in cache_strategy()) {
            let active = Filter::Active.apply(&cache);
            let completed = Filter::Completed.apply(&cache);
            prop_assert!(active.iter().all(|t| !t.completed));
            prop_assert!(completed.iter().all(|t| t.completed));
            prop_assert_eq!(active.len() + completed.len(), cache.len());
            let expected_active: Vec<u64> = cache.iter().filter(|t| !t.completed).map(|t| t.id.0).collect();
            prop_assert_eq!(ids(&active), expected_active);
        }
    }
}
