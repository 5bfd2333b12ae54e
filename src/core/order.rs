use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::task::Task;
use crate::error::AgendaError;

/// Default agenda order: incomplete before completed, then pinned before
/// unpinned, then input order.
pub fn order(tasks: &[Task]) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    // sort_by_key is stable, which keeps input order among equal ranks.
    ordered.sort_by_key(|t| (t.completed, !t.pinned));
    ordered
}

/// Explicit re-sort modes offered outside the default agenda order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    AlphabeticalAsc,
    AlphabeticalDesc,
    NewestFirst,
    OldestFirst,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AlphabeticalAsc => "A-Z",
            Self::AlphabeticalDesc => "Z-A",
            Self::NewestFirst => "Newest to oldest",
            Self::OldestFirst => "Oldest to newest",
        }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::AlphabeticalAsc => compare_names(a, b),
            Self::AlphabeticalDesc => compare_names(b, a),
            // Tasks without a creation time sort as oldest.
            Self::NewestFirst => b.created.cmp(&a.created),
            Self::OldestFirst => a.created.cmp(&b.created),
        }
    }
}

impl FromStr for SortMode {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a-z" | "alphabetical-asc" => Ok(Self::AlphabeticalAsc),
            "z-a" | "alphabetical-desc" => Ok(Self::AlphabeticalDesc),
            "newest" | "newest-first" => Ok(Self::NewestFirst),
            "oldest" | "oldest-first" => Ok(Self::OldestFirst),
            _ => Err(AgendaError::InvalidSortMode(s.to_string())),
        }
    }
}

fn compare_names(a: &Task, b: &Task) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Stable re-sort of `tasks` by the given mode.
pub fn sort_by(tasks: &[Task], mode: SortMode) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| mode.compare(a, b));
    sorted
}
