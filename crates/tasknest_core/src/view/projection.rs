//! Pure presentation-list derivation: filter, then stable sort.
//!
//! # Responsibility
//! - Define the filter/sort vocabulary and its configuration parsing.
//! - Project the raw task set into the visible list.
//!
//! # Invariants
//! - Projection is a pure function of its inputs; the raw set is never
//!   mutated.
//! - Sorts are stable: ties preserve the store-delivered order.

use crate::model::task::Task;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visible-subset selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task passes.
    #[default]
    All,
    /// Only tasks with `completed == false`.
    Active,
    /// Only tasks with `completed == true`.
    Completed,
}

impl TaskFilter {
    /// Stable string id used in configuration and UI wiring.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    fn passes(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Visible-list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    /// Creation instant descending.
    #[default]
    Newest,
    /// Creation instant ascending.
    Oldest,
    /// Case-insensitive title order.
    Alphabetical,
}

impl TaskSort {
    /// Stable string id used in configuration and UI wiring.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
        }
    }
}

/// Parses one task filter from a configuration string value.
pub fn parse_task_filter(value: &str) -> Result<TaskFilter, ViewOptionError> {
    match value.trim() {
        "" => Err(ViewOptionError::EmptyValue),
        "all" => Ok(TaskFilter::All),
        "active" => Ok(TaskFilter::Active),
        "completed" => Ok(TaskFilter::Completed),
        other => Err(ViewOptionError::UnsupportedFilter(other.to_string())),
    }
}

/// Parses one task sort from a configuration string value.
pub fn parse_task_sort(value: &str) -> Result<TaskSort, ViewOptionError> {
    match value.trim() {
        "" => Err(ViewOptionError::EmptyValue),
        "newest" => Ok(TaskSort::Newest),
        "oldest" => Ok(TaskSort::Oldest),
        "alphabetical" => Ok(TaskSort::Alphabetical),
        other => Err(ViewOptionError::UnsupportedSort(other.to_string())),
    }
}

/// View option parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOptionError {
    EmptyValue,
    UnsupportedFilter(String),
    UnsupportedSort(String),
}

impl Display for ViewOptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue => write!(f, "view option value must not be empty"),
            Self::UnsupportedFilter(value) => write!(f, "task filter is unsupported: {value}"),
            Self::UnsupportedSort(value) => write!(f, "task sort is unsupported: {value}"),
        }
    }
}

impl Error for ViewOptionError {}

/// Projects the raw task set into the visible list: filter, then stable
/// sort.
pub fn project_visible(tasks: &[Task], filter: TaskFilter, sort: TaskSort) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.passes(task))
        .cloned()
        .collect();

    match sort {
        TaskSort::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TaskSort::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        TaskSort::Alphabetical => visible.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }

    visible
}

/// Locale-aware-style title comparison: case folds first, then falls back
/// to exact contents so equal-folding titles still order
/// deterministically.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    match folded {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}
