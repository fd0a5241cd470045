//! Task data structure and the predicates the scanner uses to find tasks.
//!
//! A task is anchored on a header line carrying a status tag. Its display text is
//! the header with every tag blanked out, and it collects the checkbox lines that
//! follow it as subtasks.

use serde::Serialize;

use crate::fields::*;
use crate::tag::{extract_priority, extract_status, tokenize, TAG_PATTERN};

/// Checkbox markers that make a line a subtask.
pub const SUBTASK_MARKERS: [&str; 3] = ["[ ]", "[-]", "[x]"];

/// A work item found in a workspace file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub status: Status,
    pub priority: Priority,
    pub text: String,
    pub location: String,
    pub subtasks: Vec<String>,
    /// Reserved; nothing populates it yet.
    pub project: String,
}

impl Task {
    /// Build a task from its header line.
    ///
    /// The caller is expected to have checked [`has_task`]; a line without a status
    /// tag yields a task with [`Status::Unset`].
    pub fn new(line: &str, location: impl Into<String>) -> Self {
        let tokens = tokenize(line);
        Task {
            status: extract_status(&tokens),
            priority: extract_priority(&tokens),
            text: TAG_PATTERN.replace_all(line, " ").into_owned(),
            location: location.into(),
            subtasks: Vec::new(),
            project: String::new(),
        }
    }

    /// Composite ranking key under the given policy; lower sorts first.
    pub fn score(&self, policy: RankPolicy) -> usize {
        let priority_index = self.priority.rank_index();
        match policy {
            RankPolicy::StatusThenPriority => self.status.rank_index() * 10 + priority_index,
            RankPolicy::PriorityOnly => priority_index,
        }
    }
}

/// True if `line` carries a recognised status tag.
pub fn has_task(line: &str) -> bool {
    extract_status(&tokenize(line)) != Status::Unset
}

/// True if `line`, once trimmed, starts with a checkbox marker.
pub fn is_subtask(line: &str) -> bool {
    let line = line.trim();
    SUBTASK_MARKERS.iter().any(|marker| line.starts_with(marker))
}
