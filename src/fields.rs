//! Enumerations for task annotations and ranking.
//!
//! Status and priority are closed sets identified by fixed literal tags. Each
//! carries two separate orderings: the order tags are *detected* in when several
//! appear on one line, and the order tasks are *ranked* in the agenda.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task status derived from the `@TODO`, `@WAIT` and `@DONE` tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    Wait,
    Done,
    /// No status tag on the line.
    #[serde(rename = "none")]
    #[value(name = "none")]
    Unset,
}

impl Status {
    /// First match wins when several status tags share a line.
    pub const DETECTION_ORDER: [Status; 3] = [Status::Todo, Status::Done, Status::Wait];

    /// Position in this list is the status component of a task's score.
    pub const RANK_ORDER: [Status; 4] = [Status::Todo, Status::Wait, Status::Done, Status::Unset];

    /// The literal tag that marks this status, if any.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Status::Todo => Some("@TODO"),
            Status::Wait => Some("@WAIT"),
            Status::Done => Some("@DONE"),
            Status::Unset => None,
        }
    }

    pub fn rank_index(self) -> usize {
        Self::RANK_ORDER
            .iter()
            .position(|s| *s == self)
            .unwrap_or(Self::RANK_ORDER.len())
    }
}

/// Task priority derived from the `@P0`, `@P1` and `@P2` tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    P0,
    P1,
    P2,
    /// No priority tag on the line.
    #[serde(rename = "none")]
    #[value(name = "none")]
    Unset,
}

impl Priority {
    pub const DETECTION_ORDER: [Priority; 3] = [Priority::P0, Priority::P1, Priority::P2];

    pub const RANK_ORDER: [Priority; 4] =
        [Priority::P0, Priority::P1, Priority::P2, Priority::Unset];

    /// The literal tag that marks this priority, if any.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Priority::P0 => Some("@P0"),
            Priority::P1 => Some("@P1"),
            Priority::P2 => Some("@P2"),
            Priority::Unset => None,
        }
    }

    pub fn rank_index(self) -> usize {
        Self::RANK_ORDER
            .iter()
            .position(|p| *p == self)
            .unwrap_or(Self::RANK_ORDER.len())
    }
}

/// How the agenda orders tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RankPolicy {
    /// Status first, then priority.
    #[default]
    StatusThenPriority,
    /// Priority only; status has no effect on ordering.
    PriorityOnly,
}

/// File formats for `agenda export`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Html,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_and_rank_orders_differ_for_status() {
        assert_eq!(Status::DETECTION_ORDER[1], Status::Done);
        assert_eq!(Status::RANK_ORDER[1], Status::Wait);
    }

    #[test]
    fn test_rank_index() {
        assert_eq!(Status::Todo.rank_index(), 0);
        assert_eq!(Status::Wait.rank_index(), 1);
        assert_eq!(Status::Done.rank_index(), 2);
        assert_eq!(Status::Unset.rank_index(), 3);
        assert_eq!(Priority::P0.rank_index(), 0);
        assert_eq!(Priority::Unset.rank_index(), 3);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Status::Unset).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"todo\"");
        assert_eq!(serde_json::to_string(&Priority::P1).unwrap(), "\"p1\"");
        let policy: RankPolicy = serde_json::from_str("\"priority-only\"").unwrap();
        assert_eq!(policy, RankPolicy::PriorityOnly);
    }
}
