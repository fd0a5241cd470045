//! Aggregation of per-file task lists into one ranked agenda.

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::fields::RankPolicy;
use crate::task::Task;
use crate::workspace::{FileTasks, Workspace};

/// The ranked tasks of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct Agenda {
    pub scanned_at: DateTime<Local>,
    pub files_scanned: usize,
    pub rank: RankPolicy,
    pub tasks: Vec<Task>,
}

impl Agenda {
    /// Concatenate per-file task lists in the given order and rank the result.
    pub fn from_files(files: Vec<FileTasks>, rank: RankPolicy) -> Self {
        let files_scanned = files.len();
        let mut tasks = Vec::new();
        for file in files {
            debug!(path = %file.path.display(), tasks = file.tasks.len(), "scanned file");
            tasks.extend(file.tasks);
        }
        sort_tasks(&mut tasks, rank);

        Agenda {
            scanned_at: Local::now(),
            files_scanned,
            rank,
            tasks,
        }
    }

    /// Scan the whole workspace and build its agenda.
    pub fn collect(workspace: &Workspace) -> Result<Self> {
        let files = workspace.scan()?;
        let agenda = Agenda::from_files(files, workspace.config().rank);
        info!(
            files = agenda.files_scanned,
            tasks = agenda.tasks.len(),
            root = %workspace.root().display(),
            "agenda collected"
        );
        Ok(agenda)
    }
}

/// Stable sort by ascending score; tasks with equal scores keep their input order.
pub fn sort_tasks(tasks: &mut [Task], rank: RankPolicy) {
    tasks.sort_by_key(|task| task.score(rank));
}
