//! Per-file task scanner.

use crate::location;
use crate::task::{has_task, is_subtask, Task};

/// Find the tasks in one file's lines, in the order their header lines appear.
///
/// After a header, following checkbox lines become its subtasks. Blank lines
/// between them are skipped; the first other non-blank line ends the run.
pub fn scan_lines<S: AsRef<str>>(file_identity: &str, lines: &[S]) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_ref();
        if has_task(line) {
            let mut task = Task::new(line, location::encode(file_identity, i));

            while let Some(next) = lines.get(i + 1).map(|l| l.as_ref()) {
                if is_subtask(next) {
                    task.subtasks.push(next.to_string());
                } else if !next.trim().is_empty() {
                    break;
                }
                i += 1;
            }

            tasks.push(task);
        }
        i += 1;
    }

    tasks
}

/// Split file content into lines on `\n` only; carriage returns stay in place.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split('\n').collect()
}
