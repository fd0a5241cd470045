//! Agenda formatting: table rows, plain listing, CSV and HTML.
//!
//! Everything here is a pure function of the task list and the show-subtasks flag.

use std::fmt::Write as _;
use std::path::Path;

use crate::agenda::Agenda;
use crate::fields::*;
use crate::location::display_label;
use crate::task::Task;

/// Text shown in place of subtasks when they are hidden.
pub const SUBTASKS_HIDDEN: &str = "hidden";

/// Column titles shared by every output format.
pub const COLUMNS: [&str; 6] = ["Link", "Status", "Priority", "Project", "Task", "Subtasks"];

/// Subtasks column of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtaskCell {
    Hidden,
    Shown(Vec<String>),
}

impl SubtaskCell {
    /// The placeholder, or the subtask lines joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            SubtaskCell::Hidden => SUBTASKS_HIDDEN.to_string(),
            SubtaskCell::Shown(lines) => lines.join(separator),
        }
    }

    /// Number of display lines the cell needs.
    pub fn height(&self) -> usize {
        match self {
            SubtaskCell::Hidden => 1,
            SubtaskCell::Shown(lines) => lines.len().max(1),
        }
    }
}

/// One formatted agenda row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRow {
    pub location: String,
    pub status: &'static str,
    pub priority: &'static str,
    pub project: String,
    pub text: String,
    pub subtasks: SubtaskCell,
}

impl AgendaRow {
    /// Short form of the location for display, relative to `root` when possible.
    pub fn link_label(&self, root: &Path) -> String {
        display_label(&self.location, root)
    }
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    s.tag().unwrap_or("--")
}

/// Format a task priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    p.tag().unwrap_or("--")
}

/// Build one row per task, in task order.
pub fn agenda_rows(tasks: &[Task], show_subtasks: bool) -> Vec<AgendaRow> {
    tasks
        .iter()
        .map(|task| AgendaRow {
            location: task.location.clone(),
            status: format_status(task.status),
            priority: format_priority(task.priority),
            project: task.project.clone(),
            text: clean(&task.text),
            subtasks: if show_subtasks {
                SubtaskCell::Shown(task.subtasks.iter().map(|s| clean(s)).collect())
            } else {
                SubtaskCell::Hidden
            },
        })
        .collect()
}

fn clean(line: &str) -> String {
    line.trim_end_matches('\r').to_string()
}

/// Print rows as a plain table, with shown subtasks indented underneath each row.
pub fn print_table(rows: &[AgendaRow], root: &Path) {
    print!("{}", format_table(rows, root));
}

/// The plain table [`print_table`] writes.
pub fn format_table(rows: &[AgendaRow], root: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<4} {:<8} {:<30} {}",
        COLUMNS[1], "Pri", COLUMNS[3], COLUMNS[0], COLUMNS[4]
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<6} {:<4} {:<8} {:<30} {}",
            row.status,
            row.priority,
            if row.project.is_empty() { "-" } else { row.project.as_str() },
            row.link_label(root),
            row.text.trim()
        );
        if let SubtaskCell::Shown(lines) = &row.subtasks {
            for line in lines {
                let _ = writeln!(out, "{:>8}{}", "", line.trim());
            }
        }
    }
    out
}

/// Render rows as CSV with a header line.
pub fn to_csv(rows: &[AgendaRow]) -> String {
    // Escape CSV fields that contain commas, quotes or newlines
    let escape_csv = |s: &str| {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    };

    let mut csv = COLUMNS.join(",");
    csv.push('\n');
    for row in rows {
        let fields = [
            escape_csv(&row.location),
            escape_csv(row.status),
            escape_csv(row.priority),
            escape_csv(&row.project),
            escape_csv(row.text.trim()),
            escape_csv(&row.subtasks.joined("\n")),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the agenda as a standalone HTML page with one table row per task.
pub fn to_html(agenda: &Agenda, show_subtasks: bool) -> String {
    const CELL: &str = "style=\"border: 1px solid gray;\"";

    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"UTF-8\">");
    let _ = writeln!(html, "<title>Agenda</title>");
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(
        html,
        "<p>{} tasks from {} files, scanned {}</p>",
        agenda.tasks.len(),
        agenda.files_scanned,
        agenda.scanned_at.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(html, "<table style=\"border: 1px solid gray; border-collapse: collapse;\">");

    let _ = write!(html, "<tr {CELL}>");
    for column in COLUMNS {
        let _ = write!(html, "<th {CELL}>{column}</th>");
    }
    let _ = writeln!(html, "</tr>");

    for row in agenda_rows(&agenda.tasks, show_subtasks) {
        let subtasks = match &row.subtasks {
            SubtaskCell::Hidden => SUBTASKS_HIDDEN.to_string(),
            SubtaskCell::Shown(lines) => lines
                .iter()
                .map(|line| escape_html(line))
                .collect::<Vec<_>>()
                .join("<br>"),
        };
        let _ = writeln!(
            html,
            "<tr {CELL}><td {CELL}><a href=\"{}\">link</a></td><td {CELL}>{}</td><td {CELL}>{}</td><td {CELL}>{}</td><td {CELL}>{}</td><td {CELL}>{}</td></tr>",
            escape_html(&row.location),
            row.status,
            row.priority,
            escape_html(&row.project),
            escape_html(&row.text),
            subtasks
        );
    }

    let _ = writeln!(html, "</table>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}
