//! Command implementations for the CLI interface.
//!
//! Each handler reports failures on stderr and exits with status 1.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::agenda::Agenda;
use crate::config::{default_export_path, Config};
use crate::error::Result;
use crate::fields::*;
use crate::location;
use crate::render::{agenda_rows, print_table, to_csv, to_html};
use crate::task::Task;
use crate::tui::run::{launch_editor, run_tui};
use crate::workspace::Workspace;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the interactive agenda (the default).
    Ui,

    /// Print the agenda as a plain table.
    List {
        /// Print subtasks under each task.
        #[arg(long)]
        subtasks: bool,
        /// Only tasks with this status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Only tasks with this priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Write the agenda to a file.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Html)]
        format: ExportFormat,
        /// Output path (defaults to agenda.<format>).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Replace subtasks with a placeholder.
        #[arg(long)]
        hide_subtasks: bool,
    },

    /// Open a location reference (`file:///path#L<n>`) in your editor.
    Open {
        location: String,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn error_line(context: &str, e: impl Display) -> String {
    format!("Error: {context}: {e}")
}

/// Print an error and exit.
fn fail(context: &str, e: impl Display) -> ! {
    debug!(context, error = %e, "command failed");
    eprintln!("{}", error_line(context, e));
    std::process::exit(1);
}

fn collect_or_exit(workspace: &Workspace) -> Agenda {
    Agenda::collect(workspace).unwrap_or_else(|e| fail("Scan failed", e))
}

/// Launch the interactive agenda.
pub fn cmd_ui(workspace: Workspace) {
    if let Err(e) = run_tui(workspace) {
        fail("UI error", e);
    }
}

/// Print the agenda, optionally filtered.
pub fn cmd_list(
    workspace: &Workspace,
    subtasks: bool,
    status: Option<Status>,
    priority: Option<Priority>,
    limit: Option<usize>,
) {
    let agenda = collect_or_exit(workspace);
    let mut filtered = filter_tasks(&agenda.tasks, status, priority);

    if let Some(n) = limit {
        filtered.truncate(n);
    }

    if filtered.is_empty() {
        println!("No tasks found.");
        return;
    }

    print_table(&agenda_rows(&filtered, subtasks), workspace.root());
}

fn filter_tasks(tasks: &[Task], status: Option<Status>, priority: Option<Priority>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| priority.map_or(true, |p| t.priority == p))
        .cloned()
        .collect()
}

/// Write the agenda to a file in the chosen format.
pub fn cmd_export(
    workspace: &Workspace,
    format: ExportFormat,
    output: Option<PathBuf>,
    hide_subtasks: bool,
) {
    let agenda = collect_or_exit(workspace);
    let output_path = output.unwrap_or_else(|| default_export_path(format.extension()));

    let write = || -> Result<()> {
        let content = render_export(&agenda, format, !hide_subtasks)?;
        fs::write(&output_path, content)?;
        Ok(())
    };

    match write() {
        Ok(()) => println!(
            "Exported {} tasks to {}",
            agenda.tasks.len(),
            output_path.display()
        ),
        Err(e) => fail("Export failed", e),
    }
}

fn render_export(agenda: &Agenda, format: ExportFormat, show_subtasks: bool) -> Result<String> {
    Ok(match format {
        ExportFormat::Csv => to_csv(&agenda_rows(&agenda.tasks, show_subtasks)),
        ExportFormat::Html => to_html(agenda, show_subtasks),
        ExportFormat::Json => serde_json::to_string_pretty(agenda)?,
    })
}

/// Resolve a location reference and open it in the configured editor.
pub fn cmd_open(config: &Config, reference: &str) {
    let target = location::resolve(reference).unwrap_or_else(|e| fail("Open failed", e));
    println!("Opening {}:{}", target.path.display(), target.editor_line());
    if let Err(e) = launch_editor(&config.editor_command(), &target) {
        fail("Open failed", e);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scan::scan_lines;
    use crate::workspace::FileTasks;

    fn agenda() -> Agenda {
        let files = vec![FileTasks {
            path: PathBuf::from("/work/plan.md"),
            tasks: scan_lines(
                "file:///work/plan.md",
                &["@TODO a @P1", "[ ] sub", "@WAIT b @P1", "@TODO c @P0"],
            ),
        }];
        Agenda::from_files(files, RankPolicy::StatusThenPriority)
    }

    #[test]
    fn test_filter_tasks() {
        let agenda = agenda();
        let todo = filter_tasks(&agenda.tasks, Some(Status::Todo), None);
        let texts: Vec<&str> = todo.iter().map(|t| t.text.trim()).collect();
        assert_eq!(texts, vec!["c", "a"]);

        let p1 = filter_tasks(&agenda.tasks, None, Some(Priority::P1));
        assert_eq!(p1.len(), 2);
        assert_eq!(filter_tasks(&agenda.tasks, Some(Status::Done), None).len(), 0);
        assert_eq!(filter_tasks(&agenda.tasks, None, None).len(), 3);
    }

    #[test]
    fn test_render_export_json() {
        let json = render_export(&agenda(), ExportFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files_scanned"], 1);
        assert_eq!(value["rank"], "status-then-priority");
        assert_eq!(value["tasks"][0]["status"], "todo");
        assert_eq!(value["tasks"][0]["priority"], "p0");
        assert_eq!(value["tasks"][1]["subtasks"][0], "[ ] sub");
        assert_eq!(value["tasks"][1]["project"], "");
    }

    #[test]
    fn test_render_export_csv_hidden() {
        let csv = render_export(&agenda(), ExportFormat::Csv, false).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.lines().skip(1).all(|line| line.ends_with(",hidden")));
    }

    #[test]
    fn test_error_line() {
        let err = crate::error::AgendaError::Decode {
            path: PathBuf::from("/work/b.bin"),
        };
        assert_eq!(
            error_line("Scan failed", err),
            "Error: Scan failed: /work/b.bin is not valid UTF-8 text"
        );
    }

    #[test]
    fn test_cli_parses_global_flags() {
        use clap::Parser;
        use crate::cli::Cli;

        let cli = Cli::try_parse_from([
            "agenda", "list", "--status", "wait", "--rank", "priority-only", "--root", "/tmp",
        ])
        .unwrap();
        assert_eq!(cli.rank, Some(RankPolicy::PriorityOnly));
        assert_eq!(cli.root, PathBuf::from("/tmp"));
        assert!(matches!(
            cli.command,
            Some(Commands::List { status: Some(Status::Wait), .. })
        ));

        let cli = Cli::try_parse_from(["agenda"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }
}
