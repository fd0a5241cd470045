//! Agenda TUI entry point, view ownership and editor hand-off.

use std::io::{self, Stdout};
use std::process::Command;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::agenda::Agenda;
use crate::error::{AgendaError, Result};
use crate::location::Target;
use crate::tui::app::AgendaView;
use crate::tui::enums::ViewAction;
use crate::workspace::Workspace;

type AgendaTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the workspace and at most one open agenda view.
pub struct AgendaController {
    workspace: Workspace,
    view: Option<AgendaView>,
}

impl AgendaController {
    pub fn new(workspace: Workspace) -> Self {
        AgendaController {
            workspace,
            view: None,
        }
    }

    /// Scan the workspace and show the result.
    ///
    /// The view is created on first use; later calls overwrite its content. A failed
    /// scan leaves any open view untouched.
    pub fn show_agenda(&mut self) -> Result<&mut AgendaView> {
        let agenda = Agenda::collect(&self.workspace)?;
        let view = match self.view.take() {
            Some(mut view) => {
                view.set_agenda(agenda);
                view
            }
            None => AgendaView::new(
                agenda,
                self.workspace.root().to_path_buf(),
                self.workspace.config().show_subtasks,
            ),
        };
        Ok(self.view.insert(view))
    }

    /// Called when the host closes the view.
    pub fn view_closed(&mut self) {
        self.view = None;
    }

    #[cfg(test)]
    pub fn view(&self) -> Option<&AgendaView> {
        self.view.as_ref()
    }

    /// Event loop: draw, read a key, act on the view's answer, until the view closes.
    pub fn run(&mut self, terminal: &mut AgendaTerminal) -> Result<()> {
        loop {
            let Some(view) = self.view.as_mut() else {
                return Ok(());
            };
            terminal.draw(|f| view.render(f))?;

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match view.handle_key(key.code, key.modifiers) {
                ViewAction::Continue => {}
                ViewAction::Close => self.view_closed(),
                ViewAction::Refresh => match self.show_agenda() {
                    Ok(view) => {
                        let msg = format!("Rescanned: {} tasks", view.tasks().len());
                        view.set_status_message(msg);
                    }
                    Err(e) => {
                        warn!(error = %e, "rescan failed");
                        if let Some(view) = self.view.as_mut() {
                            view.set_status_message(format!("Rescan failed: {e}"));
                        }
                    }
                },
                ViewAction::Navigate(target) => {
                    let editor = self.workspace.config().editor_command();
                    let outcome = suspended(terminal, || launch_editor(&editor, &target));
                    let msg = match outcome {
                        Ok(()) => format!("Opened {}:{}", target.path.display(), target.editor_line()),
                        Err(e) => e.to_string(),
                    };
                    if let Some(view) = self.view.as_mut() {
                        view.set_status_message(msg);
                    }
                }
            }
        }
    }
}

/// Initialise the terminal, show the agenda and run until the view is closed.
pub fn run_tui(workspace: Workspace) -> Result<()> {
    let mut controller = AgendaController::new(workspace);
    // Scan before touching the terminal so a failed scan leaves it untouched.
    controller.show_agenda()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = controller.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Leave the TUI, run `f`, then restore the TUI.
fn suspended<T>(terminal: &mut AgendaTerminal, f: impl FnOnce() -> Result<T>) -> Result<T> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    let result = f();

    enable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    terminal.clear()?;

    result
}

/// Build the editor invocation for a target: the command's own arguments, then
/// `+<line>` and the path.
///
/// The command is split on whitespace with no shell quoting, so the program path
/// itself cannot contain spaces.
pub fn editor_command(editor: &str, target: &Target) -> Option<Command> {
    let mut parts = editor.split_whitespace();
    let mut command = Command::new(parts.next()?);
    command
        .args(parts)
        .arg(format!("+{}", target.editor_line()))
        .arg(&target.path);
    Some(command)
}

/// Open the editor at the target and wait for it to exit.
pub fn launch_editor(editor: &str, target: &Target) -> Result<()> {
    let mut command = editor_command(editor, target).ok_or_else(|| AgendaError::Editor {
        command: editor.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"),
    })?;

    info!(editor, path = %target.path.display(), line = target.editor_line(), "opening editor");
    let status = command.status().map_err(|source| AgendaError::Editor {
        command: editor.to_string(),
        source,
    })?;
    if !status.success() {
        warn!(editor, %status, "editor exited unsuccessfully");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::config::Config;

    fn controller(dir: &TempDir) -> AgendaController {
        AgendaController::new(Workspace::new(dir.path(), Config::default()).unwrap())
    }

    #[test]
    fn test_show_agenda_reuses_the_open_view() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.md"), "@TODO one\n").unwrap();
        let mut controller = controller(&temp_dir);

        assert!(controller.view().is_none());
        let view = controller.show_agenda().unwrap();
        assert_eq!(view.tasks().len(), 1);
        view.set_status_message("marker".to_string());

        fs::write(temp_dir.path().join("b.md"), "@WAIT two\n").unwrap();
        let view = controller.show_agenda().unwrap();
        assert_eq!(view.tasks().len(), 2);
        assert_eq!(view.status_message(), "marker");
    }

    #[test]
    fn test_closed_view_is_recreated() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.md"), "@TODO one\n").unwrap();
        let mut controller = controller(&temp_dir);

        controller
            .show_agenda()
            .unwrap()
            .set_status_message("marker".to_string());
        controller.view_closed();
        assert!(controller.view().is_none());

        let view = controller.show_agenda().unwrap();
        assert_eq!(view.status_message(), "");
    }

    #[test]
    fn test_failed_rescan_keeps_view() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.md"), "@TODO one\n").unwrap();
        let mut controller = controller(&temp_dir);
        controller.show_agenda().unwrap();

        fs::write(temp_dir.path().join("b.bin"), [0xffu8, 0xfe]).unwrap();
        assert!(controller.show_agenda().is_err());
        assert_eq!(controller.view().map(|v| v.tasks().len()), Some(1));
    }

    #[test]
    fn test_editor_command_arguments() {
        let target = Target {
            path: PathBuf::from("/work/plan.md"),
            line: 4,
        };
        let command = editor_command("code --wait", &target).unwrap();
        assert_eq!(command.get_program(), "code");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["--wait", "+5", "/work/plan.md"]);

        assert!(editor_command("   ", &target).is_none());
    }

    #[test]
    fn test_editor_command_does_not_honor_quotes() {
        let target = Target {
            path: PathBuf::from("/work/plan.md"),
            line: 0,
        };
        let command = editor_command("\"/opt/My Editor/bin/ed\" -n", &target).unwrap();
        assert_eq!(command.get_program(), "\"/opt/My");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["Editor/bin/ed\"", "-n", "+1", "/work/plan.md"]);
    }
}
