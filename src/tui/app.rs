//! The agenda view.
//!
//! This module contains the `AgendaView` struct which holds the rendered agenda,
//! maps keys to view messages, dispatches those messages and draws the table,
//! help screen and status bar.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::agenda::Agenda;
use crate::location::{self, Target};
use crate::render::{agenda_rows, COLUMNS};
use crate::task::Task;
use crate::tui::colors::{status_color, BAR};
use crate::tui::enums::{AppState, ViewAction, ViewMessage};

/// State of the interactive agenda view.
pub struct AgendaView {
    state: AppState,
    agenda: Agenda,
    root: PathBuf,
    show_subtasks: bool,
    table_state: TableState,
    status_message: String,
}

impl AgendaView {
    pub fn new(agenda: Agenda, root: PathBuf, show_subtasks: bool) -> Self {
        let mut view = AgendaView {
            state: AppState::Agenda,
            agenda,
            root,
            show_subtasks,
            table_state: TableState::default(),
            status_message: String::new(),
        };
        view.clamp_selection();
        view
    }

    /// Replace the displayed agenda, keeping the selected row where possible.
    pub fn set_agenda(&mut self, agenda: Agenda) {
        self.agenda = agenda;
        self.clamp_selection();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.agenda.tasks
    }

    pub fn show_subtasks(&self) -> bool {
        self.show_subtasks
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn clamp_selection(&mut self) {
        let len = self.agenda.tasks.len();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    fn selected_task(&self) -> Option<&Task> {
        self.table_state
            .selected()
            .and_then(|idx| self.agenda.tasks.get(idx))
    }

    /// Handle one inbound message. `Open` yields the place to navigate to.
    pub fn dispatch(&mut self, message: ViewMessage) -> Option<Target> {
        match message {
            ViewMessage::Open(reference) => match location::resolve(&reference) {
                Ok(target) => Some(target),
                Err(e) => {
                    self.set_status_message(e.to_string());
                    None
                }
            },
            ViewMessage::FilterSubtasks => {
                self.show_subtasks = false;
                None
            }
            ViewMessage::ShowSubtasks => {
                self.show_subtasks = true;
                None
            }
        }
    }

    /// Handle a key press and tell the host what to do next.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> ViewAction {
        self.clear_status_message();

        if self.state == AppState::Help {
            self.state = AppState::Agenda;
            return ViewAction::Continue;
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => ViewAction::Close,
            KeyCode::Char('q') | KeyCode::Esc => ViewAction::Close,
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                ViewAction::Continue
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                ViewAction::Continue
            }
            KeyCode::PageDown => {
                self.move_selection(10);
                ViewAction::Continue
            }
            KeyCode::PageUp => {
                self.move_selection(-10);
                ViewAction::Continue
            }
            KeyCode::Home | KeyCode::Char('g') => {
                if !self.agenda.tasks.is_empty() {
                    self.table_state.select(Some(0));
                }
                ViewAction::Continue
            }
            KeyCode::End | KeyCode::Char('G') => {
                if !self.agenda.tasks.is_empty() {
                    self.table_state.select(Some(self.agenda.tasks.len() - 1));
                }
                ViewAction::Continue
            }
            KeyCode::Enter => {
                let Some(reference) = self.selected_task().map(|t| t.location.clone()) else {
                    self.set_status_message("No task selected".to_string());
                    return ViewAction::Continue;
                };
                match self.dispatch(ViewMessage::Open(reference)) {
                    Some(target) => ViewAction::Navigate(target),
                    None => ViewAction::Continue,
                }
            }
            KeyCode::Char('s') => {
                self.dispatch(ViewMessage::ShowSubtasks);
                ViewAction::Continue
            }
            KeyCode::Char('f') => {
                self.dispatch(ViewMessage::FilterSubtasks);
                ViewAction::Continue
            }
            KeyCode::Tab => {
                let message = if self.show_subtasks {
                    ViewMessage::FilterSubtasks
                } else {
                    ViewMessage::ShowSubtasks
                };
                self.dispatch(message);
                ViewAction::Continue
            }
            KeyCode::Char('r') => ViewAction::Refresh,
            KeyCode::Char('h') | KeyCode::F(1) => {
                self.state = AppState::Help;
                ViewAction::Continue
            }
            _ => ViewAction::Continue,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.agenda.tasks.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Render the header line with workspace and scan details.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let summary = format!(
            "{}  |  {} tasks from {} files  |  scanned {}  |  subtasks {}",
            self.root.display(),
            self.agenda.tasks.len(),
            self.agenda.files_scanned,
            self.agenda.scanned_at.format("%H:%M:%S"),
            if self.show_subtasks { "shown" } else { "hidden" }
        );
        let header_text = vec![Line::from(vec![
            Span::styled("AGENDA", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                summary,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    /// Render the agenda table.
    fn render_agenda(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        self.render_header(f, chunks[0]);

        let header_cells = COLUMNS
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(BAR).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = agenda_rows(&self.agenda.tasks, self.show_subtasks)
            .into_iter()
            .zip(&self.agenda.tasks)
            .map(|(row, task)| {
                let height = row.subtasks.height() as u16;
                Row::new(vec![
                    Cell::from(row.link_label(&self.root)),
                    Cell::from(row.status),
                    Cell::from(row.priority),
                    Cell::from(if row.project.is_empty() { "-".to_string() } else { row.project.clone() }),
                    Cell::from(row.text.trim().to_string()),
                    Cell::from(row.subtasks.joined("\n")),
                ])
                .height(height)
                .style(Style::default().fg(status_color(task.status)))
            })
            .collect();

        let widths = [
            Constraint::Length(28), // Link
            Constraint::Length(7),  // Status
            Constraint::Length(9),  // Priority
            Constraint::Length(8),  // Project
            Constraint::Min(25),    // Task
            Constraint::Min(20),    // Subtasks
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}) - Press 'h' for help",
                self.agenda.tasks.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.table_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "Agenda Help",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("  Up/k, Down/j   Move selection"),
            Line::from("  PgUp, PgDn     Move ten rows"),
            Line::from("  Home/g, End/G  First / last task"),
            Line::from("  Enter          Open the task in your editor"),
            Line::from("  s              Show subtasks"),
            Line::from("  f              Hide subtasks"),
            Line::from("  Tab            Toggle subtasks"),
            Line::from("  r              Rescan the workspace"),
            Line::from("  h/F1           Show this help"),
            Line::from("  q/Ctrl+C/Esc   Quit"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Annotations:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  @TODO @WAIT @DONE   Status (a line needs one to become a task)"),
            Line::from("  @P0 @P1 @P2         Priority"),
            Line::from("  [ ] [-] [x]         Subtask lines following a task"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Agenda => match self.selected_task() {
                    Some(task) => format!(
                        "{} | Enter to open | 'h' for help",
                        location::display_label(&task.location, &self.root)
                    ),
                    None => "No tasks found | 'r' to rescan | 'h' for help".to_string(),
                },
                AppState::Help => "Help".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(BAR).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the current screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.state {
            AppState::Agenda => self.render_agenda(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
        }

        self.render_status_bar(f, chunks[1]);
    }
}
