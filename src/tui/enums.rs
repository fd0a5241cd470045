//! Enumerations for TUI state management and message dispatch.

use crate::location::Target;

/// Screen currently shown by the agenda view.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Agenda,
    Help,
}

/// Messages the view receives from user interaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ViewMessage {
    /// Navigate to a location reference.
    Open(String),
    /// Re-render with subtasks hidden.
    FilterSubtasks,
    /// Re-render with subtasks shown.
    ShowSubtasks,
}

/// What the view asks its host to do after handling input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ViewAction {
    Continue,
    /// Run "show agenda" again.
    Refresh,
    /// Open the editor at this place.
    Navigate(Target),
    /// The view was closed.
    Close,
}
