//! Error type shared by the scanner, config loader and interactive view.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building or navigating an agenda.
#[derive(Debug, Error)]
pub enum AgendaError {
    #[error("failed to walk workspace: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    Decode { path: PathBuf },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid location reference '{0}'")]
    Location(String),

    #[error("failed to launch editor '{command}': {source}")]
    Editor {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize agenda: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AgendaError {
    /// True for failures that concern a single discovered file rather than the whole scan.
    ///
    /// Unreadable directories met during the walk are handled by discovery itself.
    pub fn is_file_failure(&self) -> bool {
        matches!(self, AgendaError::Read { .. } | AgendaError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;
