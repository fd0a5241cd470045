//! Optional TOML configuration.
//!
//! Looked up at `--config <FILE>` or `<root>/.agenda.toml`. Every key is optional,
//! and command-line flags override whatever the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AgendaError, Result};
use crate::fields::RankPolicy;

/// Name of the config file looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = ".agenda.toml";

/// Directory and file names skipped during discovery unless overridden.
pub const DEFAULT_EXCLUDES: [&str; 6] = [".git", ".hg", ".svn", "CVS", "node_modules", "target"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path component names to skip while walking the workspace.
    pub exclude: Vec<String>,
    /// Log and skip files that cannot be read instead of aborting the scan.
    pub skip_unreadable: bool,
    pub rank: RankPolicy,
    /// Editor command used to open task locations, e.g. `"code --wait"`.
    ///
    /// Split on whitespace without shell quoting; put editors whose path contains
    /// spaces on `PATH` or behind a wrapper script.
    pub editor: Option<String>,
    /// Whether the interactive view starts with subtasks shown.
    pub show_subtasks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            skip_unreadable: false,
            rank: RankPolicy::default(),
            editor: None,
            show_subtasks: true,
        }
    }
}

impl Config {
    /// Load the config from an explicit path, or from the workspace root if present.
    ///
    /// An explicit path must exist; a missing file in the root means defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    return Ok(Config::default());
                }
                candidate
            }
        };
        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AgendaError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| AgendaError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Editor command: the configured one, then `$VISUAL`, then `$EDITOR`, then `vi`.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Apply command-line flags on top of the file values.
    ///
    /// `--skip-unreadable` can only turn skipping on; it never clears a file setting.
    pub fn apply_overrides(&mut self, rank: Option<RankPolicy>, skip_unreadable: bool) {
        if let Some(rank) = rank {
            self.rank = rank;
        }
        if skip_unreadable {
            self.skip_unreadable = true;
        }
    }

    /// True if a directory or file with this name is skipped during discovery.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

/// Default output path for an export, relative to the current directory.
pub fn default_export_path(extension: &str) -> PathBuf {
    PathBuf::from(format!("agenda.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(None, temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.show_subtasks);
        assert!(!config.skip_unreadable);
        assert_eq!(config.rank, RankPolicy::StatusThenPriority);
    }

    #[test]
    fn test_root_config_overrides_some_keys() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "rank = \"priority-only\"\nskip_unreadable = true\nexclude = [\"build\"]\n",
        )
        .unwrap();

        let config = Config::load(None, temp_dir.path()).unwrap();
        assert_eq!(config.rank, RankPolicy::PriorityOnly);
        assert!(config.skip_unreadable);
        assert_eq!(config.exclude, vec!["build".to_string()]);
        assert!(config.show_subtasks);
        assert_eq!(config.editor, None);
    }

    #[test]
    fn test_cli_flags_override_file_values() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "rank = \"priority-only\"\nskip_unreadable = false\n",
        )
        .unwrap();

        let mut config = Config::load(None, temp_dir.path()).unwrap();
        config.apply_overrides(Some(RankPolicy::StatusThenPriority), true);
        assert_eq!(config.rank, RankPolicy::StatusThenPriority);
        assert!(config.skip_unreadable);
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let mut config = Config::parse(
            "rank = \"priority-only\"\nskip_unreadable = true\n",
            Path::new("x.toml"),
        )
        .unwrap();
        config.apply_overrides(None, false);
        assert_eq!(config.rank, RankPolicy::PriorityOnly);
        assert!(config.skip_unreadable);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), temp_dir.path()).unwrap_err();
        assert!(matches!(err, AgendaError::Config { .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::parse("colour = \"red\"", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, AgendaError::Config { .. }));
        let err = Config::parse("rank = \"alphabetical\"", Path::new("x.toml")).unwrap_err();
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn test_is_excluded() {
        let config = Config::default();
        assert!(config.is_excluded(".git"));
        assert!(config.is_excluded("node_modules"));
        assert!(!config.is_excluded("targets"));
        assert!(!config.is_excluded("Target"));
    }

    #[test]
    fn test_configured_editor_wins() {
        let config = Config {
            editor: Some("hx".to_string()),
            ..Config::default()
        };
        assert_eq!(config.editor_command(), "hx");
    }
}
