//! Workspace file discovery and loading.
//!
//! Files are found with a sorted directory walk and read one at a time; each file
//! is fully loaded and scanned before the next one is opened.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::{AgendaError, Result};
use crate::location::file_identity;
use crate::scan::{scan_lines, split_lines};
use crate::task::Task;

/// A workspace rooted at a directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

/// Tasks found in one file.
#[derive(Debug, Clone)]
pub struct FileTasks {
    pub path: PathBuf,
    pub tasks: Vec<Task>,
}

impl Workspace {
    /// Create a workspace. The root is canonicalized so file identities are absolute URLs.
    pub fn new(root: &Path, config: Config) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|source| AgendaError::Read {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Workspace { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All candidate files, in walk order.
    ///
    /// A candidate is a regular file whose name contains a `.` and whose path has no
    /// excluded component below the root. Entries the walk cannot read abort
    /// discovery unless `skip_unreadable` is set.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.skip_entry(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if self.config.skip_unreadable && e.io_error().is_some() => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!(path = %path, error = %e, "skipping unreadable directory entry");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if entry.file_type().is_file() && entry.file_name().to_string_lossy().contains('.') {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn skip_entry(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0 && self.config.is_excluded(&entry.file_name().to_string_lossy())
    }

    /// Scan every discovered file, in discovery order.
    ///
    /// The first unreadable file aborts the scan unless `skip_unreadable` is set, in
    /// which case it is logged and left out.
    pub fn scan(&self) -> Result<Vec<FileTasks>> {
        let mut results = Vec::new();

        for path in self.discover()? {
            match scan_file(&path) {
                Ok(tasks) => results.push(FileTasks { path, tasks }),
                Err(e) if self.config.skip_unreadable && e.is_file_failure() => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }
}

/// Read one file and scan its lines.
pub fn scan_file(path: &Path) -> Result<Vec<Task>> {
    let bytes = fs::read(path).map_err(|source| AgendaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| AgendaError::Decode {
        path: path.to_path_buf(),
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    Ok(scan_lines(&file_identity(path), &split_lines(content)))
}
