//! Location references linking a task back to its header line.
//!
//! A reference has the form `<file-identity>#L<n>`, where the identity is the
//! file's `file://` URL and `n` is the zero-based index of the header line.
//! Resolving a reference targets line `n - 1`. The encoder and resolver are kept
//! together so the offset stays consistent between them.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{AgendaError, Result};

const LINE_FRAGMENT_PREFIX: &str = "L";

/// A place in a file to navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    /// Zero-based line index.
    pub line: usize,
}

impl Target {
    /// One-based line number, as editors expect on the command line.
    pub fn editor_line(&self) -> usize {
        self.line + 1
    }
}

/// Identity string for a file: its `file://` URL, or the plain path if it is not absolute.
pub fn file_identity(path: &Path) -> String {
    match Url::from_file_path(path) {
        Ok(url) => url.to_string(),
        Err(()) => path.display().to_string(),
    }
}

/// Encode a reference to line `index` of the file with the given identity.
pub fn encode(file_identity: &str, index: usize) -> String {
    format!("{file_identity}#{LINE_FRAGMENT_PREFIX}{index}")
}

/// Resolve a reference into the file and line it navigates to.
pub fn resolve(location: &str) -> Result<Target> {
    let invalid = || AgendaError::Location(location.to_string());

    let url = Url::parse(location).map_err(|_| invalid())?;
    let number: usize = url
        .fragment()
        .and_then(|fragment| fragment.strip_prefix(LINE_FRAGMENT_PREFIX))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(invalid)?;
    let path = url.to_file_path().map_err(|()| invalid())?;

    Ok(Target {
        path,
        line: number.saturating_sub(1),
    })
}

/// Short label for a reference: the path relative to `root` plus the line fragment.
pub fn display_label(location: &str, root: &Path) -> String {
    let Ok(url) = Url::parse(location) else {
        return location.to_string();
    };
    let fragment = url.fragment().unwrap_or_default().to_string();
    match url.to_file_path() {
        Ok(path) => {
            let shown = path.strip_prefix(root).unwrap_or(&path);
            format!("{}#{}", shown.display(), fragment)
        }
        Err(()) => location.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_encode_uses_file_url() {
        let identity = file_identity(Path::new("/work/notes/todo list.md"));
        assert_eq!(identity, "file:///work/notes/todo%20list.md");
        assert_eq!(encode(&identity, 7), "file:///work/notes/todo%20list.md#L7");
    }

    #[test]
    fn test_relative_path_identity_is_plain() {
        assert_eq!(file_identity(Path::new("notes.md")), "notes.md");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_subtracts_one() {
        let target = resolve("file:///work/notes/todo%20list.md#L5").unwrap();
        assert_eq!(target.path, PathBuf::from("/work/notes/todo list.md"));
        assert_eq!(target.line, 4);
        assert_eq!(target.editor_line(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_line_zero_saturates() {
        let target = resolve("file:///a.md#L0").unwrap();
        assert_eq!(target.line, 0);
    }

    #[test]
    fn test_resolve_rejects_malformed() {
        for bad in ["not a url", "file:///a.md", "file:///a.md#5", "file:///a.md#Lx", "https://example.com/a.md#L3"] {
            assert!(
                matches!(resolve(bad), Err(AgendaError::Location(_))),
                "expected failure for {bad}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_display_label_is_relative() {
        let location = encode(&file_identity(Path::new("/work/src/main.rs")), 12);
        assert_eq!(display_label(&location, Path::new("/work")), "src/main.rs#L12");
        assert_eq!(display_label(&location, Path::new("/elsewhere")), "/work/src/main.rs#L12");
    }
}
