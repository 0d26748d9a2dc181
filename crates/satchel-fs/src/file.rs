use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

pub fn exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).is_ok()
}

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// File content, or an empty string when it can't be read.
pub fn read_to_string_or_empty(path: impl AsRef<Path>) -> String {
    read_to_string(path).unwrap_or_else(|e| {
        debug!(error = %e, "falling back to empty content");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn exists_for_files_and_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        assert!(exists(dir.path()));
        assert!(exists(&file));
        assert!(!exists(dir.path().join("missing")));
    }

    #[test]
    fn read_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let err = read_to_string(&missing).unwrap_err();
        assert!(matches!(err, Error::Read { ref path, .. } if path == &missing));
        assert_eq!(read_to_string_or_empty(&missing), "");
    }

    #[test]
    fn read_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.md");
        fs::write(&file, "line one\nline two\n").unwrap();

        assert_eq!(read_to_string(&file).unwrap(), "line one\nline two\n");
        assert_eq!(read_to_string_or_empty(&file), "line one\nline two\n");
    }
}
