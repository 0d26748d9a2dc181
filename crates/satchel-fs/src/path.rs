use std::fs;
use std::path::{Path, PathBuf, is_separator};

use satchel_text::random_string;
use tracing::debug;

use crate::{Error, Result};

const OUTPUT_DIR_MODE: u32 = 0o750;
const RANDOM_NAME_LEN: usize = 15;

/// Final component of `path`, ignoring trailing separators.
///
/// An empty path gives `"."` and a path made only of separators gives
/// the separator itself.
pub fn last_part(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return &path[..1];
    }
    trimmed.rsplit(is_separator).next().unwrap_or(trimmed)
}

/// The `n`th separator-delimited part counting from the right, `0` being
/// the last one.
pub fn nth_part_from_end(path: &str, n: usize) -> Option<&str> {
    path.rsplit(is_separator).nth(n)
}

/// Resolve where a file called `file_name` should be written for a
/// user-supplied `output`.
///
/// An `output` whose last component has no `.` is a directory: it is
/// created and the last component of `file_name` is appended, with a random
/// name standing in for an empty `file_name`. Otherwise `output` names the
/// file itself and only its parent is created.
pub fn sanitize_output(output: impl AsRef<Path>, file_name: &str) -> Result<PathBuf> {
    let output = output.as_ref();
    let names_file = output
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains('.'));

    if names_file {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all_with_mode(parent, OUTPUT_DIR_MODE)?;
        }
        return Ok(output.to_path_buf());
    }

    create_dir_all_with_mode(output, OUTPUT_DIR_MODE)?;

    let name = if file_name.is_empty() {
        let name = random_string(RANDOM_NAME_LEN);
        debug!(%name, "no file name given, using a random one");
        name
    } else {
        last_part(file_name).to_string()
    };

    Ok(output.join(name))
}

fn create_dir_all_with_mode(path: &Path, _mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(_mode);
    }
    builder.create(path).map_err(|e| Error::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn last_part_like_basename() {
        assert_eq!(last_part("/var/log/syslog"), "syslog");
        assert_eq!(last_part("docs/"), "docs");
        assert_eq!(last_part("plain"), "plain");
        assert_eq!(last_part(""), ".");
        assert_eq!(last_part("///"), "/");
    }

    #[test]
    fn nth_part_counts_from_the_right() {
        assert_eq!(nth_part_from_end("/home/ana/file.txt", 0), Some("file.txt"));
        assert_eq!(nth_part_from_end("/home/ana/file.txt", 1), Some("ana"));
        assert_eq!(nth_part_from_end("/home/ana/file.txt", 3), Some(""));
        assert_eq!(nth_part_from_end("/home/ana/file.txt", 4), None);
    }

    #[test]
    fn directory_output_gets_file_name_appended() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("downloads/new");

        let resolved = sanitize_output(&output, "/remote/path/report.pdf").unwrap();
        assert_eq!(resolved, output.join("report.pdf"));
        assert!(output.is_dir());
    }

    #[test]
    fn empty_file_name_becomes_random() {
        let dir = tempdir().unwrap();
        let resolved = sanitize_output(dir.path().join("out"), "").unwrap();

        let name = resolved.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), 15);
        assert!(name.chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(resolved.parent().unwrap(), dir.path().join("out"));
    }

    #[test]
    fn file_output_creates_parent_only() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("a/b/archive.zip");

        let resolved = sanitize_output(&output, "ignored.txt").unwrap();
        assert_eq!(resolved, output);
        assert!(dir.path().join("a/b").is_dir());
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn created_directories_are_private_to_group() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let output = dir.path().join("private");
        sanitize_output(&output, "x.bin").unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o007, 0);
    }
}
