use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::Result;

/// Files below `dir` whose path ends with `suffix`.
///
/// Paths that also end with `ignore_suffix` are left out. Results come in
/// walk order with siblings sorted by name.
pub fn find_files_by_suffix(
    dir: impl AsRef<Path>,
    suffix: &str,
    ignore_suffix: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let ignore_suffix = ignore_suffix.filter(|s| !s.is_empty());
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path().to_string_lossy();
        if !path.ends_with(suffix) {
            continue;
        }
        if ignore_suffix.is_some_and(|ignore| path.ends_with(ignore)) {
            continue;
        }
        found.push(entry.into_path());
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::fs;
    use tempfile::tempdir;

    fn tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("conf.d/nested.yaml")).unwrap();
        fs::write(dir.path().join("app.yaml"), "").unwrap();
        fs::write(dir.path().join("conf.d/db.yaml"), "").unwrap();
        fs::write(dir.path().join("conf.d/example.yaml"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        dir
    }

    #[test]
    fn finds_nested_matches_in_order() {
        let dir = tree();
        let found = find_files_by_suffix(dir.path(), ".yaml", None).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("app.yaml"),
                dir.path().join("conf.d/db.yaml"),
                dir.path().join("conf.d/example.yaml"),
            ]
        );
    }

    #[test]
    fn ignore_suffix_filters() {
        let dir = tree();
        let found = find_files_by_suffix(dir.path(), ".yaml", Some("example.yaml")).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| !p.ends_with("example.yaml")));

        let unfiltered = find_files_by_suffix(dir.path(), ".yaml", Some("")).unwrap();
        assert_eq!(unfiltered.len(), 3);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let result = find_files_by_suffix(dir.path().join("nope"), ".rs", None);
        assert!(matches!(result, Err(Error::Walk(_))));
    }
}
