/// Replace every `\\`, `\` and `/` in `path` with `separator`, then drop one
/// trailing separator if present.
pub fn normalize_separators(path: &str, separator: &str) -> String {
    let mut normalized = path
        .replace("\\\\", separator)
        .replace('\\', separator)
        .replace('/', separator);

    if !separator.is_empty() && normalized.ends_with(separator) {
        normalized.truncate(normalized.len() - separator.len());
    }

    normalized
}

/// Remove every `..` immediately followed by `separator`.
///
/// Matching is on the raw text, not on path components, so `a../b` becomes
/// `ab`. Removal repeats until no occurrence is left: a single pass over
/// `..././` would otherwise leave a fresh `../` behind.
pub fn strip_traversal(path: &str, separator: &str) -> String {
    let pattern = format!("..{separator}");
    let mut stripped = path.to_string();
    while stripped.contains(&pattern) {
        stripped = stripped.replace(&pattern, "");
    }
    stripped
}

/// Build a zip entry name from an arbitrary filesystem path.
///
/// Separators become `/`, traversal sequences are stripped, and the result
/// is made relative: drive prefixes, root and `.`/`..`/empty segments are
/// dropped.
pub fn sanitize_entry_name(path: &str) -> String {
    let normalized = normalize_separators(path, "/");
    let stripped = strip_traversal(&normalized, "/");

    let without_drive = match stripped.as_bytes() {
        [letter, b':', ..] if letter.is_ascii_alphabetic() => &stripped[2..],
        _ => stripped.as_str(),
    };

    without_drive
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_mixed_separators() {
        assert_eq!(normalize_separators("a\\\\b\\c/d", "/"), "a/b/c/d");
        assert_eq!(normalize_separators("a/b/c", "\\"), "a\\b\\c");
    }

    #[test]
    fn normalize_strips_single_trailing_separator() {
        assert_eq!(normalize_separators("dir/", "/"), "dir");
        assert_eq!(normalize_separators("dir//", "/"), "dir/");
        assert_eq!(normalize_separators("", "/"), "");
    }

    #[test]
    fn strip_traversal_removes_parent_segments() {
        assert_eq!(strip_traversal("../../etc/passwd", "/"), "etc/passwd");
        assert_eq!(strip_traversal("a/../b", "/"), "a/b");
        assert_eq!(strip_traversal("..\\x", "\\"), "x");
    }

    #[test]
    fn strip_traversal_is_textual() {
        assert_eq!(strip_traversal("a../b", "/"), "ab");
        assert_eq!(strip_traversal("..", "/"), "..");
    }

    #[test]
    fn strip_traversal_handles_regenerated_sequences() {
        // one pass turns "..././" into "../"
        assert_eq!(strip_traversal("..././", "/"), "");
    }

    #[test]
    fn entry_name_is_relative() {
        assert_eq!(sanitize_entry_name("/home/user/file.txt"), "home/user/file.txt");
        assert_eq!(sanitize_entry_name("./src/lib.rs"), "src/lib.rs");
        assert_eq!(sanitize_entry_name("C:\\Users\\me\\notes.md"), "Users/me/notes.md");
        assert_eq!(sanitize_entry_name("../../secret"), "secret");
        assert_eq!(sanitize_entry_name("dir/.."), "dir");
    }

    proptest! {
        #[test]
        fn strip_traversal_is_idempotent(path in "[./\\\\a-z]{0,24}") {
            let once = strip_traversal(&path, "/");
            prop_assert_eq!(strip_traversal(&once, "/"), once.clone());
            prop_assert!(!once.contains("../"));
        }

        #[test]
        fn entry_name_has_no_traversal(path in "[./\\\\a-z:]{0,24}") {
            let name = sanitize_entry_name(&path);
            prop_assert!(!name.starts_with('/'));
            prop_assert!(name.split('/').all(|segment| segment != ".."));
        }
    }
}
