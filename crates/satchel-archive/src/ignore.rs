use std::path::Path;

/// Returns true if `candidate` should be left out of the archive.
///
/// A path is ignored when it contains `archive_name` (the archive never packs
/// itself) or any entry of `ignore_list`. Both checks are plain substring
/// matches against the whole path, so a short token like `"a"` matches far
/// more than a single file.
pub fn should_ignore<S: AsRef<str>>(archive_name: &str, ignore_list: &[S], candidate: &str) -> bool {
    if candidate.contains(archive_name) {
        return true;
    }

    ignore_list
        .iter()
        .any(|pattern| candidate.contains(pattern.as_ref()))
}

/// The ignore rules for one packing run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    pub archive_name: String,
    pub patterns: Vec<String>,
}

impl IgnoreRules {
    pub fn new<I, S>(archive_name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            archive_name: archive_name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        should_ignore(&self.archive_name, &self.patterns, &path.to_string_lossy())
    }
}
