/// One stored file or directory record inside an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Sanitized, `/`-separated name. Directories end with `/`.
    pub name: String,
    pub size: u64,
    pub mode: Option<u32>,
    pub kind: EntryKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>, size: u64, mode: Option<u32>) -> Self {
        Self {
            name: name.into(),
            size,
            mode,
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>, mode: Option<u32>) -> Self {
        let mut name = name.into();
        if !name.ends_with('/') {
            name.push('/');
        }
        Self {
            name,
            size: 0,
            mode,
            kind: EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Any of the owner, group or other execute bits is stored.
    pub fn is_executable(&self) -> bool {
        self.mode.is_some_and(|m| m & 0o111 != 0)
    }
}

/// Summary of one `unpack` call.
#[derive(Clone, Debug, Default)]
pub struct UnpackReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ArchiveEntry>,
}

impl UnpackReport {
    pub(crate) fn record(&mut self, entry: ArchiveEntry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_fields() {
        let entry = ArchiveEntry::file("bin/tool", 1024, Some(0o755));
        assert_eq!(entry.name, "bin/tool");
        assert_eq!(entry.size, 1024);
        assert_eq!(entry.mode, Some(0o755));
        assert!(entry.is_file());
        assert!(!entry.is_directory());
    }

    #[test]
    fn directory_gets_trailing_separator() {
        let entry = ArchiveEntry::directory("bin", Some(0o755));
        assert!(entry.is_directory());
        assert_eq!(entry.name, "bin/");

        let entry = ArchiveEntry::directory("lib/", None);
        assert_eq!(entry.name, "lib/");
    }

    #[test]
    fn entry_executable_with_mode() {
        assert!(ArchiveEntry::file("bin/tool", 1, Some(0o755)).is_executable());
        assert!(!ArchiveEntry::file("config/file", 1, Some(0o644)).is_executable());
        assert!(!ArchiveEntry::file("bin/tool", 1, None).is_executable());
    }

    #[test]
    fn report_accumulates() {
        let mut report = UnpackReport::default();
        report.record(ArchiveEntry::directory("bin", None));
        report.record(ArchiveEntry::file("bin/tool", 1024, Some(0o755)));
        assert_eq!(report.entry_count, 2);
        assert_eq!(report.total_bytes, 1024);
        assert_eq!(report.entries[1].name, "bin/tool");
    }
}
