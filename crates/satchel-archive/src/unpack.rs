use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::{debug, info, trace};
use zip::ZipArchive;

use crate::entry::{ArchiveEntry, UnpackReport};
use crate::error::{Error, Result};

const TARGET_DIR_MODE: u32 = 0o755;
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Extract every entry of the zip at `archive_path` below `target_dir`.
///
/// `target_dir` and its parents are created first. Directory entries are
/// created best-effort; file entries are written with their stored unix mode.
/// The first failing file aborts the call and whatever was already extracted
/// stays on disk.
pub fn unpack(archive_path: impl AsRef<Path>, target_dir: impl AsRef<Path>) -> Result<UnpackReport> {
    let archive_path = archive_path.as_ref();
    let target_dir = target_dir.as_ref();

    let file = File::open(archive_path).map_err(|e| Error::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(Error::Corrupted)?;

    create_dir_all_with_mode(target_dir, TARGET_DIR_MODE).map_err(|e| {
        Error::DirectoryCreationFailed {
            path: target_dir.to_path_buf(),
            source: e,
        }
    })?;

    let mut report = UnpackReport::default();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(Error::Corrupted)?;
        let name = file.name().to_string();
        let relative = file
            .enclosed_name()
            .ok_or_else(|| Error::InvalidPath(name.clone()))?;
        let path = target_dir.join(&relative);
        let mode = file.unix_mode();

        if file.is_dir() {
            let dir_mode = mode.map_or(TARGET_DIR_MODE, |m| (m & 0o777) | 0o700);
            if let Err(e) = create_dir_all_with_mode(&path, dir_mode) {
                debug!(path = %path.display(), error = %e, "couldn't create directory");
            }
            report.record(ArchiveEntry::directory(name, mode));
            continue;
        }

        if let Some(parent) = path.parent() {
            create_dir_all_with_mode(parent, TARGET_DIR_MODE).map_err(|e| {
                Error::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;
        }

        let mut out = create_truncated(&path, mode.map_or(DEFAULT_FILE_MODE, |m| m & 0o7777))
            .map_err(|e| Error::Create {
                path: path.clone(),
                source: e,
            })?;
        let size = io::copy(&mut file, &mut out).map_err(|e| Error::Extract {
            name: name.clone(),
            path: path.clone(),
            source: e,
        })?;

        trace!(entry = %name, size, "extracted");
        report.record(ArchiveEntry::file(name, size, mode));
    }

    info!(
        archive = %archive_path.display(),
        target = %target_dir.display(),
        entries = report.entry_count,
        bytes = report.total_bytes,
        "zip extracted"
    );

    Ok(report)
}

/// Read the central directory of a zip without extracting anything.
pub fn list_entries(archive_path: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|e| Error::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(Error::Corrupted)?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index(i).map_err(Error::Corrupted)?;
        let entry = if file.is_dir() {
            ArchiveEntry::directory(file.name(), file.unix_mode())
        } else {
            ArchiveEntry::file(file.name(), file.size(), file.unix_mode())
        };
        entries.push(entry);
    }

    Ok(entries)
}

fn create_dir_all_with_mode(path: &Path, _mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(_mode);
    }
    builder.create(path)
}

fn create_truncated(path: &Path, _mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(_mode);
    }
    options.open(path)
}
