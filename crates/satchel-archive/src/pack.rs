use std::fs::{self, File, Metadata};
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::ignore::IgnoreRules;
use crate::options::{Compression, PackOptions};
use crate::sanitize::{normalize_separators, sanitize_entry_name};

/// Zip `source` into `source/archive_name`, skipping ignored paths.
///
/// Entries are stored as `<source dir name>/<relative path>`. Returns the
/// path of the written archive.
pub fn pack_directory<S: AsRef<str>>(
    source: impl AsRef<Path>,
    archive_name: &str,
    ignore_list: &[S],
) -> Result<PathBuf> {
    let options = PackOptions::default().ignore(ignore_list.iter().map(|s| s.as_ref().to_string()));
    pack_directory_with_options(source, archive_name, &options)
}

pub fn pack_directory_with_options(
    source: impl AsRef<Path>,
    archive_name: &str,
    options: &PackOptions,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let source_meta = fs::metadata(source).map_err(|e| Error::SourceNotFound {
        path: source.to_path_buf(),
        source: e,
    })?;

    let archive_path = source.join(archive_name);
    let file = File::create(&archive_path).map_err(|e| Error::Create {
        path: archive_path.clone(),
        source: e,
    })?;
    let mut zip = ZipWriter::new(file);

    let base_dir = if source_meta.is_dir() {
        Some(base_dir_name(source))
    } else {
        None
    };
    let ignore = IgnoreRules::new(archive_name, options.ignore.iter().cloned());

    debug!(source = %source.display(), archive = %archive_path.display(), "packing directory");

    let walker = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let ignored = ignore.matches(entry.path());
            if ignored {
                debug!(path = %entry.path().display(), "ignoring");
            }
            !ignored
        });

    let mut stored = 0usize;
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        let name = stored_name(base_dir.as_deref(), source, path);
        if name.is_empty() {
            continue;
        }

        if entry.file_type().is_dir() {
            let metadata = entry.metadata()?;
            let dir_name = format!("{name}/");
            let file_options = entry_options(&metadata, Compression::Stored);
            zip.add_directory(dir_name.clone(), file_options)
                .map_err(|e| Error::EntryCreationFailed {
                    name: dir_name.clone(),
                    source: e,
                })?;
            trace!(entry = %dir_name, "stored directory");
        } else {
            // symlinks are followed for content
            let metadata = fs::metadata(path).map_err(|e| Error::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
            if metadata.is_dir() {
                debug!(path = %path.display(), "skipping directory symlink");
                continue;
            }
            let file_options = entry_options(&metadata, options.compression);
            copy_file_entry(path, &name, file_options, &mut zip)?;
            trace!(entry = %name, size = metadata.len(), "stored file");
        }
        stored += 1;
    }

    zip.finish()?;
    info!(archive = %archive_path.display(), entries = stored, "zip written");

    Ok(archive_path)
}

/// Zip an explicit list of files and directories into memory.
///
/// Directories are expanded recursively. Each file is stored under its own
/// path with separators normalized and traversal sequences removed. The
/// first failure aborts the whole operation.
pub fn pack_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for path in paths {
        write_path(path.as_ref(), &mut zip)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn write_path<W: Write + Seek>(path: &Path, zip: &mut ZipWriter<W>) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| Error::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_dir() {
        let name = sanitize_entry_name(&path.to_string_lossy());
        let file_options = entry_options(&metadata, Compression::Deflated);
        return copy_file_entry(path, &name, file_options, zip);
    }

    let read_err = |e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    };
    let mut children = fs::read_dir(path)
        .map_err(read_err)?
        .collect::<io::Result<Vec<_>>>()
        .map_err(read_err)?;
    children.sort_by_key(|child| child.file_name());

    for child in children {
        write_path(&child.path(), zip)?;
    }

    Ok(())
}

fn copy_file_entry<W: Write + Seek>(
    path: &Path,
    name: &str,
    file_options: SimpleFileOptions,
    zip: &mut ZipWriter<W>,
) -> Result<()> {
    let mut file = File::open(path).map_err(|e| Error::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    zip.start_file(name.to_string(), file_options)
        .map_err(|e| Error::EntryCreationFailed {
            name: name.to_string(),
            source: e,
        })?;

    io::copy(&mut file, zip).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn entry_options(metadata: &Metadata, compression: Compression) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(compression.method())
        .large_file(metadata.len() >= u64::from(u32::MAX));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    }
    #[cfg(not(unix))]
    {
        options
    }
}

fn base_dir_name(source: &Path) -> String {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            source
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|name| name.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}

/// Name stored in the zip for `path`, found while walking `source`.
fn stored_name(base_dir: Option<&str>, source: &Path, path: &Path) -> String {
    let Some(base_dir) = base_dir else {
        return path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
    };

    let relative = path.strip_prefix(source).unwrap_or(path);
    let relative = normalize_separators(&relative.to_string_lossy(), "/");
    let relative = relative.trim_start_matches('/');

    match (base_dir.is_empty(), relative.is_empty()) {
        (_, true) => base_dir.to_string(),
        (true, false) => relative.to_string(),
        (false, false) => format!("{base_dir}/{relative}"),
    }
}
