//! Tar streaming with bounded error collection.
//!
//! A walker thread owns the [`tar::Builder`] and pushes every per-entry
//! failure into a bounded channel. The calling thread drains that channel,
//! logs each error, and gives up once `max_errors` have been seen. Giving up
//! raises a cancellation flag and drops the receiver, so the walker stops at
//! its next entry instead of blocking on a full channel.

use std::ffi::OsString;
use std::fs::{self, File, Metadata};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::thread;

use tar::{Builder, EntryType, Header};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::options::TarOptions;
#[cfg(not(unix))]
use crate::sanitize::normalize_separators;

/// A failure tied to one walked path. The walk continues past it.
#[derive(Debug, thiserror::Error)]
#[error("{}: {}", .path.display(), .source)]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl WalkError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Stream `source_dir` as a tar archive into `output` with default options.
pub fn stream_tar<W: Write + Send>(source_dir: impl AsRef<Path>, output: W) -> Result<W> {
    stream_tar_with_options(source_dir, output, &TarOptions::default())
}

/// Stream `source_dir` as a tar archive into `output`.
///
/// Entries are named `<source dir name>/<relative path>`; the root itself is
/// not stored. Symlinks are stored as links. On success the finished writer is
/// handed back. Hitting `options.max_errors` walk errors fails the call with
/// [`Error::TooManyErrors`] and leaves `output` holding an unterminated archive
/// of the entries written so far.
pub fn stream_tar_with_options<W: Write + Send>(
    source_dir: impl AsRef<Path>,
    output: W,
    options: &TarOptions,
) -> Result<W> {
    let source_dir = source_dir.as_ref();
    let (errors_tx, errors_rx) = mpsc::sync_channel::<WalkError>(options.max_errors);
    let cancelled = AtomicBool::new(false);

    thread::scope(|scope| {
        let walker = {
            let cancelled = &cancelled;
            let buffer_size = options.buffer_size;
            scope.spawn(move || {
                let mut walker = TarWalker {
                    root: source_dir,
                    prefix: archive_prefix(source_dir),
                    builder: Builder::new(output),
                    errors: errors_tx,
                    cancelled,
                    buffer: vec![0; buffer_size],
                };
                walker.run();
                walker.builder
            })
        };

        let mut count = 0usize;
        while let Ok(err) = errors_rx.recv() {
            warn!(path = %err.path.display(), error = %err.source, "tar entry failed");
            count += 1;
            if count >= options.max_errors {
                cancelled.store(true, Ordering::Relaxed);
                drop(errors_rx);
                return Err(Error::TooManyErrors { count });
            }
        }

        let builder = walker.join().map_err(|_| Error::WalkerPanicked)?;
        let mut output = builder.into_inner()?;
        output.flush()?;

        info!(source = %source_dir.display(), errors = count, "tar written");
        Ok(output)
    })
}

struct TarWalker<'a, W: Write> {
    root: &'a Path,
    prefix: PathBuf,
    builder: Builder<W>,
    errors: SyncSender<WalkError>,
    cancelled: &'a AtomicBool,
    /// Copy buffer shared by every file of one walk.
    buffer: Vec<u8>,
}

impl<W: Write> TarWalker<'_, W> {
    fn run(&mut self) {
        let entries = WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1);

        for entry in entries {
            if self.cancelled.load(Ordering::Relaxed) {
                debug!(root = %self.root.display(), "tar walk cancelled");
                return;
            }

            let result = match entry {
                Ok(entry) => self.append(entry.path()),
                Err(e) => {
                    let path = e.path().unwrap_or(self.root).to_path_buf();
                    Err(WalkError {
                        path,
                        source: e.into(),
                    })
                }
            };

            // the receiver is gone once the caller has given up
            if let Err(err) = result {
                if self.errors.send(err).is_err() {
                    return;
                }
            }
        }
    }

    fn append(&mut self, path: &Path) -> std::result::Result<(), WalkError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| WalkError::new(path, e))?;
        let mut header = header_for(&metadata).map_err(|e| WalkError::new(path, e))?;
        let name = self.entry_name(path);
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            let target = fs::read_link(path).map_err(|e| WalkError::new(path, e))?;
            self.builder
                .append_link(&mut header, &name, &target)
                .map_err(|e| WalkError::new(path, e))?;
        } else if file_type.is_dir() {
            let mut dir_name = OsString::from(name.as_os_str());
            dir_name.push("/");
            self.builder
                .append_data(&mut header, dir_name, io::empty())
                .map_err(|e| WalkError::new(path, e))?;
        } else if file_type.is_file() {
            let file = File::open(path).map_err(|e| WalkError::new(path, e))?;
            let reader = SharedBufReader::new(file, &mut self.buffer).take(metadata.len());
            self.builder
                .append_data(&mut header, &name, reader)
                .map_err(|e| WalkError::new(path, e))?;
        } else {
            self.builder
                .append_data(&mut header, &name, io::empty())
                .map_err(|e| WalkError::new(path, e))?;
        }

        debug!(entry = %name.display(), "tar entry written");
        Ok(())
    }

    /// Names keep the raw bytes of the walked path on unix.
    #[cfg(unix)]
    fn entry_name(&self, path: &Path) -> PathBuf {
        let relative = path.strip_prefix(self.root).unwrap_or(path);
        self.prefix.join(relative)
    }

    #[cfg(not(unix))]
    fn entry_name(&self, path: &Path) -> PathBuf {
        let relative = path.strip_prefix(self.root).unwrap_or(path);
        let relative = normalize_separators(&relative.to_string_lossy(), "/");
        self.prefix.join(relative)
    }
}

/// [`std::io::BufReader`] over a borrowed buffer, reused across files.
/// An empty buffer reads straight through.
struct SharedBufReader<'b, R> {
    inner: R,
    buf: &'b mut [u8],
    pos: usize,
    filled: usize,
}

impl<'b, R: Read> SharedBufReader<'b, R> {
    fn new(inner: R, buf: &'b mut [u8]) -> Self {
        Self {
            inner,
            buf,
            pos: 0,
            filled: 0,
        }
    }
}

impl<R: Read> Read for SharedBufReader<'_, R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.filled {
            if self.buf.is_empty() || out.len() >= self.buf.len() {
                return self.inner.read(out);
            }
            self.filled = self.inner.read(&mut *self.buf)?;
            self.pos = 0;
        }

        let available = &self.buf[self.pos..self.filled];
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Build a header from filesystem metadata. Sockets have no tar form.
fn header_for(metadata: &Metadata) -> io::Result<Header> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if metadata.file_type().is_socket() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "sockets not supported",
            ));
        }
    }

    let mut header = Header::new_gnu();
    header.set_metadata(metadata);

    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        header.set_entry_type(EntryType::Symlink);
        header.set_size(0);
    } else if file_type.is_dir() {
        header.set_entry_type(EntryType::Directory);
        header.set_size(0);
    } else if !file_type.is_file() {
        header.set_size(0);
    }

    Ok(header)
}

fn archive_prefix(root: &Path) -> PathBuf {
    root.file_name()
        .map(PathBuf::from)
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(PathBuf::from))
        })
        .unwrap_or_default()
}
