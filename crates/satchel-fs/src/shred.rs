//! Overwrite-then-delete for files that held secrets.
//!
//! How many passes are made depends on the file size:
//!
//! | size          | passes | pattern          |
//! |---------------|--------|------------------|
//! | >= 1 GB       | 1      | zeros            |
//! | >= 5 kB       | 3      | zeros, random    |
//! | smaller       | 6      | zeros, random    |

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use rand::RngCore;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const LARGE_FILE_THRESHOLD: u64 = 1_000_000_000;
pub const SMALL_FILE_THRESHOLD: u64 = 5_000;

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShredPattern {
    Zeros,
    /// Zeros, then secure random bytes, in every pass.
    ZerosThenRandom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShredOptions {
    pub pattern: ShredPattern,
    pub passes: u32,
    pub remove: bool,
}

impl Default for ShredOptions {
    fn default() -> Self {
        Self::for_size(0)
    }
}

impl ShredOptions {
    /// The plan used by [`shred_file`] for a file of `size` bytes.
    pub fn for_size(size: u64) -> Self {
        let (pattern, passes) = if size >= LARGE_FILE_THRESHOLD {
            (ShredPattern::Zeros, 1)
        } else if size >= SMALL_FILE_THRESHOLD {
            (ShredPattern::ZerosThenRandom, 3)
        } else {
            (ShredPattern::ZerosThenRandom, 6)
        };
        Self {
            pattern,
            passes,
            remove: true,
        }
    }

    pub fn pattern(mut self, pattern: ShredPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    pub fn remove(mut self, remove: bool) -> Self {
        self.remove = remove;
        self
    }
}

/// Overwrite `path` and delete it.
///
/// `size` picks the plan; when `None` the file's current length is used.
pub fn shred_file(path: impl AsRef<Path>, size: Option<u64>) -> Result<()> {
    let path = path.as_ref();
    let size = match size {
        Some(size) => size,
        None => {
            fs::metadata(path)
                .map_err(|e| Error::ShredTargetMissing {
                    path: path.to_path_buf(),
                    source: e,
                })?
                .len()
        }
    };

    shred_file_with_options(path, ShredOptions::for_size(size))
}

/// Overwrite `path` following `options`.
///
/// When overwriting fails and `options.remove` is set the file is still
/// removed, and the overwrite error is returned.
pub fn shred_file_with_options(path: impl AsRef<Path>, options: ShredOptions) -> Result<()> {
    let path = path.as_ref();

    let overwritten = overwrite(path, options);
    if let Err(e) = &overwritten {
        warn!(path = %path.display(), error = %e, "shredding failed");
    }

    if options.remove {
        let removed = fs::remove_file(path).map_err(|e| Error::Remove {
            path: path.to_path_buf(),
            source: e,
        });
        match (&overwritten, removed) {
            (Ok(()), Err(e)) => return Err(e),
            (Err(_), Err(e)) => warn!(error = %e, "removing unshredded file failed"),
            (_, Ok(())) => debug!(path = %path.display(), "removed"),
        }
    }

    overwritten
}

fn overwrite(path: &Path, options: ShredOptions) -> Result<()> {
    let write_err = |e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(write_err)?;
    let len = file.metadata().map_err(write_err)?.len();

    for pass in 0..options.passes {
        fill(&mut file, len, Fill::Zeros).map_err(write_err)?;
        if options.pattern == ShredPattern::ZerosThenRandom {
            fill(&mut file, len, Fill::Random).map_err(write_err)?;
        }
        debug!(path = %path.display(), pass = pass + 1, of = options.passes, "overwrote");
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum Fill {
    Zeros,
    Random,
}

fn fill(file: &mut File, len: u64, fill: Fill) -> io::Result<()> {
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut rng = rand::thread_rng();

    file.seek(SeekFrom::Start(0))?;
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(CHUNK_SIZE as u64) as usize;
        if let Fill::Random = fill {
            rng.fill_bytes(&mut chunk[..n]);
        }
        file.write_all(&chunk[..n])?;
        remaining -= n as u64;
    }
    file.sync_data()
}
