use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source path not found: '{path}': {source}")]
    SourceNotFound { path: PathBuf, source: io::Error },

    #[error("couldn't open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("couldn't read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("couldn't create '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("couldn't extract entry '{name}' to '{path}': {source}")]
    Extract {
        name: String,
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("couldn't create entry '{name}' in zip: {source}")]
    EntryCreationFailed {
        name: String,
        source: zip::result::ZipError,
    },

    #[error("entry path escapes the target directory: '{0}'")]
    InvalidPath(String),

    #[error("archive is corrupted: {0}")]
    Corrupted(#[source] zip::result::ZipError),

    #[error("too many errors while streaming tar ({count})")]
    TooManyErrors { count: usize },

    #[error("tar walker thread panicked")]
    WalkerPanicked,

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
