use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no input received within {0:?}")]
    Timeout(Duration),

    #[error("home directory could not be determined")]
    NoHome,

    #[error("input reader stopped without a result")]
    ReaderGone,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
