pub use error::{Error, Result};
pub use stdin::{read_stdin_with_timeout, read_with_timeout};

pub mod dir;
mod error;
pub mod stdin;
