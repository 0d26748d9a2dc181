//! Filesystem helpers: reading, suffix search, output path resolution and
//! shredding.

mod error;
mod file;
mod find;
mod path;
pub mod shred;

pub use error::{Error, Result};
pub use file::{exists, read_to_string, read_to_string_or_empty};
pub use find::find_files_by_suffix;
pub use path::{last_part, nth_part_from_end, sanitize_output};
pub use shred::{ShredOptions, ShredPattern, shred_file, shred_file_with_options};
