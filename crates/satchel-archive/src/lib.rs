//! Zip packing/unpacking and tar streaming.
//!
//! # Architecture
//!
//! - `sanitize.rs` - Separator normalization and traversal stripping
//! - `ignore.rs` - Substring ignore rules for packing
//! - `pack.rs` - Zip creation from a directory or a path list
//! - `unpack.rs` - Zip extraction
//! - `tar_stream.rs` - Tar streaming with a background walker
//! - `entry.rs` / `options.rs` - Shared types

pub use entry::{ArchiveEntry, EntryKind, UnpackReport};
pub use error::{Error, Result};
pub use ignore::{IgnoreRules, should_ignore};
pub use options::{Compression, PackOptions, TarOptions};
pub use pack::{pack_directory, pack_directory_with_options, pack_paths};
pub use sanitize::{normalize_separators, sanitize_entry_name, strip_traversal};
pub use tar_stream::{WalkError, stream_tar, stream_tar_with_options};
pub use unpack::{list_entries, unpack};

pub mod entry;
mod error;
mod ignore;
pub mod options;
mod pack;
mod sanitize;
mod tar_stream;
mod unpack;
