//! Small text helpers shared by the satchel crates.
//!
//! - `strings` - Delimited search, line splitting, replace with positions
//! - `slice` - Length sorting, membership and dedup
//! - `random` - Random letter strings from a process-wide generator
//! - `date` - Absolute and relative date arguments

pub use date::{parse_date_args, parse_date_args_at};
pub use error::{Error, Result};
pub use random::random_string;
pub use slice::{contains, sort_by_length_desc, unique};
pub use strings::{find_between, parse_uint_list, replace_and_get_index, split_lines};

mod date;
mod error;
mod random;
mod slice;
mod strings;
