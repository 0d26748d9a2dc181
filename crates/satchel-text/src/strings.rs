//! Plain string helpers.

use std::iter;

use crate::error::{Result, parse_int};

/// Text between the first `start` and the next `end` after it.
pub fn find_between<'a>(content: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = content.find(start)? + start.len();
    let len = content[from..].find(end)?;
    Some(&content[from..from + len])
}

/// Split on `\n`, treating `\r\n` as a single line break.
pub fn split_lines(s: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = s.split('\n').collect();
    let last = lines.len() - 1;
    for line in &mut lines[..last] {
        *line = line.strip_suffix('\r').unwrap_or(line);
    }
    lines
}

/// Parse every item as an unsigned decimal that fits in 32 bits.
pub fn parse_uint_list<S: AsRef<str>>(items: &[S]) -> Result<Vec<u64>> {
    items
        .iter()
        .map(|item| parse_int::<u32>(item.as_ref()).map(u64::from))
        .collect()
}

/// Replace up to `n` occurrences of `old` with `new` (all of them when `n`
/// is negative) and report where each replacement starts in the returned
/// string.
///
/// Positions count bytes of the output, so each one already includes the
/// length change of earlier replacements (`"aaa"`, `"a"`, `"bb"` gives
/// `[0, 2, 4]`). Subtracting only the removed `old` bytes from input offsets
/// gives the same numbers only when `new` is empty.
///
/// The index list is `[-1]` when nothing was replaced. An empty `old`
/// matches at every char boundary, including the end of the string.
pub fn replace_and_get_index(s: &str, old: &str, new: &str, n: isize) -> (String, Vec<isize>) {
    if old == new || n == 0 {
        return (s.to_string(), vec![-1]);
    }

    let matches: Vec<usize> = if old.is_empty() {
        s.char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(s.len()))
            .collect()
    } else {
        s.match_indices(old).map(|(i, _)| i).collect()
    };
    if matches.is_empty() {
        return (s.to_string(), vec![-1]);
    }

    let limit = usize::try_from(n).map_or(matches.len(), |n| n.min(matches.len()));
    let mut out = String::with_capacity(s.len() + limit * new.len());
    let mut positions = Vec::with_capacity(limit);
    let mut start = 0;

    for &at in &matches[..limit] {
        out.push_str(&s[start..at]);
        positions.push(out.len() as isize);
        out.push_str(new);
        start = at + old.len();
    }
    out.push_str(&s[start..]);

    (out, positions)
}
