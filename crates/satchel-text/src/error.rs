use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid number '{input}': {source}")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("no date arguments given")]
    NoDateArguments,
    #[error("a specific time has to look like hh:mm, got '{0}'")]
    MalformedTime(String),
    #[error("unknown time unit in '{0}', expected one of d, h, m")]
    UnknownUnit(String),
    #[error("a date has at most day, month and year, got '{0}'")]
    TooManyDateParts(String),
    #[error("'{0}' mixes relative offsets into an absolute date")]
    MixedDateArgs(String),
    #[error("invalid date {day}.{month}.{year} {hour:02}:{minute:02}")]
    InvalidDate {
        day: i64,
        month: i64,
        year: i64,
        hour: i64,
        minute: i64,
    },
    #[error("offset '{0}' is out of range")]
    OutOfRange(String),
}

pub(crate) fn parse_int<T>(input: &str) -> Result<T>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    input.parse().map_err(|source| Error::InvalidNumber {
        input: input.to_string(),
        source,
    })
}
