//! Short date arguments as typed on a command line.
//!
//! Two forms are accepted, picked by the first argument:
//!
//! - absolute: `D[.M[.Y]]` and/or `hh:mm`, e.g. `24.12. 18:30`. Empty date
//!   parts keep the current value.
//! - relative: `<int><unit>` offsets added to now, e.g. `2d -3h 15m`

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::{Error, Result, parse_int};

pub fn parse_date_args<S: AsRef<str>>(args: &[S]) -> Result<NaiveDateTime> {
    parse_date_args_at(args, Local::now().naive_local())
}

/// Like [`parse_date_args`], relative to `now` instead of the local clock.
///
/// `now` has its seconds dropped before anything is applied.
pub fn parse_date_args_at<S: AsRef<str>>(args: &[S], now: NaiveDateTime) -> Result<NaiveDateTime> {
    let first = args.first().ok_or(Error::NoDateArguments)?.as_ref();
    let now = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    if is_absolute(first) {
        absolute(args, now)
    } else {
        relative(args, now)
    }
}

fn is_absolute(arg: &str) -> bool {
    arg.contains('.') || arg.contains(':')
}

#[derive(Debug, Clone, Copy)]
struct Fields {
    day: i64,
    month: i64,
    year: i64,
    hour: i64,
    minute: i64,
}

impl Fields {
    fn from_datetime(at: NaiveDateTime) -> Self {
        Self {
            day: i64::from(at.day()),
            month: i64::from(at.month()),
            year: i64::from(at.year()),
            hour: i64::from(at.hour()),
            minute: i64::from(at.minute()),
        }
    }

    fn build(self) -> Result<NaiveDateTime> {
        let invalid = || Error::InvalidDate {
            day: self.day,
            month: self.month,
            year: self.year,
            hour: self.hour,
            minute: self.minute,
        };

        let date = NaiveDate::from_ymd_opt(
            i32::try_from(self.year).map_err(|_| invalid())?,
            u32::try_from(self.month).map_err(|_| invalid())?,
            u32::try_from(self.day).map_err(|_| invalid())?,
        )
        .ok_or_else(invalid)?;
        let time = NaiveTime::from_hms_opt(
            u32::try_from(self.hour).map_err(|_| invalid())?,
            u32::try_from(self.minute).map_err(|_| invalid())?,
            0,
        )
        .ok_or_else(invalid)?;

        Ok(date.and_time(time))
    }
}

fn absolute<S: AsRef<str>>(args: &[S], now: NaiveDateTime) -> Result<NaiveDateTime> {
    let mut fields = Fields::from_datetime(now);

    for arg in args {
        let arg = arg.as_ref();
        if arg.contains('.') {
            let parts: Vec<&str> = arg.split('.').collect();
            if parts.len() > 3 {
                return Err(Error::TooManyDateParts(arg.to_string()));
            }
            let slots = [&mut fields.day, &mut fields.month, &mut fields.year];
            for (slot, part) in slots.into_iter().zip(parts) {
                if !part.is_empty() {
                    *slot = parse_int(part)?;
                }
            }
        } else if arg.contains(':') {
            let Some((hour, minute)) = arg.split_once(':') else {
                return Err(Error::MalformedTime(arg.to_string()));
            };
            if minute.contains(':') {
                return Err(Error::MalformedTime(arg.to_string()));
            }
            fields.hour = parse_int(hour)?;
            fields.minute = parse_int(minute)?;
        } else {
            return Err(Error::MixedDateArgs(arg.to_string()));
        }
    }

    fields.build()
}

fn relative<S: AsRef<str>>(args: &[S], now: NaiveDateTime) -> Result<NaiveDateTime> {
    let mut at = now;

    for arg in args {
        let arg = arg.as_ref();
        let Some((unit_at, unit)) = arg.char_indices().last() else {
            return Err(Error::UnknownUnit(arg.to_string()));
        };
        let amount: i64 = parse_int(&arg[..unit_at])?;

        let out_of_range = || Error::OutOfRange(arg.to_string());
        let delta = match unit {
            'd' => TimeDelta::try_days(amount),
            'h' => TimeDelta::try_hours(amount),
            'm' => TimeDelta::try_minutes(amount),
            _ => return Err(Error::UnknownUnit(arg.to_string())),
        }
        .ok_or_else(out_of_range)?;

        at = at.checked_add_signed(delta).ok_or_else(out_of_range)?;
    }

    Ok(at)
}
