//! # Value Conversion Utilities
//!
//! Helpers for moving between host values and the string forms the table
//! model carries. The codecs neither require nor interpret these; they
//! exist so callers do not have to re-derive the field conventions.
//!
//! The timestamp day count is interpreted as a Julian day number on the
//! proleptic Gregorian calendar (chrono's calendar). `JDN = 1721425 +
//! days-from-CE`, anchored by JDN 2440588 = 1970-01-01.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use eyre::{bail, ensure, Result};

use crate::encoding::is_ascii_digits;

/// Offset between chrono's days-from-CE and the Julian day number.
const JDN_OFFSET: i64 = 1_721_425;

/// Converts a logical value to its field byte: `T`, `F`, or `?` for
/// unknown.
pub fn logical_to_flag(value: Option<bool>) -> char {
    match value {
        Some(true) => 'T',
        Some(false) => 'F',
        None => '?',
    }
}

/// Converts a logical field byte back. `T`/`Y` true, `F`/`N` false,
/// `?`/space unknown.
pub fn flag_to_logical(flag: char) -> Result<Option<bool>> {
    match flag {
        'T' | 'Y' => Ok(Some(true)),
        'F' | 'N' => Ok(Some(false)),
        '?' | ' ' => Ok(None),
        other => bail!("{other:?} is not a logical flag"),
    }
}

/// Formats a date as the 8-digit `YYYYMMDD` field form.
pub fn date_to_dbf(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Parses an 8-digit `YYYYMMDD` field back into a date.
pub fn dbf_to_date(value: &str) -> Result<NaiveDate> {
    ensure!(
        value.len() == 8 && is_ascii_digits(value.as_bytes()),
        "{value:?} is not an 8-digit YYYYMMDD date"
    );
    let year: i32 = value[..4].parse()?;
    let month: u32 = value[4..6].parse()?;
    let day: u32 = value[6..8].parse()?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("{value:?} is not a calendar date"))
}

/// Formats a datetime as the `"<days> <ms>"` timestamp field form.
pub fn date_to_timestamp(datetime: NaiveDateTime) -> String {
    let days = i64::from(datetime.date().num_days_from_ce()) + JDN_OFFSET;
    let ms = u64::from(datetime.time().num_seconds_from_midnight()) * 1000
        + u64::from(datetime.time().nanosecond() / 1_000_000);
    format!("{days} {ms}")
}

/// Parses a `"<days> <ms>"` timestamp field back into a datetime.
pub fn timestamp_to_date(value: &str) -> Result<NaiveDateTime> {
    let Some((days, ms)) = value.split_once(' ') else {
        bail!("{value:?} is not a \"<days> <ms>\" timestamp pair");
    };
    let days: i64 = days
        .parse()
        .map_err(|_| eyre::eyre!("{days:?} is not a day count"))?;
    let ms: u64 = ms
        .parse()
        .map_err(|_| eyre::eyre!("{ms:?} is not a millisecond count"))?;

    let from_ce = i32::try_from(days - JDN_OFFSET)
        .map_err(|_| eyre::eyre!("day count {days} is out of range"))?;
    let date = NaiveDate::from_num_days_from_ce_opt(from_ce)
        .ok_or_else(|| eyre::eyre!("day count {days} is out of range"))?;

    let (secs, millis) = (ms / 1000, ms % 1000);
    let time = NaiveTime::from_num_seconds_from_midnight_opt(
        u32::try_from(secs).map_err(|_| eyre::eyre!("millisecond count {ms} is out of range"))?,
        millis as u32 * 1_000_000,
    )
    .ok_or_else(|| eyre::eyre!("millisecond count {ms} is out of range"))?;

    Ok(date.and_time(time))
}
