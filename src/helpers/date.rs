//! Date display using the blog's strftime-style format strings. Patterns are
//! open-ended; anything `chrono` understands is accepted, and a pattern with an
//! unknown specifier is reported as [`Error::DateFormat`] rather than
//! rendered half-way.

use super::{Error, Result};
use crate::blog::Blog;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

/// Formats `timestamp` with `format`.
pub fn display_date<Tz>(timestamp: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::DateFormat(format.to_owned()));
    }
    let mut out = String::new();
    write!(out, "{}", timestamp.format_with_items(items.iter()))
        .map_err(|_| Error::DateFormat(format.to_owned()))?;
    Ok(out)
}

/// Formats `timestamp` with the blog's `time_format`.
pub fn display_time<Tz>(blog: &Blog, timestamp: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    display_date(timestamp, &blog.time_format)
}

/// Formats `timestamp` as `{date} at {time}` using the blog's formats.
pub fn display_date_and_time<Tz>(blog: &Blog, timestamp: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Ok(format!(
        "{} at {}",
        display_date(timestamp, &blog.date_format)?,
        display_time(blog, timestamp)?
    ))
}
