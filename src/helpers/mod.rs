//! Stateless view helpers: the robots-indexing policy ([`robots`]), nofollow
//! link rewriting ([`nofollow`]), reply link formatting ([`reply`]),
//! permalink anchors ([`permalink`]) and date display ([`date`]).
//!
//! Unlike widgets, these run outside the fault-isolation boundary; errors go
//! straight back to the caller.

pub mod date;
pub mod nofollow;
pub mod permalink;
pub mod reply;
pub mod robots;

pub use date::{display_date, display_date_and_time, display_time};
pub use nofollow::apply_nofollow;
pub use permalink::link_to_permalink;
pub use reply::{reply_context_twitter_link, reply_context_url, Reply};
pub use robots::{robots_meta, should_noindex};

use crate::blog::CannotBeABaseError;
use std::fmt;

/// The result of a fallible helper.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a helper failure.
#[derive(Debug)]
pub enum Error {
    /// Returned when a reply lacks a field the helper needs. Holds the
    /// field's path, e.g., `user.name`.
    MalformedReply(&'static str),

    /// Returned when a reply can't be parsed as JSON.
    DeserializeJson(serde_json::Error),

    /// Returned when a reply's timestamp can't be parsed.
    Timestamp(chrono::ParseError),

    /// Returned when a date format pattern contains an unknown specifier.
    DateFormat(String),

    /// Returned when path segments can't be added to a base URL, either the
    /// blog's (for permalinks) or the reply service's.
    Permalink(CannotBeABaseError),

    /// Returned when a base URL can't be parsed.
    Url(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedReply(field) => {
                write!(f, "malformed reply: missing `{}`", field)
            }
            Error::DeserializeJson(err) => err.fmt(f),
            Error::Timestamp(err) => write!(f, "parsing reply timestamp: {}", err),
            Error::DateFormat(format) => {
                write!(f, "invalid date format `{}`", format)
            }
            Error::Permalink(err) => err.fmt(f),
            Error::Url(err) => write!(f, "parsing url: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedReply(_) => None,
            Error::DeserializeJson(err) => Some(err),
            Error::Timestamp(err) => Some(err),
            Error::DateFormat(_) => None,
            Error::Permalink(err) => Some(err),
            Error::Url(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator when parsing replies.
    fn from(err: serde_json::Error) -> Error {
        Error::DeserializeJson(err)
    }
}

impl From<chrono::ParseError> for Error {
    /// Converts a [`chrono::ParseError`] into an [`Error`]. This allows us to
    /// use the `?` operator when parsing timestamps.
    fn from(err: chrono::ParseError) -> Error {
        Error::Timestamp(err)
    }
}

impl From<CannotBeABaseError> for Error {
    fn from(err: CannotBeABaseError) -> Error {
        Error::Permalink(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::Url(err)
    }
}
