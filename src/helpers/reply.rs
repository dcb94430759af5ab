//! Formats links for replies received from Twitter-like services. A [`Reply`]
//! mirrors the JSON status object, keeping only the fields we render. Every
//! level is optional because the upstream payloads frequently omit them; the
//! helpers report a [`Error::MalformedReply`] when a field they need is
//! missing.

use super::{Error, Result};
use crate::blog::CannotBeABaseError;
use crate::html::link_to;
use chrono::{DateTime, TimeZone};
use serde::Deserialize;
use std::fmt::Display;
use url::Url;

const PROFILE_BASE_URL: &str = "https://twitter.com";
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";
const STATUS_LINK_FORMAT: &str = "%d/%m/%Y at %Hh%M";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub id_str: Option<String>,

    /// E.g., `Thu Jan 23 13:47:00 +0000 2014`.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub screen_name: Option<String>,

    #[serde(default)]
    pub entities: Entities,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub url: Option<UrlEntity>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UrlEntity {
    #[serde(default)]
    pub urls: Vec<ExpandedUrl>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExpandedUrl {
    #[serde(default)]
    pub expanded_url: Option<String>,
}

impl Reply {
    pub fn from_json(json: &str) -> Result<Reply> {
        Ok(serde_json::from_str(json)?)
    }

    fn user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(Error::MalformedReply("user"))
    }
}

impl User {
    /// The first URL the user lists on their profile, if any.
    pub fn expanded_url(&self) -> Option<&str> {
        self.entities
            .url
            .as_ref()?
            .urls
            .first()?
            .expanded_url
            .as_deref()
    }

    fn profile_url(&self) -> Result<String> {
        let handle = self
            .screen_name
            .as_deref()
            .or_else(|| self.name.as_deref())
            .ok_or(Error::MalformedReply("user.screen_name"))?;
        service_url(&[handle])
    }
}

/// Appends `segments` to [`PROFILE_BASE_URL`], percent-encoding each one so
/// a display name with spaces or slashes stays a single path segment.
fn service_url(segments: &[&str]) -> Result<String> {
    let base = Url::parse(PROFILE_BASE_URL)?;
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CannotBeABaseError(base))?
        .pop_if_empty()
        .extend(segments);
    Ok(String::from(url))
}

/// Links the reply author's name to the first URL on their profile, or to
/// their profile page when they list none.
pub fn reply_context_url(reply: &Reply) -> Result<String> {
    let user = reply.user()?;
    let name = user
        .name
        .as_deref()
        .ok_or(Error::MalformedReply("user.name"))?;
    Ok(match user.expanded_url() {
        Some(url) => link_to(url, name),
        None => link_to(&user.profile_url()?, name),
    })
}

/// Links to the reply's status page. The link text is the creation time,
/// shown in `tz`, e.g., `23/01/2014 at 13h47`.
pub fn reply_context_twitter_link<Tz>(reply: &Reply, tz: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let user = reply.user()?;
    let screen_name = user
        .screen_name
        .as_deref()
        .ok_or(Error::MalformedReply("user.screen_name"))?;
    let id = reply
        .id_str
        .as_deref()
        .ok_or(Error::MalformedReply("id_str"))?;
    let created_at = reply
        .created_at
        .as_deref()
        .ok_or(Error::MalformedReply("created_at"))?;

    let created_at = DateTime::parse_from_str(created_at, CREATED_AT_FORMAT)?;
    Ok(link_to(
        &service_url(&[screen_name, "status", id])?,
        &created_at
            .with_timezone(tz)
            .format(STATUS_LINK_FORMAT)
            .to_string(),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn status() -> Result<Reply> {
        Reply::from_json(
            r#"{
                "id_str": "123456789",
                "created_at": "Thu Jan 23 13:47:00 +0000 2014",
                "user": {
                    "screen_name": "a_screen_name",
                    "entities": { "url": { "urls": [{ "expanded_url": "an url" }] } }
                }
            }"#,
        )
    }

    #[test]
    fn test_reply_context_url_prefers_expanded_url() -> Result<()> {
        let reply = Reply::from_json(
            r#"{"user": {"name": "truc", "entities": {"url": {"urls": [{"expanded_url": "an url"}]}}}}"#,
        )?;
        assert_eq!(r#"<a href="an url">truc</a>"#, reply_context_url(&reply)?);
        Ok(())
    }

    #[test]
    fn test_reply_context_url_falls_back_to_profile() -> Result<()> {
        let reply = Reply::from_json(r#"{"user": {"name": "truc", "entities": {}}}"#)?;
        assert_eq!(
            r#"<a href="https://twitter.com/truc">truc</a>"#,
            reply_context_url(&reply)?
        );

        let reply = Reply::from_json(
            r#"{"user": {"name": "Truc", "screen_name": "truc_42"}}"#,
        )?;
        assert_eq!(
            r#"<a href="https://twitter.com/truc_42">Truc</a>"#,
            reply_context_url(&reply)?
        );
        Ok(())
    }

    #[test]
    fn test_profile_fallback_encodes_display_name() -> Result<()> {
        let reply = Reply::from_json(r#"{"user": {"name": "Jean Dupont"}}"#)?;
        assert_eq!(
            r#"<a href="https://twitter.com/Jean%20Dupont">Jean Dupont</a>"#,
            reply_context_url(&reply)?
        );

        let reply = Reply::from_json(r#"{"user": {"name": "a/b?c"}}"#)?;
        assert_eq!(
            r#"<a href="https://twitter.com/a%2Fb%3Fc">a/b?c</a>"#,
            reply_context_url(&reply)?
        );
        Ok(())
    }

    #[test]
    fn test_reply_context_url_requires_user() {
        match reply_context_url(&Reply::default()) {
            Err(Error::MalformedReply(field)) => assert_eq!("user", field),
            other => panic!("wanted malformed reply; found {:?}", other),
        }
    }

    #[test]
    fn test_twitter_link_in_utc() -> Result<()> {
        assert_eq!(
            r#"<a href="https://twitter.com/a_screen_name/status/123456789">23/01/2014 at 13h47</a>"#,
            reply_context_twitter_link(&status()?, &Utc)?
        );
        Ok(())
    }

    #[test]
    fn test_twitter_link_in_tokyo() -> Result<()> {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            r#"<a href="https://twitter.com/a_screen_name/status/123456789">23/01/2014 at 22h47</a>"#,
            reply_context_twitter_link(&status()?, &tokyo)?
        );
        Ok(())
    }

    #[test]
    fn test_twitter_link_rejects_bad_timestamp() -> Result<()> {
        let mut reply = status()?;
        reply.created_at = Some(String::from("yesterday"));
        match reply_context_twitter_link(&reply, &Utc) {
            Err(Error::Timestamp(_)) => Ok(()),
            other => panic!("wanted timestamp error; found {:?}", other),
        }
    }
}
