//! Defines the [`Blog`] and [`Article`] value objects consumed by the policy
//! helpers. Both are read-only snapshots of records owned by the persistence
//! layer.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

fn default_date_format() -> String {
    String::from("%d/%m/%Y")
}

fn default_time_format() -> String {
    String::from("%Hh%M")
}

/// Blog-wide settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Blog {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub title: String,

    /// The root URL under which article permalinks live. This should end in a
    /// trailing slash.
    pub base_url: Url,

    /// The strftime-style pattern for dates, e.g., `%d %b %Y`.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// The strftime-style pattern for times of day, e.g., `%H:%M`.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Whether search engines should skip tag listing pages.
    #[serde(default)]
    pub unindex_tags: bool,

    /// Whether search engines should skip category listing pages.
    #[serde(default)]
    pub unindex_categories: bool,

    /// Whether outbound links in user content are left followable. When this
    /// is off, links get `rel="nofollow"`.
    #[serde(default)]
    pub dofollowify: bool,
}

impl Blog {
    /// Creates a blog with default settings.
    pub fn new(base_url: Url) -> Blog {
        Blog {
            id: 0,
            title: String::new(),
            base_url,
            date_format: default_date_format(),
            time_format: default_time_format(),
            unindex_tags: false,
            unindex_categories: false,
            dofollowify: false,
        }
    }
}

/// The parts of an article the helpers need.
#[derive(Clone, Debug)]
pub struct Article {
    pub title: String,

    /// The article's URL slug. When empty, the slugified title is used.
    pub permalink: String,

    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: &str, published_at: DateTime<Utc>) -> Article {
        Article {
            title: title.to_owned(),
            permalink: String::new(),
            published_at,
        }
    }

    /// Returns the slug used in the article's URL.
    pub fn slug(&self) -> String {
        match self.permalink.is_empty() {
            true => slug::slugify(&self.title),
            false => self.permalink.clone(),
        }
    }

    /// Returns `{base_url}/{YYYY}/{MM}/{DD}/{slug}`. Each segment is
    /// percent-encoded, so non-ASCII slugs and slugs containing `/` or `?`
    /// stay a single path segment.
    pub fn permalink_url(&self, blog: &Blog) -> Result<Url, CannotBeABaseError> {
        let mut url = blog.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CannotBeABaseError(blog.base_url.clone()))?;
            segments.pop_if_empty();
            segments.push(&self.published_at.format("%Y").to_string());
            segments.push(&self.published_at.format("%m").to_string());
            segments.push(&self.published_at.format("%d").to_string());
            segments.push(&self.slug());
        }
        Ok(url)
    }
}

/// Returned when a blog's `base_url` can't have path segments (e.g.,
/// `mailto:` URLs).
#[derive(Debug)]
pub struct CannotBeABaseError(pub Url);

impl std::fmt::Display for CannotBeABaseError {
    /// Displays a [`CannotBeABaseError`] as human-readable text.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "blog base URL `{}` cannot be a base", &self.0)
    }
}

impl std::error::Error for CannotBeABaseError {}
