use super::Result;
use crate::blog::{Article, Blog};
use crate::html::link_to;

/// Links `label` to the article's permalink URL (see
/// [`Article::permalink_url`]).
pub fn link_to_permalink(blog: &Blog, article: &Article, label: &str) -> Result<String> {
    Ok(link_to(article.permalink_url(blog)?.as_str(), label))
}
