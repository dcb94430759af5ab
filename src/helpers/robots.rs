//! Decides whether a listing page should be hidden from search engines.

use crate::blog::Blog;
use crate::request::{Params, RequestContext};

/// Returns `true` when the page should carry `noindex`:
///
/// * archive pages filtered by `year`,
/// * paginated listings (any `page` parameter),
/// * tag listings when the blog sets `unindex_tags`,
/// * category listings when the blog sets `unindex_categories`.
pub fn should_noindex(blog: &Blog, params: &Params, controller: &str) -> bool {
    if params.contains_key("year") || params.contains_key("page") {
        return true;
    }
    match controller {
        "tags" => blog.unindex_tags,
        "categories" => blog.unindex_categories,
        _ => false,
    }
}

/// Renders the robots `<meta>` tag for the current request.
pub fn robots_meta(blog: &Blog, ctx: &RequestContext) -> String {
    format!(
        r#"<meta name="robots" content="{}">"#,
        match should_noindex(blog, ctx.params(), &ctx.page().controller) {
            true => "noindex, follow",
            false => "index, follow",
        }
    )
}
