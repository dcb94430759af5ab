//! Converts widget-authored markdown to HTML.

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// The number of levels headings are pushed down by. A `#` heading in a
/// sidebar box renders as `<h4>`, beneath the box's own `<h3>` title.
const HEADING_OFFSET: u32 = 3;

/// Converts `markdown` to an HTML string.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut out = String::with_capacity(markdown.len());
    html::push_html(&mut out, Parser::new_ext(markdown, options).map(demote_heading));
    out
}

fn demote_heading(ev: Event) -> Event {
    match ev {
        Event::Start(Tag::Heading(level)) => {
            Event::Start(Tag::Heading((level + HEADING_OFFSET).min(6)))
        }
        Event::End(Tag::Heading(level)) => {
            Event::End(Tag::Heading((level + HEADING_OFFSET).min(6)))
        }
        _ => ev,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html() {
        assert_eq!(
            "<h4>About</h4>\n<p>Hello <em>there</em></p>\n",
            to_html("# About\n\nHello *there*")
        );
    }

    #[test]
    fn test_headings_cap_at_h6() {
        assert_eq!("<h6>Deep</h6>\n", to_html("#### Deep"));
    }
}
