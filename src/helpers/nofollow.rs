//! Marks anchors in user-supplied HTML as `rel="nofollow"`.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// An `<a>` start tag. Quoted attribute values may contain `>`.
fn anchor_pattern() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    // Should never fail; the pattern is a constant.
    ANCHOR.get_or_init(|| Regex::new(r#"(?i)<a\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap())
}

/// One attribute: its name, then an optional double-quoted, single-quoted
/// or unquoted value. Matched left to right over the tag, so text inside a
/// quoted value is never taken for an attribute.
fn attribute_pattern() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap()
    })
}

/// Adds `rel="nofollow"` to every `<a>` start tag in `html` unless
/// `dofollow` is set, in which case `html` is returned unchanged. Anchors which
/// already carry a `rel` attribute get `nofollow` appended to its value, and
/// anchors which are already nofollow are left alone, so applying this twice
/// is the same as applying it once.
pub fn apply_nofollow(html: &str, dofollow: bool) -> String {
    if dofollow {
        return html.to_owned();
    }
    anchor_pattern()
        .replace_all(html, |caps: &Captures| nofollow_tag(&caps[0]).into_owned())
        .into_owned()
}

fn nofollow_tag(tag: &str) -> Cow<'_, str> {
    // Skip `<a` and the closing `>`.
    let attributes = &tag[2..tag.len() - 1];
    let rel = attribute_pattern()
        .captures_iter(attributes)
        .find(|caps| caps[1].eq_ignore_ascii_case("rel"));

    let caps = match rel {
        Some(caps) => caps,
        None => {
            let body = &tag[..tag.len() - 1];
            let (body, close) = match body.strip_suffix('/') {
                Some(body) => (body, " />"),
                None => (body, ">"),
            };
            return Cow::Owned(format!(r#"{} rel="nofollow"{}"#, body.trim_end(), close));
        }
    };

    let value = match caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)) {
        Some(value) => value,
        None => {
            // A bare `rel` becomes `rel="nofollow"`.
            let name = caps.get(1).map_or(0..0, |m| m.range());
            return Cow::Owned(format!(
                r#"{}rel="nofollow"{}"#,
                &tag[..2 + name.start],
                &tag[2 + name.end..]
            ));
        }
    };
    if value
        .as_str()
        .split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("nofollow"))
    {
        return Cow::Borrowed(tag);
    }

    let (start, end) = (2 + value.start(), 2 + value.end());
    let separator = if value.as_str().trim().is_empty() { "" } else { " " };
    Cow::Owned(match caps.get(4) {
        // Unquoted values are rewritten as quoted ones so the added token
        // doesn't end the attribute.
        Some(_) => format!(
            r#"{}"{} nofollow"{}"#,
            &tag[..start],
            value.as_str(),
            &tag[end..]
        ),
        None => format!(
            "{}{}{}nofollow{}",
            &tag[..start],
            value.as_str(),
            separator,
            &tag[end..]
        ),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nofollow_when_dofollow_disabled() {
        assert_eq!(
            r#"<a href="http://myblog.net" rel="nofollow">my blog</a>"#,
            apply_nofollow(r#"<a href="http://myblog.net">my blog</a>"#, false)
        );
    }

    #[test]
    fn test_unchanged_when_dofollow_enabled() {
        let html = r#"<a href="http://myblog.net">my blog</a>"#;
        assert_eq!(html, apply_nofollow(html, true));
    }

    #[test]
    fn test_every_anchor_is_rewritten() {
        assert_eq!(
            r#"<p><a href="/a" rel="nofollow">a</a> and <A HREF="/b" rel="nofollow">b</A><abbr>x</abbr></p>"#,
            apply_nofollow(
                r#"<p><a href="/a">a</a> and <A HREF="/b">b</A><abbr>x</abbr></p>"#,
                false
            )
        );
    }

    #[test]
    fn test_idempotent() {
        let once = apply_nofollow(r#"<a href="/x">x</a>"#, false);
        assert_eq!(once, apply_nofollow(&once, false));
    }

    #[test]
    fn test_existing_rel_is_extended_not_duplicated() {
        assert_eq!(
            r#"<a rel="me noopener nofollow" href="/x">x</a>"#,
            apply_nofollow(r#"<a rel="me noopener" href="/x">x</a>"#, false)
        );
        assert_eq!(
            r#"<a href="/x" rel='NoFollow'>x</a>"#,
            apply_nofollow(r#"<a href="/x" rel='NoFollow'>x</a>"#, false)
        );
        assert_eq!(
            r#"<a href="/x" rel="nofollow">x</a>"#,
            apply_nofollow(r#"<a href="/x" rel="">x</a>"#, false)
        );
        assert_eq!(
            r#"<a href="/x" rel="me nofollow">x</a>"#,
            apply_nofollow(r#"<a href="/x" rel=me>x</a>"#, false)
        );
    }

    #[test]
    fn test_bare_and_self_closing_anchors() {
        assert_eq!(r#"<a rel="nofollow">"#, apply_nofollow("<a>", false));
        assert_eq!(
            r#"<a name="top" rel="nofollow" />"#,
            apply_nofollow(r#"<a name="top"/>"#, false)
        );
    }

    #[test]
    fn test_gt_inside_quoted_value_does_not_end_the_tag() {
        assert_eq!(
            r#"<a title="a>b" href="/x" rel="nofollow">x</a>"#,
            apply_nofollow(r#"<a title="a>b" href="/x">x</a>"#, false)
        );
    }

    #[test]
    fn test_rel_inside_another_value_is_not_an_attribute() {
        assert_eq!(
            r#"<a title="see rel=me" href="/x" rel="nofollow">x</a>"#,
            apply_nofollow(r#"<a title="see rel=me" href="/x">x</a>"#, false)
        );
        assert_eq!(
            r#"<a data-x='rel="me"' rel="me nofollow">x</a>"#,
            apply_nofollow(r#"<a data-x='rel="me"' rel="me">x</a>"#, false)
        );
    }

    #[test]
    fn test_valueless_rel_is_given_a_value() {
        let once = apply_nofollow(r#"<a href="/x" rel>x</a>"#, false);
        assert_eq!(r#"<a href="/x" rel="nofollow">x</a>"#, once);
        assert_eq!(once, apply_nofollow(&once, false));
    }
}
