//! Small HTML building blocks shared by the policy helpers and the built-in
//! widgets: attribute/text escaping and anchor construction.

use pulldown_cmark::escape::{escape_html, StrWrite};
use std::fmt::{self, Display};
use std::io;

struct Adaptor<'a, T> {
    formatter: &'a mut T,
    result: fmt::Result,
}

impl<T> Adaptor<'_, T> {
    fn handle_result(&mut self, result: fmt::Result) -> io::Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                self.result = result;
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}

impl<T: fmt::Write> StrWrite for Adaptor<'_, T> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        let result = self.formatter.write_str(s);
        self.handle_result(result)
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> io::Result<()> {
        let result = self.formatter.write_fmt(args);
        self.handle_result(result)
    }
}

/// Displays the wrapped text with `&`, `<`, `>` and `"` escaped, so it can be
/// dropped into element content or a double-quoted attribute.
pub struct EscapeHtml<'a>(pub &'a str);

impl<'a> Display for EscapeHtml<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };
        let _ = escape_html(&mut adaptor, self.0);
        adaptor.result
    }
}

/// Returns an escaped copy of `s`. See [`EscapeHtml`].
pub fn escape(s: &str) -> String {
    EscapeHtml(s).to_string()
}

/// Builds `<a href="{href}">{text}</a>`. Both arguments are HTML-escaped but
/// `href` is otherwise left alone; callers that build URLs from user input
/// should percent-encode them first (e.g., with [`url::Url`]).
pub fn link_to(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, EscapeHtml(href), EscapeHtml(text))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;",
            escape(r#"<b>Tom & "Jerry"</b>"#)
        );
    }

    #[test]
    fn test_link_to_leaves_href_unencoded() {
        assert_eq!(r#"<a href="an url">truc</a>"#, link_to("an url", "truc"));
    }

    #[test]
    fn test_link_to_escapes_quotes_in_href() {
        assert_eq!(
            r#"<a href="x&quot; onclick=&quot;y">t</a>"#,
            link_to(r#"x" onclick="y"#, "t")
        );
    }
}
