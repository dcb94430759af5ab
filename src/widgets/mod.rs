//! The built-in widget variants:
//!
//! * `static`: a titled box of markdown text ([`StaticWidget`]).
//! * `search`: a search form which remembers the current query
//!   ([`SearchWidget`]).
//! * `links`: a titled list of outbound links ([`LinksWidget`]).
//!
//! Each renders through a small `gtmpl` template. Values are HTML-escaped
//! before they reach the template, so templates print them as-is.

mod links;
mod search;
mod static_text;

pub use links::LinksWidget;
pub use search::SearchWidget;
pub use static_text::StaticWidget;

use crate::registry::{Registry, Result};
use anyhow::anyhow;
use gtmpl::{Context, Template, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Registers every built-in variant under its kind.
pub fn register_builtins(registry: &mut Registry) -> Result<()> {
    registry.register("static", StaticWidget)?;
    registry.register("search", SearchWidget)?;
    registry.register("links", LinksWidget)?;
    Ok(())
}

/// A widget's template source, parsed on first use and kept for the life of
/// the process.
struct CachedTemplate {
    source: &'static str,
    parsed: OnceLock<std::result::Result<Template, String>>,
}

impl CachedTemplate {
    const fn new(source: &'static str) -> CachedTemplate {
        CachedTemplate {
            source,
            parsed: OnceLock::new(),
        }
    }

    /// Executes the template against `value`, parsing it first if this is
    /// the first render.
    fn execute(&self, value: Value) -> anyhow::Result<String> {
        let template = self
            .parsed
            .get_or_init(|| parse(self.source))
            .as_ref()
            .map_err(|e| anyhow!("parsing widget template: {}", e))?;
        let context =
            Context::from(value).map_err(|e| anyhow!("building template context: {}", e))?;

        let mut out: Vec<u8> = Vec::new();
        template
            .execute(&mut out, &context)
            .map_err(|e| anyhow!("executing widget template: {}", e))?;
        Ok(String::from_utf8(out)?)
    }
}

fn parse(source: &str) -> std::result::Result<Template, String> {
    let mut template = Template::default();
    template.parse(source)?;
    Ok(template)
}

/// Builds a template object from `(field, value)` pairs.
fn object<'a>(fields: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    let m: HashMap<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();
    Value::Object(m)
}

#[cfg(test)]
mod test {
    use super::*;

    static LIST: CachedTemplate =
        CachedTemplate::new("<h3>{{.title}}</h3>{{range .items}}[{{.}}]{{end}}");

    fn list(title: &str) -> Value {
        object(vec![
            ("title", Value::String(title.to_owned())),
            (
                "items",
                Value::Array(vec![Value::String("a".to_owned()), Value::String("b".to_owned())]),
            ),
        ])
    }

    #[test]
    fn test_execute() -> anyhow::Result<()> {
        assert_eq!("<h3>About</h3>[a][b]", LIST.execute(list("About"))?);
        Ok(())
    }

    #[test]
    fn test_template_is_parsed_once_and_reused() -> anyhow::Result<()> {
        static ONCE: CachedTemplate = CachedTemplate::new("<p>{{.title}}</p>");
        assert!(ONCE.parsed.get().is_none());

        let value = || object(vec![("title", Value::String("x".to_owned()))]);
        assert_eq!("<p>x</p>", ONCE.execute(value())?);
        let first: *const _ = ONCE.parsed.get().unwrap();
        assert_eq!("<p>x</p>", ONCE.execute(value())?);
        assert!(std::ptr::eq(first, ONCE.parsed.get().unwrap()));
        Ok(())
    }

    #[test]
    fn test_execute_reports_parse_errors() {
        static BROKEN: CachedTemplate = CachedTemplate::new("{{.title");
        for _ in 0..2 {
            let err = BROKEN.execute(Value::Nil).unwrap_err();
            assert!(err.to_string().starts_with("parsing widget template"));
        }
    }
}
