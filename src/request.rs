//! Defines [`RequestContext`], the read-only snapshot of the incoming request
//! which every widget sees during a render pass.

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters by name.
pub type Params = BTreeMap<String, String>;

/// Identifies the page being viewed, in router terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageIdentity {
    /// The listing or resource controller, e.g., `articles`, `tags`.
    pub controller: String,

    /// The controller action, e.g., `index`, `show`.
    pub action: String,

    /// The resource identifier for single-resource pages.
    pub id: Option<String>,
}

impl PageIdentity {
    pub fn new(controller: &str, action: &str) -> PageIdentity {
        PageIdentity {
            controller: controller.to_owned(),
            action: action.to_owned(),
            id: None,
        }
    }
}

/// A per-request snapshot of query parameters and page identity. Fields are
/// private so a context can't change underneath a render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    page: PageIdentity,
    params: Params,
}

impl RequestContext {
    pub fn new(page: PageIdentity, params: Params) -> RequestContext {
        RequestContext { page, params }
    }

    /// Adds a query parameter. Chainable; meant for building a context
    /// before it is handed to the pipeline.
    pub fn with_param(mut self, key: &str, value: &str) -> RequestContext {
        self.params.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn page(&self) -> &PageIdentity {
        &self.page
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Parses a `key=value` pair, as passed on the command line. The value may be
/// empty; the key may not.
pub fn parse_param(s: &str) -> Result<(String, String), InvalidParamError> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => {
            Ok((key.to_owned(), value.to_owned()))
        }
        _ => Err(InvalidParamError(s.to_owned())),
    }
}

/// Returned by [`parse_param`] for input that isn't `key=value`.
#[derive(Debug)]
pub struct InvalidParamError(String);

impl fmt::Display for InvalidParamError {
    /// Displays an [`InvalidParamError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid parameter `{}`: expected `key=value`", &self.0)
    }
}

impl std::error::Error for InvalidParamError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_param_lookup() {
        let ctx = RequestContext::new(PageIdentity::new("articles", "index"), Params::new())
            .with_param("page", "2");
        assert_eq!(Some("2"), ctx.param("page"));
        assert_eq!(None, ctx.param("year"));
        assert_eq!("articles", ctx.page().controller);
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            ("year".to_owned(), "2010".to_owned()),
            parse_param("year=2010").unwrap()
        );
        assert_eq!(
            ("q".to_owned(), "a=b".to_owned()),
            parse_param("q=a=b").unwrap()
        );
        assert_eq!(("q".to_owned(), String::new()), parse_param("q=").unwrap());
        assert!(parse_param("=x").is_err());
        assert!(parse_param("nothing").is_err());
    }
}
