use super::{object, CachedTemplate};
use crate::html::escape;
use crate::request::{Params, RequestContext};
use crate::widget::{config_str, Config, Descriptor, State, Widget};
use gtmpl::Value;

static TEMPLATE: CachedTemplate = CachedTemplate::new(concat!(
    r#"<div class="sidebar-search"><h3>{{.title}}</h3>"#,
    r#"<form action="{{.action}}" method="get">"#,
    r#"<input type="search" name="{{.param}}" value="{{.query}}">"#,
    r#"</form></div>"#,
));

/// A search box. The current query (read from the request parameter named by
/// the `param` setting) is echoed back into the input.
pub struct SearchWidget;

impl Widget for SearchWidget {
    fn descriptor(&self) -> Descriptor {
        Descriptor::new("Adds a search box to the sidebar")
            .with_default("title", "Search")
            .with_default("action", "/search")
            .with_default("param", "q")
    }

    fn parse_request(&self, config: &Config, params: &Params) -> anyhow::Result<State> {
        let param = config_str(config, "param")?;
        Ok(match params.get(param) {
            Some(query) => State::String(query.trim().to_owned()),
            None => State::Null,
        })
    }

    fn render(
        &self,
        config: &Config,
        state: &State,
        _ctx: &RequestContext,
    ) -> anyhow::Result<String> {
        TEMPLATE.execute(object(vec![
            ("title", Value::String(escape(config_str(config, "title")?))),
            ("action", Value::String(escape(config_str(config, "action")?))),
            ("param", Value::String(escape(config_str(config, "param")?))),
            (
                "query",
                Value::String(escape(state.as_str().unwrap_or_default())),
            ),
        ]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(ctx: &RequestContext) -> anyhow::Result<String> {
        let config = SearchWidget.descriptor().default_config;
        let state = SearchWidget.parse_request(&config, ctx.params())?;
        SearchWidget.render(&config, &state, ctx)
    }

    #[test]
    fn test_render_without_query() -> anyhow::Result<()> {
        assert_eq!(
            concat!(
                r#"<div class="sidebar-search"><h3>Search</h3>"#,
                r#"<form action="/search" method="get">"#,
                r#"<input type="search" name="q" value="">"#,
                r#"</form></div>"#,
            ),
            render(&RequestContext::default())?
        );
        Ok(())
    }

    #[test]
    fn test_render_echoes_escaped_query() -> anyhow::Result<()> {
        let out = render(&RequestContext::default().with_param("q", r#" "rust" <3 "#))?;
        assert!(
            out.contains(r#"value="&quot;rust&quot; &lt;3""#),
            "{}",
            out
        );
        Ok(())
    }
}
