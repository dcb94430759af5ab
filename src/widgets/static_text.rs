use super::{object, CachedTemplate};
use crate::html::escape;
use crate::markdown;
use crate::request::RequestContext;
use crate::widget::{config_str, Config, Descriptor, State, Widget};
use gtmpl::Value;

static TEMPLATE: CachedTemplate = CachedTemplate::new(
    r#"<div class="sidebar-static"><h3>{{.title}}</h3>{{.body}}</div>"#,
);

/// A titled box whose `body` setting is markdown.
pub struct StaticWidget;

impl Widget for StaticWidget {
    fn descriptor(&self) -> Descriptor {
        Descriptor::new("Static content, like links to other sites, advertisements, or blog meta-information")
            .with_default("title", "Links")
            .with_default("body", "")
    }

    fn render(
        &self,
        config: &Config,
        _state: &State,
        _ctx: &RequestContext,
    ) -> anyhow::Result<String> {
        TEMPLATE.execute(object(vec![
            ("title", Value::String(escape(config_str(config, "title")?))),
            (
                "body",
                Value::String(markdown::to_html(config_str(config, "body")?)),
            ),
        ]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let mut config = StaticWidget.descriptor().default_config;
        for (k, v) in pairs {
            config.insert(k.to_string(), (*v).into());
        }
        config
    }

    #[test]
    fn test_render() -> anyhow::Result<()> {
        assert_eq!(
            "<div class=\"sidebar-static\"><h3>About &amp; more</h3><p>I write <strong>Rust</strong>.</p>\n</div>",
            StaticWidget.render(
                &config(&[("title", "About & more"), ("body", "I write **Rust**.")]),
                &State::Null,
                &RequestContext::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_render_rejects_non_string_body() {
        let mut config = config(&[]);
        config.insert("body".to_owned(), 42.into());
        let err = StaticWidget
            .render(&config, &State::Null, &RequestContext::default())
            .unwrap_err();
        assert_eq!("setting `body` must be a string", err.to_string());
    }
}
