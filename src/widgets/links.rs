use super::{object, CachedTemplate};
use crate::helpers::apply_nofollow;
use crate::html::{escape, link_to};
use crate::request::RequestContext;
use crate::widget::{config_str, Config, Descriptor, State, Widget};
use anyhow::anyhow;
use gtmpl::Value;
use serde::Deserialize;

static TEMPLATE: CachedTemplate = CachedTemplate::new(concat!(
    r#"<div class="sidebar-links"><h3>{{.title}}</h3><ul>"#,
    r#"{{range .links}}<li>{{.}}</li>{{end}}"#,
    r#"</ul></div>"#,
));

#[derive(Deserialize)]
struct Link {
    label: String,
    url: String,
}

/// A titled list of links. Links are marked nofollow unless the `dofollow`
/// setting is on.
pub struct LinksWidget;

impl Widget for LinksWidget {
    fn descriptor(&self) -> Descriptor {
        Descriptor::new("A list of links to other sites")
            .with_default("title", "Links")
            .with_default("dofollow", false)
            .with_default("links", serde_yaml::Value::Sequence(Vec::new()))
    }

    fn render(
        &self,
        config: &Config,
        _state: &State,
        _ctx: &RequestContext,
    ) -> anyhow::Result<String> {
        let links: Vec<Link> = match config.get("links") {
            Some(value) => serde_yaml::from_value(value.clone())
                .map_err(|e| anyhow!("setting `links`: {}", e))?,
            None => Vec::new(),
        };
        let dofollow = config
            .get("dofollow")
            .and_then(serde_yaml::Value::as_bool)
            .unwrap_or(false);

        let links = links
            .iter()
            .map(|link| Value::String(apply_nofollow(&link_to(&link.url, &link.label), dofollow)))
            .collect();
        TEMPLATE.execute(object(vec![
            ("title", Value::String(escape(config_str(config, "title")?))),
            ("links", Value::Array(links)),
        ]))
    }
}
