//! Defines the [`Pipeline`], which turns a blog's sidebar (an unordered
//! collection of [`Instance`]s) into a single HTML fragment.
//!
//! Instances are rendered one at a time, in ascending `position` (ties broken
//! by `id`), each through the isolation boundary in [`crate::render`]. A
//! failed instance is reported to the [`Sink`] and replaced by
//! [`PLACEHOLDER`]; every other instance renders as usual. So for `N`
//! instances the output is always exactly `N` fragments, in order.

use crate::registry::Registry;
use crate::render::{render, Outcome};
use crate::request::RequestContext;
use crate::sink::{FailureRecord, Sink};
use crate::widget::Instance;
use std::sync::Arc;

/// Shown to readers in place of a widget which failed to render.
pub const PLACEHOLDER: &str = concat!(
    r#"<div class="sidebar-error">"#,
    "<p>It seems something went wrong. ",
    "Maybe some parameters are missing in this sidebar configuration.</p>",
    "</div>",
);

/// Renders sidebars. One pipeline is built at startup and shared by every
/// request; it holds no per-request state.
#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<Registry>,
    sink: Arc<dyn Sink>,
}

impl Pipeline {
    /// Creates a pipeline over the widget variants in `registry`, reporting
    /// failures to `sink`.
    pub fn new(registry: Arc<Registry>, sink: Arc<dyn Sink>) -> Pipeline {
        Pipeline { registry, sink }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders every instance in `instances`, whatever blog it belongs to.
    /// Never fails; an empty slice renders as the empty string.
    pub fn render_all(&self, instances: &[Instance], ctx: &RequestContext) -> String {
        self.render_ordered(instances.iter().collect(), ctx)
    }

    /// Renders only the instances owned by `blog_id`.
    pub fn render_blog(
        &self,
        blog_id: u64,
        instances: &[Instance],
        ctx: &RequestContext,
    ) -> String {
        self.render_ordered(
            instances.iter().filter(|i| i.blog_id == blog_id).collect(),
            ctx,
        )
    }

    // `instances` is borrowed for the whole pass, so the set we sort is the
    // set we render.
    fn render_ordered(&self, mut instances: Vec<&Instance>, ctx: &RequestContext) -> String {
        instances.sort_by_key(|instance| instance.sort_key());

        let mut out = String::new();
        for instance in instances {
            match render(&self.registry, instance, ctx) {
                Outcome::Success(fragment) => out.push_str(&fragment),
                Outcome::Failure { widget_id, cause } => {
                    self.sink.error(&FailureRecord {
                        widget_id,
                        kind: &instance.kind,
                        cause: &cause,
                    });
                    out.push_str(PLACEHOLDER);
                }
            }
        }
        out
    }
}
