//! Defines the [`Widget`] extension contract along with the [`Descriptor`] a
//! widget variant declares about itself and the persisted [`Instance`] record
//! which places a configured widget in a blog's sidebar.
//!
//! A widget variant is any type implementing [`Widget`]. Variants are
//! registered once, by kind, in a [`crate::registry::Registry`]; an
//! [`Instance`] names its variant through [`Instance::kind`]. Rendering is a
//! two-step affair:
//!
//! 1. [`Widget::parse_request`] derives transient [`State`] from the current
//!    request's parameters (paging, search terms, etc).
//! 2. [`Widget::render`] produces an HTML fragment from the instance's
//!    configuration and that state.
//!
//! Either step may fail. Failures never escape the render boundary (see
//! [`crate::render`]); widget authors are free to use `?` liberally.

use crate::request::{Params, RequestContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A widget's persisted settings. Keys are setting names; values are
/// arbitrary YAML values so each variant can pick its own shape.
pub type Config = BTreeMap<String, serde_yaml::Value>;

/// Transient per-request state returned by [`Widget::parse_request`] and
/// handed back to [`Widget::render`]. It is never persisted.
pub type State = serde_yaml::Value;

/// Static metadata a widget variant declares about itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Descriptor {
    /// A human-readable label, e.g., for an administrative widget picker.
    /// Must not be empty.
    pub description: String,

    /// The settings a new instance starts out with. Persisted settings
    /// override these key by key (see [`Instance::effective_config`]).
    pub default_config: Config,
}

impl Descriptor {
    pub fn new(description: &str) -> Descriptor {
        Descriptor {
            description: description.to_owned(),
            default_config: Config::new(),
        }
    }

    /// Adds a default setting. Chainable.
    pub fn with_default<V: Into<serde_yaml::Value>>(
        mut self,
        key: &str,
        value: V,
    ) -> Descriptor {
        self.default_config.insert(key.to_owned(), value.into());
        self
    }
}

/// The contract every widget variant implements.
///
/// Implementations must be [`Send`] and [`Sync`] because a single registry is
/// shared by every in-flight request.
pub trait Widget: Send + Sync {
    /// Returns the variant's descriptor. This is called exactly once, when
    /// the variant is registered.
    fn descriptor(&self) -> Descriptor;

    /// Derives transient render state from the request parameters. `config`
    /// is the instance's effective configuration and must not be used to
    /// smuggle state between requests. The default implementation derives
    /// nothing.
    fn parse_request(
        &self,
        _config: &Config,
        _params: &Params,
    ) -> anyhow::Result<State> {
        Ok(State::Null)
    }

    /// Renders the widget's HTML fragment.
    fn render(
        &self,
        config: &Config,
        state: &State,
        ctx: &RequestContext,
    ) -> anyhow::Result<String>;
}

/// One configured widget placed in a blog's sidebar. Instances are owned by
/// the persistence layer; the rendering path only ever reads them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Instance {
    /// Unique, stable identifier. Used to break `position` ties and to
    /// identify the widget in failure reports.
    pub id: u64,

    /// The blog which owns this instance.
    #[serde(default)]
    pub blog_id: u64,

    /// Selects the [`Widget`] variant which renders this instance.
    pub kind: String,

    /// Ordering key; sidebars render in ascending `position`.
    #[serde(default)]
    pub position: i64,

    /// Persisted settings for this instance.
    #[serde(default)]
    pub config: Config,
}

impl Instance {
    pub fn new(id: u64, kind: &str, position: i64) -> Instance {
        Instance {
            id,
            blog_id: 0,
            kind: kind.to_owned(),
            position,
            config: Config::new(),
        }
    }

    /// Sets a persisted setting. Chainable.
    pub fn with_config<V: Into<serde_yaml::Value>>(
        mut self,
        key: &str,
        value: V,
    ) -> Instance {
        self.config.insert(key.to_owned(), value.into());
        self
    }

    /// The key used to order instances within a sidebar.
    pub fn sort_key(&self) -> (i64, u64) {
        (self.position, self.id)
    }

    /// Returns the configuration a widget actually sees: the descriptor's
    /// defaults overlaid with this instance's persisted settings.
    pub fn effective_config(&self, descriptor: &Descriptor) -> Config {
        let mut config = descriptor.default_config.clone();
        for (key, value) in &self.config {
            config.insert(key.clone(), value.clone());
        }
        config
    }
}

/// Looks up a string setting. Returns an error naming the key if it is
/// missing or isn't a string, which makes it convenient inside
/// [`Widget::render`].
pub fn config_str<'a>(config: &'a Config, key: &str) -> anyhow::Result<&'a str> {
    match config.get(key) {
        None => Err(anyhow::anyhow!("missing setting `{}`", key)),
        Some(value) => value
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("setting `{}` must be a string", key)),
    }
}
