//! Defines the [`Registry`] which maps widget kinds to their [`Widget`]
//! implementations. The application builds one registry at startup and
//! shares it (usually behind an [`std::sync::Arc`]) with every request.

use crate::widget::{Descriptor, Widget};
use std::collections::BTreeMap;
use std::fmt;

struct Entry {
    descriptor: Descriptor,
    widget: Box<dyn Widget>,
}

/// The set of widget variants known to the process, keyed by kind.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Creates a registry holding the built-in variants (see
    /// [`crate::widgets`]).
    pub fn with_builtins() -> Result<Registry> {
        let mut registry = Registry::new();
        crate::widgets::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Registers `widget` under `kind`. The widget's [`Descriptor`] is
    /// captured here, once, and never asked for again.
    pub fn register<W: Widget + 'static>(
        &mut self,
        kind: &str,
        widget: W,
    ) -> Result<()> {
        if kind.is_empty() {
            return Err(Error::EmptyKind);
        }
        if self.entries.contains_key(kind) {
            return Err(Error::DuplicateKind(kind.to_owned()));
        }
        let descriptor = widget.descriptor();
        if descriptor.description.trim().is_empty() {
            return Err(Error::EmptyDescription(kind.to_owned()));
        }
        self.entries.insert(
            kind.to_owned(),
            Entry {
                descriptor,
                widget: Box::new(widget),
            },
        );
        Ok(())
    }

    /// Looks up the descriptor and implementation registered for `kind`.
    pub fn get(&self, kind: &str) -> Option<(&Descriptor, &dyn Widget)> {
        self.entries
            .get(kind)
            .map(|entry| (&entry.descriptor, entry.widget.as_ref()))
    }

    pub fn descriptor(&self, kind: &str) -> Option<&Descriptor> {
        self.entries.get(kind).map(|entry| &entry.descriptor)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Lists `(kind, descriptor)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.entries
            .iter()
            .map(|(kind, entry)| (kind.as_str(), &entry.descriptor))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The result of a registration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a rejected registration.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when the kind is the empty string.
    EmptyKind,

    /// Returned when a kind is registered twice.
    DuplicateKind(String),

    /// Returned when a variant's descriptor has a blank description.
    EmptyDescription(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyKind => write!(f, "widget kind must not be empty"),
            Error::DuplicateKind(kind) => {
                write!(f, "widget kind `{}` is already registered", kind)
            }
            Error::EmptyDescription(kind) => {
                write!(f, "widget kind `{}` has an empty description", kind)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::request::RequestContext;
    use crate::widget::{Config, State};

    struct Fixed(&'static str);

    impl Widget for Fixed {
        fn descriptor(&self) -> Descriptor {
            Descriptor::new(self.0).with_default("greeting", "hi")
        }

        fn render(
            &self,
            _config: &Config,
            _state: &State,
            _ctx: &RequestContext,
        ) -> anyhow::Result<String> {
            Ok(self.0.to_owned())
        }
    }

    #[test]
    fn test_register_captures_descriptor() -> Result<()> {
        let mut registry = Registry::new();
        registry.register("fixed", Fixed("A fixed widget"))?;

        let descriptor = registry.descriptor("fixed").unwrap();
        assert_eq!("A fixed widget", descriptor.description);
        assert_eq!(Some("hi"), descriptor.default_config["greeting"].as_str());
        assert!(registry.contains("fixed"));
        assert!(registry.get("missing").is_none());
        Ok(())
    }

    #[test]
    fn test_register_rejects_duplicates() -> Result<()> {
        let mut registry = Registry::new();
        registry.register("fixed", Fixed("one"))?;
        assert_eq!(
            Err(Error::DuplicateKind("fixed".to_owned())),
            registry.register("fixed", Fixed("two"))
        );
        assert_eq!(1, registry.len());
        Ok(())
    }

    #[test]
    fn test_register_rejects_blank_description() {
        let mut registry = Registry::new();
        assert_eq!(
            Err(Error::EmptyDescription("fixed".to_owned())),
            registry.register("fixed", Fixed("  "))
        );
        assert_eq!(Err(Error::EmptyKind), registry.register("", Fixed("x")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_builtins() -> Result<()> {
        let registry = Registry::with_builtins()?;
        let kinds: Vec<&str> = registry.iter().map(|(kind, _)| kind).collect();
        assert_eq!(vec!["links", "search", "static"], kinds);
        Ok(())
    }
}
