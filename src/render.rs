//! The fault-isolation boundary. [`render`] runs one widget instance and
//! converts whatever happens inside the widget (an error, a panic, or the
//! widget not existing at all) into an [`Outcome`]. Nothing raised by widget
//! code gets past this function, and nothing here logs; reporting is the
//! pipeline's job (see [`crate::pipeline`]).

use crate::registry::Registry;
use crate::request::RequestContext;
use crate::widget::Instance;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// The result of rendering a single widget instance.
#[derive(Debug)]
pub enum Outcome {
    /// The widget's complete HTML fragment.
    Success(String),

    /// The widget failed. No partial output is kept.
    Failure { widget_id: u64, cause: RenderError },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Renders `instance` with the variant `registry` holds for its kind.
pub fn render(
    registry: &Registry,
    instance: &Instance,
    ctx: &RequestContext,
) -> Outcome {
    let (descriptor, widget) = match registry.get(&instance.kind) {
        Some(found) => found,
        None => {
            return Outcome::Failure {
                widget_id: instance.id,
                cause: RenderError::UnknownVariant(instance.kind.clone()),
            }
        }
    };

    let config = instance.effective_config(descriptor);

    // The closure only reads `config`, `ctx` and the shared widget, none of
    // which can be left half-updated by an unwinding panic.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let state = widget.parse_request(&config, ctx.params())?;
        widget.render(&config, &state, ctx)
    }));

    match result {
        Ok(Ok(fragment)) => Outcome::Success(fragment),
        Ok(Err(err)) => Outcome::Failure {
            widget_id: instance.id,
            cause: RenderError::Widget(err),
        },
        Err(payload) => Outcome::Failure {
            widget_id: instance.id,
            cause: RenderError::Panicked(panic_message(payload)),
        },
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_owned(),
            Err(_) => String::from("non-string panic payload"),
        },
    }
}

/// Why a widget failed to render.
#[derive(Debug)]
pub enum RenderError {
    /// The instance names a kind nothing registered.
    UnknownVariant(String),

    /// The widget's `parse_request` or `render` returned an error.
    Widget(anyhow::Error),

    /// The widget panicked; holds the panic message.
    Panicked(String),
}

impl fmt::Display for RenderError {
    /// Displays a [`RenderError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::UnknownVariant(kind) => {
                write!(f, "unknown widget kind `{}`", kind)
            }
            RenderError::Widget(err) => write!(f, "{:#}", err),
            RenderError::Panicked(message) => {
                write!(f, "widget panicked: {}", message)
            }
        }
    }
}

impl std::error::Error for RenderError {
    /// Implements the [`std::error::Error`] trait for [`RenderError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::UnknownVariant(_) => None,
            RenderError::Widget(err) => Some(&**err),
            RenderError::Panicked(_) => None,
        }
    }
}
