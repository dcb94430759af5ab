//! The observability boundary for widget failures. The pipeline never logs
//! through a global; it reports to whatever [`Sink`] the application handed
//! it at startup. [`TracingSink`] forwards to [`tracing`], [`MemorySink`]
//! keeps records in memory (handy in tests and for admin diagnostics).

use crate::render::RenderError;
use std::sync::{Mutex, PoisonError};

/// One failed widget render, reported at error severity.
#[derive(Debug)]
pub struct FailureRecord<'a> {
    pub widget_id: u64,
    pub kind: &'a str,
    pub cause: &'a RenderError,
}

impl FailureRecord<'_> {
    /// The fixed operator-facing message for a failed widget.
    pub const MESSAGE: &'static str = "sidebar widget failed to render";
}

/// Receives error-severity failure records. A sink is shared by every
/// in-flight request, so implementations must tolerate concurrent calls.
pub trait Sink: Send + Sync {
    fn error(&self, record: &FailureRecord<'_>);
}

/// Emits one `tracing` error event per record, with `widget_id`, `kind` and
/// `cause` as structured fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn error(&self, record: &FailureRecord<'_>) {
        tracing::error!(
            widget_id = record.widget_id,
            kind = %record.kind,
            cause = %record.cause,
            "{}",
            FailureRecord::MESSAGE
        );
    }
}

/// An owned copy of a [`FailureRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedFailure {
    pub widget_id: u64,
    pub kind: String,
    pub cause: String,
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<RecordedFailure>>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// Returns a copy of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<RecordedFailure> {
        // A poisoned lock only means another thread panicked mid-push; the
        // vector itself is still valid.
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Sink for MemorySink {
    fn error(&self, record: &FailureRecord<'_>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedFailure {
                widget_id: record.widget_id,
                kind: record.kind.to_owned(),
                cause: record.cause.to_string(),
            });
    }
}
