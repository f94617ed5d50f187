//! Observability sink for run failures.

use crate::runtime::error::TemplateError;

/// A pluggable target notified of every failed run.
///
/// The engine's contract is "observe, then re-raise": the sink sees
/// the error before the caller does, and observing never suppresses
/// propagation.
pub trait ReportSink {
    fn report(&self, error: &TemplateError);
}

/// The default sink, logging through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, error: &TemplateError) {
        tracing::error!(%error, "template run failed");
    }
}
