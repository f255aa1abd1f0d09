//! Observability: the reporter boundary for migration progress.
//!
//! Migration logic never logs or counts directly. Every observable
//! outcome flows through `Reporter`, and the shipped reporters decide
//! whether it becomes a tracing event, a counter, or a recorded event.

mod reporter;

#[cfg(test)]
mod tests;

pub use reporter::{
    CountingReporter, NoopReporter, RecordingReporter, ReportCounts, ReportEvent, Reporter,
    TracingReporter,
};
