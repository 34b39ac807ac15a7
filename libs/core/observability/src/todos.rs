//! Todo service operation metrics.

use metrics::{counter, histogram};
use std::time::Duration;

/// Outcome label for a service call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

/// Todo service metrics recorder
pub struct TodoMetrics;

impl TodoMetrics {
    /// Record one completed service call.
    pub fn record_operation(method: &'static str, outcome: Outcome, elapsed: Duration) {
        counter!(
            "todo_operations_total",
            "method" => method,
            "outcome" => outcome.as_str()
        )
        .increment(1);

        histogram!("todo_operation_duration_seconds", "method" => method)
            .record(elapsed.as_secs_f64());

        tracing::trace!(
            method,
            outcome = outcome.as_str(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Recorded todo operation"
        );
    }

    /// Shorthand for recording from a `Result`.
    pub fn record_result<T, E>(method: &'static str, result: &Result<T, E>, elapsed: Duration) {
        let outcome = if result.is_ok() { Outcome::Success } else { Outcome::Failure };
        Self::record_operation(method, outcome, elapsed);
    }
}
