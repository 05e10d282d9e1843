//! Metrics for intercepted calls.
//!
//! # Metrics
//! - `proxykit_calls_started_total` (counter): prefix hooks run, by type and method
//! - `proxykit_calls_finished_total` (counter): suffix hooks run, by type and method
//!
//! The difference between the two counts calls that failed. Without an
//! installed recorder the updates are no-ops.

use metrics::counter;

pub const CALLS_STARTED: &str = "proxykit_calls_started_total";
pub const CALLS_FINISHED: &str = "proxykit_calls_finished_total";

/// Record that an intercepted call is about to run.
pub fn record_call_started(type_name: &str, method: &str) {
    counter!(
        CALLS_STARTED,
        "type" => type_name.to_string(),
        "method" => method.to_string()
    )
    .increment(1);
}

/// Record that an intercepted call returned normally.
pub fn record_call_finished(type_name: &str, method: &str) {
    counter!(
        CALLS_FINISHED,
        "type" => type_name.to_string(),
        "method" => method.to_string()
    )
    .increment(1);
}
