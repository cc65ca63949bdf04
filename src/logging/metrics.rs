use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram};
use std::time::Duration;

use crate::logging::telemetry::{create_counter, create_histogram};

/// Counters and latency for the product operations
#[derive(Clone)]
pub struct ProductMetrics {
    operations: Counter<u64>,
    failures: Counter<u64>,
    latency: Histogram<f64>,
}

impl std::fmt::Debug for ProductMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductMetrics").finish_non_exhaustive()
    }
}

impl Default for ProductMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductMetrics {
    pub fn new() -> Self {
        Self {
            operations: create_counter(
                "productos_operations_total",
                "Product operations handled, by operation",
            ),
            failures: create_counter(
                "productos_operation_failures_total",
                "Product operations that ended in an error, by operation and code",
            ),
            latency: create_histogram(
                "productos_operation_duration_ms",
                "Time spent in a product operation, in milliseconds",
            ),
        }
    }

    /// Record one finished operation. `error_code` is set when it failed.
    pub fn record(&self, operation: &'static str, elapsed: Duration, error_code: Option<&'static str>) {
        let attributes = [KeyValue::new("operation", operation)];

        self.operations.add(1, &attributes);
        self.latency
            .record(elapsed.as_secs_f64() * 1000.0, &attributes);

        if let Some(code) = error_code {
            self.failures.add(
                1,
                &[
                    KeyValue::new("operation", operation),
                    KeyValue::new("code", code),
                ],
            );
        }
    }
}
