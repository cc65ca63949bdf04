pub mod metrics;
pub mod telemetry;

pub use metrics::ProductMetrics;
pub use telemetry::{LogFormat, TelemetryConfig, init_telemetry, shutdown_telemetry};
