use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource, runtime,
    trace::{RandomIdGenerator, Sampler},
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

const METER_NAME: &str = "productos-backend";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Configuration for logging and OpenTelemetry
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for telemetry
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// OTLP endpoint (e.g., "http://localhost:4317")
    pub otlp_endpoint: String,
    /// Export metrics over OTLP
    pub enable_metrics: bool,
    /// Export spans over OTLP
    pub enable_tracing: bool,
    /// Log level filter, used when RUST_LOG is not set
    pub log_level: String,
    pub log_format: LogFormat,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
            enable_metrics: env_flag("OTEL_ENABLE_METRICS"),
            enable_tracing: env_flag("OTEL_ENABLE_TRACING"),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::from_env_value(
                &std::env::var("LOG_FORMAT").unwrap_or_default(),
            ),
        }
    }
}

impl TelemetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    pub fn with_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

/// Initialize structured logging and, when enabled, OTLP export
///
/// This sets up:
/// - A `tracing-subscriber` fmt layer (plain or JSON) filtered by `RUST_LOG`
/// - Tracing with the OTLP exporter when `enable_tracing` is set
/// - Metrics with the OTLP exporter when `enable_metrics` is set
pub fn init_telemetry(config: Option<TelemetryConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.unwrap_or_default();

    println!(
        "🔧 Initializing telemetry for {} v{} (tracing: {}, metrics: {}, endpoint: {})",
        config.service_name,
        config.service_version,
        config.enable_tracing,
        config.enable_metrics,
        config.otlp_endpoint
    );

    let resource = Resource::new(vec![
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            config.service_name.clone(),
        ),
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
            config.service_version.clone(),
        ),
    ]);

    let tracer = if config.enable_tracing {
        let tracer_provider = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(&config.otlp_endpoint),
            )
            .with_trace_config(
                opentelemetry_sdk::trace::Config::default()
                    .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
                    .with_id_generator(RandomIdGenerator::default())
                    .with_resource(resource.clone()),
            )
            .with_batch_config(
                opentelemetry_sdk::trace::BatchConfigBuilder::default()
                    .with_max_queue_size(4096)
                    .with_scheduled_delay(std::time::Duration::from_secs(1))
                    .build(),
            )
            .install_batch(runtime::Tokio)?;

        global::set_tracer_provider(tracer_provider.clone());

        Some(tracer_provider.tracer(METER_NAME))
    } else {
        None
    };

    if config.enable_metrics {
        let meter_provider = opentelemetry_otlp::new_pipeline()
            .metrics(runtime::Tokio)
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(&config.otlp_endpoint),
            )
            .with_resource(resource)
            .with_period(std::time::Duration::from_secs(30))
            .build()?;

        global::set_meter_provider(meter_provider);
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
    };

    let registry = tracing_subscriber::registry().with(fmt_layer);

    if let Some(tracer) = tracer {
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry.with(telemetry_layer).try_init()?;
    } else {
        registry.try_init()?;
    }

    info!(format = ?config.log_format, "Telemetry initialized");

    Ok(())
}

/// Flush pending spans before the process exits
pub fn shutdown_telemetry() {
    info!("🛑 Shutting down telemetry...");

    global::shutdown_tracer_provider();
}

/// Create a metric counter on the service meter
///
/// Without an installed meter provider the counter is a no-op.
pub fn create_counter(name: &str, description: &str) -> opentelemetry::metrics::Counter<u64> {
    global::meter(METER_NAME)
        .u64_counter(name.to_string())
        .with_description(description.to_string())
        .init()
}

/// Create a metric histogram on the service meter
pub fn create_histogram(name: &str, description: &str) -> opentelemetry::metrics::Histogram<f64> {
    global::meter(METER_NAME)
        .f64_histogram(name.to_string())
        .with_description(description.to_string())
        .init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, env!("CARGO_PKG_NAME"));
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_config_builder() {
        let config = TelemetryConfig::new()
            .with_service_name("test-service")
            .with_otlp_endpoint("http://localhost:4318")
            .with_metrics(false)
            .with_tracing(true)
            .with_log_level("debug")
            .with_log_format(LogFormat::Json);

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.otlp_endpoint, "http://localhost:4318");
        assert!(!config.enable_metrics);
        assert!(config.enable_tracing);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_env_value("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(""), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value("text"), LogFormat::Pretty);
    }
}
