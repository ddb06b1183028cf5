//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name on every exported span.
pub const SERVICE_NAME: &str = "Stockboard";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "stockboard-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` (default `info`) feeding an OpenTelemetry layer that
/// exports to `~/.local/share/zellij/stockboard/stockboard-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created the plugin
/// runs without a subscriber. Only the first call takes effect.
///
/// # Example
///
/// ```rust
/// use stockboard::observability::init_tracing;
/// use stockboard::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider =
        tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
