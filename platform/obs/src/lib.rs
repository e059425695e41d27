use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Set once per process. `None` when spans are only logged locally.
static PROVIDER: OnceCell<Option<SdkTracerProvider>> = OnceCell::new();

pub const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn,sea_orm=warn";

/// Configuration for tracing initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObsConfig {
    pub service_name: &'static str,
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "employees-server",
            env_filter: None,
            otlp_endpoint: None,
        }
    }
}

impl ObsConfig {
    /// Defaults overlaid with `RUST_LOG` and `OTLP_ENDPOINT`.
    pub fn from_env() -> Self {
        Self {
            env_filter: non_blank(std::env::var("RUST_LOG").ok()),
            otlp_endpoint: non_blank(std::env::var("OTLP_ENDPOINT").ok()),
            ..Self::default()
        }
    }

    fn filter(&self) -> &str {
        self.env_filter
            .as_deref()
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(DEFAULT_FILTER)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn otlp_provider(service_name: &'static str, endpoint: &str) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()?;

    let resource = Resource::builder().with_service_name(service_name).build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

/// Install the fmt subscriber, plus an OTLP span exporter when an endpoint is
/// configured. Calling it again is a no-op.
pub fn init_tracing(config: ObsConfig) -> Result<()> {
    if PROVIDER.get().is_some() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_new(config.filter())?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let provider = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let provider = otlp_provider(config.service_name, endpoint)?;
            let tracer = provider.tracer(config.service_name);
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
            Some(provider)
        }
        None => {
            registry.try_init()?;
            None
        }
    };

    let exporting = provider.is_some();
    PROVIDER
        .set(provider)
        .map_err(|_| anyhow!("tracing already initialized"))?;
    tracing::debug!(service = config.service_name, exporting, "tracing initialized");
    Ok(())
}

/// Flush buffered spans before the process exits.
pub fn shutdown_tracing() {
    if let Some(Some(provider)) = PROVIDER.get() {
        if let Err(err) = provider.shutdown() {
            tracing::warn!(error = %err, "failed to flush OTLP spans");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_default() {
        let config = ObsConfig {
            env_filter: Some("debug".into()),
            ..ObsConfig::default()
        };
        assert_eq!(config.filter(), "debug");
    }

    #[test]
    fn blank_filter_falls_back() {
        let config = ObsConfig {
            env_filter: Some("  ".into()),
            ..ObsConfig::default()
        };
        assert_eq!(config.filter(), DEFAULT_FILTER);
    }

    #[test]
    fn blank_env_values_count_as_unset() {
        assert_eq!(non_blank(Some(" ".into())), None);
        assert_eq!(non_blank(Some("http://otel:4318".into())).as_deref(), Some("http://otel:4318"));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(ObsConfig::default().filter()).is_ok());
    }
}
