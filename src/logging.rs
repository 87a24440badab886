use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging config: {0}")]
    Config(String),

    #[error("invalid log filter '{directives}': {source}")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),

    #[cfg(feature = "loki")]
    #[error("failed to set up loki exporter: {0}")]
    Loki(String),
}

/// Console output shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggingError::Config(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, from RUST_LOG
    pub directives: String,
    pub format: LogFormat,
    pub service_name: String,
    pub environment: String,
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_DIRECTIVES.to_string(),
            format: LogFormat::Text,
            service_name: "tickerfeed".to_string(),
            environment: "development".to_string(),
            loki_enabled: false,
            loki_url: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, LoggingError> {
        let defaults = Self::default();
        let format = match std::env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.format,
        };

        Ok(Self {
            directives: std::env::var("RUST_LOG").unwrap_or(defaults.directives),
            format,
            service_name: std::env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            loki_enabled: std::env::var("LOKI_ENABLED")
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
            loki_url: std::env::var("LOKI_URL").ok().filter(|u| !u.trim().is_empty()),
        })
    }

    pub fn validate(&self) -> Result<(), LoggingError> {
        if self.service_name.trim().is_empty() {
            return Err(LoggingError::Config("SERVICE_NAME must not be empty".to_string()));
        }
        if self.loki_enabled {
            let loki_url = self.loki_url.as_deref().ok_or_else(|| {
                LoggingError::Config("LOKI_ENABLED is set but LOKI_URL is not".to_string())
            })?;
            url::Url::parse(loki_url).map_err(|e| {
                LoggingError::Config(format!("invalid LOKI_URL '{}': {}", loki_url, e))
            })?;
        }
        Ok(())
    }

    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.directives).map_err(|source| LoggingError::Filter {
            directives: self.directives.clone(),
            source,
        })
    }
}

/// Install the global subscriber: filter, one console layer in the configured
/// format, and the Loki exporter when enabled.
///
/// Must run inside the tokio runtime when Loki is enabled.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    config.validate()?;
    let filter = config.env_filter()?;

    let (text, json) = match config.format {
        LogFormat::Text => (Some(fmt::layer()), None),
        LogFormat::Json => (None, Some(fmt::layer().json())),
    };

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json);

    #[cfg(feature = "loki")]
    let registry = registry.with(loki_layer(config)?);

    registry.try_init()?;

    #[cfg(not(feature = "loki"))]
    if config.loki_enabled {
        tracing::warn!("LOKI_ENABLED is set but this build has no loki support");
    }

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        format = ?config.format,
        "📊 Logging initialized"
    );
    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> Result<Option<tracing_loki::Layer>, LoggingError> {
    let loki_url = match config.loki_url.as_deref() {
        Some(url) if config.loki_enabled => url,
        _ => return Ok(None),
    };
    let url = url::Url::parse(loki_url).map_err(|e| LoggingError::Loki(e.to_string()))?;

    let (layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)
        .and_then(|b| b.label("environment", &config.environment))
        .and_then(|b| b.build_url(url))
        .map_err(|e| LoggingError::Loki(e.to_string()))?;

    // ships buffered events to Loki
    tokio::spawn(task);
    Ok(Some(layer))
}
