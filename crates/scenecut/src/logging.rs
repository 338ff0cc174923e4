//! Tracing subscriber setup.

use scenecut_error::{ConfigError, ScenecutResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How log output is filtered and formatted.
///
/// # Examples
///
/// ```
/// use scenecut::LoggingConfig;
///
/// let config = LoggingConfig::default()
///     .with_log_level("scenecut_segment=debug,info")
///     .with_json_logs(true);
/// assert_eq!(config.service_name(), "scenecut");
/// assert!(*config.json_logs());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default)]
#[setters(prefix = "with_", into)]
pub struct LoggingConfig {
    /// Name recorded when logging starts
    service_name: String,
    /// Filter directives used when `RUST_LOG` is unset (e.g. "info")
    log_level: String,
    /// Emit one JSON object per event instead of text
    json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Install the global subscriber with default settings.
///
/// # Errors
///
/// See [`init_logging_with_config`].
pub fn init_logging() -> ScenecutResult<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`.
///
/// # Errors
///
/// Returns a configuration error if the filter does not parse or a global
/// subscriber is already installed.
pub fn init_logging_with_config(config: &LoggingConfig) -> ScenecutResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            ConfigError::new(format!("Invalid log filter '{}': {}", config.log_level, e))
        })?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        service = %config.service_name,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}
