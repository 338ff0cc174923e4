//! TOML configuration.
//!
//! Sources, later overriding earlier:
//! - bundled defaults (`scenecut.toml` at the workspace root)
//! - `~/.config/scenecut/scenecut.toml`
//! - `./scenecut.toml`

use crate::Tier;
use config::{Config, File, FileFormat};
use scenecut_core::{ChunkingConfig, ExtractionConfig};
use scenecut_error::{ConfigError, ScenecutError, ScenecutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../scenecut.toml");

/// Per-model overrides of a tier's limits.
///
/// ```toml
/// [providers.openrouter.tiers.free.models."deepseek/deepseek-r1"]
/// rpm = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ModelTierConfig {
    /// Requests per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<u32>,

    /// Tokens per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpm: Option<u64>,

    /// Requests per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpd: Option<u32>,

    /// Concurrent requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<u32>,
}

/// Limits for one provider tier.
///
/// ```toml
/// [providers.openrouter.tiers.free]
/// name = "Free"
/// rpm = 20
/// rpd = 50
/// max_concurrent = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TierConfig {
    /// Tier name, e.g. "Free"
    pub name: String,

    /// Requests per minute
    #[serde(default)]
    pub rpm: Option<u32>,

    /// Tokens per minute
    #[serde(default)]
    pub tpm: Option<u64>,

    /// Requests per day
    #[serde(default)]
    pub rpd: Option<u32>,

    /// Concurrent requests
    #[serde(default)]
    pub max_concurrent: Option<u32>,

    /// Overrides keyed by model identifier
    #[serde(default)]
    pub models: HashMap<String, ModelTierConfig>,
}

impl Tier for TierConfig {
    fn rpm(&self) -> Option<u32> {
        self.rpm
    }

    fn tpm(&self) -> Option<u64> {
        self.tpm
    }

    fn rpd(&self) -> Option<u32> {
        self.rpd
    }

    fn max_concurrent(&self) -> Option<u32> {
        self.max_concurrent
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TierConfig {
    /// The tier with any overrides for `model_name` applied.
    pub fn for_model(&self, model_name: &str) -> TierConfig {
        match self.models.get(model_name) {
            Some(model) => TierConfig {
                name: self.name.clone(),
                rpm: model.rpm.or(self.rpm),
                tpm: model.tpm.or(self.tpm),
                rpd: model.rpd.or(self.rpd),
                max_concurrent: model.max_concurrent.or(self.max_concurrent),
                models: HashMap::new(),
            },
            None => self.clone(),
        }
    }
}

/// Tiers offered by one provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Tier used when none is named
    pub default_tier: String,

    /// Tier name to limits
    pub tiers: HashMap<String, TierConfig>,
}

/// Top-level scenecut configuration.
///
/// # Example
///
/// ```no_run
/// use scenecut_rate_limit::ScenecutConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScenecutConfig::load()?;
/// println!("target words: {}", config.chunking.target_chunk_words());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct ScenecutConfig {
    /// Provider name to tiers
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Splitter settings
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl ScenecutConfig {
    /// Load configuration from a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScenecutResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ScenecutError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScenecutError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load bundled defaults merged with user overrides.
    ///
    /// User files are optional and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or the merged settings
    /// fail validation.
    #[instrument]
    pub fn load() -> ScenecutResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scenecut/scenecut.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("scenecut").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                ScenecutError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScenecutError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Tier for a provider, falling back to the provider's default tier.
    pub fn get_tier(&self, provider: &str, tier_name: Option<&str>) -> Option<TierConfig> {
        let provider_config = self.providers.get(provider)?;
        let tier_name = tier_name.unwrap_or(provider_config.default_tier.as_str());
        provider_config.tiers.get(tier_name).cloned()
    }

    /// Checks the pipeline settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending setting.
    pub fn validate(&self) -> ScenecutResult<()> {
        self.chunking
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid [chunking]: {}", e)))?;
        self.extraction
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid [extraction]: {}", e)))?;
        Ok(())
    }
}
