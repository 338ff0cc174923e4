//! Wiring configuration to a ready pipeline.

use scenecut_error::{ConfigError, ScenecutResult};
use scenecut_interface::ScenecutDriver;
use scenecut_models::RateLimitedDriver;
use scenecut_rate_limit::ScenecutConfig;
use scenecut_segment::{PipelineConfig, ScenePipeline};
use tracing::{debug, instrument};

/// Pipeline settings taken from a loaded configuration.
pub fn pipeline_config(config: &ScenecutConfig) -> PipelineConfig {
    PipelineConfig::new(config.chunking, config.extraction.clone())
}

/// Build a pipeline whose driver calls go through the provider's rate limits.
///
/// The tier is looked up under the driver's provider name, falling back to
/// the provider's default tier, and narrowed to the driver's model.
///
/// # Errors
///
/// Returns a configuration error when the provider or tier is not configured.
///
/// # Examples
///
/// ```no_run
/// use scenecut::{OpenRouterDriver, ScenecutConfig, DEFAULT_OPENROUTER_MODEL, rate_limited_pipeline};
///
/// # async fn demo(text: &str) -> scenecut::ScenecutResult<()> {
/// let config = ScenecutConfig::load()?;
/// let driver = OpenRouterDriver::new(DEFAULT_OPENROUTER_MODEL)?;
/// let pipeline = rate_limited_pipeline(driver, &config, None)?;
/// let scenes = pipeline.segment(text).await?;
/// # Ok(())
/// # }
/// ```
#[instrument(skip(driver, config), fields(provider = driver.provider_name(), model = driver.model_name()))]
pub fn rate_limited_pipeline<D: ScenecutDriver>(
    driver: D,
    config: &ScenecutConfig,
    tier: Option<&str>,
) -> ScenecutResult<ScenePipeline<RateLimitedDriver<D>>> {
    let provider = driver.provider_name();
    let tier_config = config
        .get_tier(provider, tier)
        .ok_or_else(|| {
            ConfigError::new(format!(
                "No tier '{}' configured for provider '{}'",
                tier.unwrap_or("default"),
                provider
            ))
        })?
        .for_model(driver.model_name());

    debug!(tier = %tier_config.name, rpm = ?tier_config.rpm, "Using rate limit tier");
    Ok(ScenePipeline::new(
        RateLimitedDriver::new(driver, tier_config),
        pipeline_config(config),
    ))
}
