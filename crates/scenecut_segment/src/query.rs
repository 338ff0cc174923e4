//! Single model call shared by extraction and reconciliation.

use scenecut_core::ExtractionConfig;
use scenecut_error::ScenecutResult;
use scenecut_interface::ScenecutDriver;

/// Send one system instruction and prompt, applying the configured sampling settings.
pub(crate) async fn ask<D>(
    driver: &D,
    config: &ExtractionConfig,
    system: &str,
    prompt: &str,
) -> ScenecutResult<String>
where
    D: ScenecutDriver + ?Sized,
{
    driver
        .generate_text_with(system, prompt, *config.max_tokens(), *config.temperature())
        .await
}
