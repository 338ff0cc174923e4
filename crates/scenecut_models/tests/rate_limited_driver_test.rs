mod test_utils;

use scenecut_error::{ModelsErrorKind, ScenecutErrorKind};
use scenecut_interface::ScenecutDriver;
use scenecut_models::RateLimitedDriver;
use scenecut_rate_limit::TierConfig;
use std::collections::HashMap;
use test_utils::{MockDriver, MockResponse};

fn open_tier() -> TierConfig {
    TierConfig {
        name: "Open".to_string(),
        rpm: None,
        tpm: Some(1_000_000),
        rpd: None,
        max_concurrent: Some(2),
        models: HashMap::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_response_is_retried() -> anyhow::Result<()> {
    let driver = RateLimitedDriver::new(
        MockDriver::new(vec![
            MockResponse::Fail(ModelsErrorKind::RateLimit),
            MockResponse::Fail(ModelsErrorKind::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            MockResponse::Text("Yes".to_string()),
        ]),
        open_tier(),
    );

    let reply = driver.generate_text("system", "prompt").await?;

    assert_eq!(reply, "Yes");
    assert_eq!(driver.inner().call_count(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_permanent_error_is_not_retried() {
    let driver = RateLimitedDriver::new(
        MockDriver::new(vec![MockResponse::Fail(ModelsErrorKind::ModelNotFound(
            "missing/model".to_string(),
        ))]),
        open_tier(),
    );

    let err = driver.generate_text("system", "prompt").await.unwrap_err();

    assert!(matches!(err.kind(), ScenecutErrorKind::Models(_)));
    assert_eq!(driver.inner().call_count(), 1);
}

#[tokio::test]
async fn test_wrapper_reports_inner_identity() {
    let driver = RateLimitedDriver::new(MockDriver::new(Vec::new()), open_tier());
    assert_eq!(driver.provider_name(), "mock");
    assert_eq!(driver.model_name(), "mock-model");
    assert_eq!(driver.generate_text("s", "p").await.unwrap(), "ok");
}
