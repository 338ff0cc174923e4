//! Rate-limited driver wrapper.

use async_trait::async_trait;
use scenecut_core::{GenerateRequest, GenerateResponse};
use scenecut_error::ScenecutResult;
use scenecut_interface::ScenecutDriver;
use scenecut_rate_limit::{RateLimiter, Tier, TierConfig};
use tracing::{debug, instrument};

/// Runs every generation call of an inner driver through a [`RateLimiter`].
///
/// Transient provider failures (429, 5xx, transport errors) are retried with
/// backoff; everything else is returned on the first failure.
#[derive(Clone)]
pub struct RateLimitedDriver<D, T: Tier = TierConfig> {
    driver: D,
    limiter: RateLimiter<T>,
}

impl<D: ScenecutDriver, T: Tier> RateLimitedDriver<D, T> {
    /// Wrap `driver` with quotas from `tier`.
    pub fn new(driver: D, tier: T) -> Self {
        Self {
            driver,
            limiter: RateLimiter::new(tier),
        }
    }

    /// The wrapped driver.
    pub fn inner(&self) -> &D {
        &self.driver
    }

    /// The limiter shared by clones of this driver.
    pub fn limiter(&self) -> &RateLimiter<T> {
        &self.limiter
    }
}

/// Rough token count: four bytes per token, at least one.
pub(crate) fn estimate_tokens(req: &GenerateRequest) -> u64 {
    let prompt = (req.char_len() / 4).max(1) as u64;
    prompt + req.max_tokens.map(u64::from).unwrap_or(0)
}

#[async_trait]
impl<D: ScenecutDriver, T: Tier> ScenecutDriver for RateLimitedDriver<D, T> {
    #[instrument(skip(self, req), fields(provider = self.driver.provider_name(), tier = self.limiter.inner().name()))]
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        let estimated_tokens = estimate_tokens(req);
        debug!(estimated_tokens, "Acquiring rate limit");
        self.limiter
            .execute(estimated_tokens, || self.driver.generate(req))
            .await
    }

    fn provider_name(&self) -> &'static str {
        self.driver.provider_name()
    }

    fn model_name(&self) -> &str {
        self.driver.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenecut_core::Message;

    #[test]
    fn estimate_counts_prompt_and_completion_budget() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::system("abcd"), Message::user("efghijkl")])
            .max_tokens(Some(10))
            .build()
            .unwrap();
        assert_eq!(estimate_tokens(&req), 3 + 10);

        let empty = GenerateRequest::default();
        assert_eq!(estimate_tokens(&empty), 1);
    }
}
