//! Rate limiter built on governor and a Tokio semaphore.
//!
//! Governor's GCRA limiters enforce the per-minute and per-day quotas; the
//! semaphore caps requests in flight.

use crate::Tier;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use scenecut_error::RetryableError;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on permits when a tier declares no concurrency limit.
const UNBOUNDED_CONCURRENCY: usize = Semaphore::MAX_PERMITS;

/// Enforces a tier's quotas.
///
/// Cloning is cheap and clones share the same quotas.
///
/// # Example
///
/// ```
/// use scenecut_rate_limit::{RateLimiter, TierConfig};
/// use std::collections::HashMap;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tier = TierConfig {
///     name: "Local".to_string(),
///     rpm: Some(600),
///     tpm: None,
///     rpd: None,
///     max_concurrent: Some(1),
///     models: HashMap::new(),
/// };
/// let limiter = RateLimiter::new(tier);
///
/// let guard = limiter.acquire(250).await;
/// assert!(limiter.try_acquire(250).is_none());
/// drop(guard);
/// # }
/// ```
#[derive(Clone)]
pub struct RateLimiter<T: Tier> {
    inner: T,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    tpm_limiter: Option<(Arc<DirectRateLimiter>, NonZeroU32)>,
    rpd_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl<T: Tier> RateLimiter<T> {
    /// Create a limiter enforcing every limit the tier declares.
    pub fn new(tier: T) -> Self {
        let rpm_limiter = tier
            .rpm()
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        // Governor counts in u32; larger budgets are capped.
        let tpm_limiter = tier
            .tpm()
            .and_then(|tpm| NonZeroU32::new(tpm.min(u32::MAX as u64) as u32))
            .map(|n| (Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))), n));

        // The whole daily budget is available as a burst, replenished evenly.
        let rpd_limiter = tier.rpd().and_then(NonZeroU32::new).and_then(|n| {
            Quota::with_period(DAY / n.get())
                .map(|quota| Arc::new(GovernorRateLimiter::direct(quota.allow_burst(n))))
        });

        let max_concurrent = tier
            .max_concurrent()
            .map(|n| (n as usize).clamp(1, UNBOUNDED_CONCURRENCY))
            .unwrap_or(UNBOUNDED_CONCURRENCY);

        debug!(
            tier = tier.name(),
            rpm = ?tier.rpm(),
            tpm = ?tier.tpm(),
            rpd = ?tier.rpd(),
            max_concurrent,
            "Created rate limiter"
        );

        Self {
            inner: tier,
            rpm_limiter,
            tpm_limiter,
            rpd_limiter,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// The tier this limiter enforces.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Wait until every quota admits a request of `estimated_tokens`.
    ///
    /// The returned guard holds a concurrency slot until dropped.
    pub async fn acquire(&self, estimated_tokens: u64) -> RateLimiterGuard {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        if let Some((limiter, capacity)) = &self.tpm_limiter {
            let tokens = token_cells(estimated_tokens, *capacity);
            if limiter.until_n_ready(tokens).await.is_err() {
                warn!(tokens = tokens.get(), "Token estimate exceeds the per-minute budget");
            }
        }

        if let Some(limiter) = &self.rpd_limiter {
            limiter.until_ready().await;
        }

        // Last, so a slot is never held while waiting on quotas.
        let permit = self.concurrent_semaphore.clone().acquire_owned().await.ok();

        RateLimiterGuard { _permit: permit }
    }

    /// Acquire without waiting; `None` if any quota would block.
    pub fn try_acquire(&self, estimated_tokens: u64) -> Option<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        if let Some((limiter, capacity)) = &self.tpm_limiter {
            let tokens = token_cells(estimated_tokens, *capacity);
            if !matches!(limiter.check_n(tokens), Ok(Ok(()))) {
                return None;
            }
        }

        if let Some(limiter) = &self.rpd_limiter {
            limiter.check().ok()?;
        }

        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;

        Some(RateLimiterGuard {
            _permit: Some(permit),
        })
    }

    /// Run `operation` under the limiter, retrying transient failures.
    ///
    /// Each attempt acquires quota first. Retryable errors back off
    /// exponentially from 2s, doubling up to 60s with jitter, for at most five
    /// retries; other errors return immediately.
    pub async fn execute<F, Fut, R, E>(&self, estimated_tokens: u64, operation: F) -> Result<R, E>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
        E: RetryableError + std::fmt::Display,
    {
        let retry_strategy = ExponentialBackoff::from_millis(2000)
            .factor(2)
            .max_delay(Duration::from_secs(60))
            .map(jitter)
            .take(5);

        let operation = &operation;
        Retry::spawn(retry_strategy, || async move {
            let _guard = self.acquire(estimated_tokens).await;

            match operation().await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(tier = self.inner.name(), "Transient error, will retry: {}", e);
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(tier = self.inner.name(), "Permanent error, failing immediately: {}", e);
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }
}

fn token_cells(estimated_tokens: u64, capacity: NonZeroU32) -> NonZeroU32 {
    let clamped = estimated_tokens.clamp(1, capacity.get() as u64) as u32;
    NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN)
}

/// Holds a concurrency slot; released on drop.
pub struct RateLimiterGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
