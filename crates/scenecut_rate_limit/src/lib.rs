//! Rate limiting and configuration.
//!
//! Splitting a long text fans out one extraction call per chunk. Providers
//! cap requests per minute, tokens per minute, requests per day and
//! concurrent requests; [`RateLimiter`] enforces whichever of those a
//! [`Tier`] declares and retries transient failures with backoff.
//!
//! Limits and pipeline settings are loaded from TOML by [`ScenecutConfig`]:
//!
//! ```no_run
//! use scenecut_rate_limit::{RateLimiter, ScenecutConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScenecutConfig::load()?;
//! let tier = config.get_tier("openrouter", None).unwrap();
//! let limiter = RateLimiter::new(tier);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;
mod tier;

pub use config::{ModelTierConfig, ProviderConfig, ScenecutConfig, TierConfig};
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use tier::Tier;
