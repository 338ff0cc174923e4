//! Generation provider drivers for scenecut.
//!
//! The pipeline only needs "send a system instruction and a prompt, receive
//! text". This crate supplies drivers that do that over HTTP:
//!
//! - [`OpenAICompatibleClient`] speaks the chat-completions protocol shared by
//!   most hosted providers.
//! - [`OpenRouterDriver`] points that client at OpenRouter.
//! - [`RateLimitedDriver`] wraps any driver with tier quotas and retry.
//!
//! # Example
//!
//! ```no_run
//! use scenecut_interface::ScenecutDriver;
//! use scenecut_models::{OpenRouterDriver, RateLimitedDriver};
//! use scenecut_rate_limit::ScenecutConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScenecutConfig::load()?;
//! let driver = OpenRouterDriver::new(scenecut_models::DEFAULT_OPENROUTER_MODEL)?;
//! let tier = config.get_tier("openrouter", None).unwrap();
//! let driver = RateLimitedDriver::new(driver, tier);
//!
//! let reply = driver.generate_text("Answer briefly.", "Say hello").await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod limited;
mod openai_compat;
mod openrouter;

pub use limited::RateLimitedDriver;
pub use openai_compat::OpenAICompatibleClient;
pub use openrouter::{DEFAULT_OPENROUTER_MODEL, OPENROUTER_ENDPOINT, OpenRouterDriver};
