//! Scenecut - structured scenes from long prose
//!
//! Scenecut splits narrative text that is far too long for one model call into
//! chunks, asks a generative model for the scenes in each chunk, repairs
//! malformed answers once, and merges scenes that a chunk boundary cut in two.
//!
//! # Quick Start
//!
//! ```no_run
//! use scenecut::{OpenRouterDriver, ScenecutConfig, DEFAULT_OPENROUTER_MODEL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     scenecut::init_logging()?;
//!
//!     let config = ScenecutConfig::load()?;
//!     let driver = OpenRouterDriver::new(DEFAULT_OPENROUTER_MODEL)?;
//!     let pipeline = scenecut::rate_limited_pipeline(driver, &config, None)?;
//!
//!     let text = std::fs::read_to_string("novel.txt")?;
//!     let run = pipeline.run(&text).await?;
//!     for scene in run.scenes() {
//!         println!("{} | {}", scene.setting(), scene.current_action());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `scenecut_core` - Scene, Chunk, request/response and settings types
//! - `scenecut_interface` - the `ScenecutDriver` generation trait
//! - `scenecut_error` - error types
//! - `scenecut_rate_limit` - TOML configuration, rate limiting and retry
//! - `scenecut_models` - HTTP drivers
//! - `scenecut_segment` - splitting, extraction, repair and reconciliation
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod logging;
mod setup;

pub use scenecut_core::*;
pub use scenecut_error::*;
pub use scenecut_interface::*;
pub use scenecut_models::{
    DEFAULT_OPENROUTER_MODEL, OPENROUTER_ENDPOINT, OpenAICompatibleClient, OpenRouterDriver,
    RateLimitedDriver,
};
pub use scenecut_rate_limit::{
    ModelTierConfig, ProviderConfig, RateLimiter, RateLimiterGuard, ScenecutConfig, Tier,
    TierConfig,
};
pub use scenecut_segment::{
    BoundaryOutcome, BoundaryReconciler, ChunkReport, ChunkSplitter, Extraction, PipelineConfig,
    SceneExtractor, ScenePipeline, SegmentationRun, extract_json_array, extract_json_object,
    find_break, parse_continuation, parse_scene, parse_scenes, preview, prompts, segment,
};

pub use logging::{LoggingConfig, init_logging, init_logging_with_config};
pub use setup::{pipeline_config, rate_limited_pipeline};
