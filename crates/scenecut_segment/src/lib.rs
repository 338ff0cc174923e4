//! Segmentation, extraction and reconciliation for scenecut.
//!
//! Long prose is split into chunks near a word budget, each chunk is turned
//! into structured scenes by a generation driver (with one repair attempt on
//! malformed output), and scenes that straddle a chunk boundary are merged.
//!
//! # Example
//!
//! ```no_run
//! use scenecut_segment::segment;
//! # async fn demo(driver: &dyn scenecut_interface::ScenecutDriver, text: &str) -> scenecut_error::ScenecutResult<()> {
//! let scenes = segment(driver, text, 5000, 500, 1000).await?;
//! println!("{} scenes", scenes.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod break_finder;
mod extraction;
mod extractor;
mod pipeline;
pub mod prompts;
mod query;
mod reconciler;
mod splitter;

pub use break_finder::find_break;
pub use extraction::{extract_json_array, extract_json_object, parse_scene, parse_scenes, preview};
pub use extractor::{Extraction, SceneExtractor};
pub use pipeline::{ChunkReport, PipelineConfig, ScenePipeline, SegmentationRun, segment};
pub use reconciler::{BoundaryOutcome, BoundaryReconciler, parse_continuation};
pub use splitter::ChunkSplitter;
