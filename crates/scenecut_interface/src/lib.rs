//! Trait definitions for the scenecut pipeline.
//!
//! The pipeline treats the generative model as an external capability:
//! send a system instruction and a prompt, receive text. [`ScenecutDriver`]
//! is that seam.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::ScenecutDriver;
