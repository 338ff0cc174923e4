//! Core data types for the scenecut pipeline.
//!
//! This crate provides the types shared across every scenecut crate: the
//! [`Scene`] record produced by extraction, the [`Chunk`] produced by the
//! splitter, the request/response types exchanged with a generation driver,
//! and the serde-backed pipeline settings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod message;
mod output;
mod request;
mod role;
mod scene;

pub use chunk::Chunk;
pub use config::{ChunkingConfig, ExtractionConfig};
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use scene::{Scene, SceneField};
