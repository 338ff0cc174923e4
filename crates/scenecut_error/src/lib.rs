//! Error types for the scenecut workspace.
//!
//! This crate provides the foundation error types used by every other scenecut crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use scenecut_error::{ScenecutResult, HttpError};
//!
//! fn fetch_data() -> ScenecutResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod leaf;
mod models;
mod retry;
mod segment;

pub use error::{ScenecutError, ScenecutErrorKind, ScenecutResult};
pub use leaf::{BackendError, ConfigError, HttpError, JsonError};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use retry::RetryableError;
pub use segment::{SegmentError, SegmentErrorKind};
