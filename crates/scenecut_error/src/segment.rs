//! Segmentation error types.

/// Specific error conditions for chunking, extraction and reconciliation.
///
/// `Structural` and `Schema` are the expected outcomes of a malformed model
/// response and drive the repair attempt. `AmbiguousDecision` and
/// `MergeSynthesis` never reach callers as failures; they are recorded and
/// resolved to the non-merging branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SegmentErrorKind {
    /// Splitter parameters cannot produce a partition
    #[display("Invalid segmentation input: {}", _0)]
    InvalidInput(String),
    /// Produced chunks do not cover the input exactly
    #[display("Chunks cover {} of {} bytes", covered, expected)]
    Partition {
        /// Length of the input text
        expected: usize,
        /// Bytes accounted for by the chunks
        covered: usize,
    },
    /// Response payload is not a JSON array
    #[display("Structural error: {} (payload: {})", message, payload_preview)]
    Structural {
        /// Decoder or shape message
        message: String,
        /// Leading part of the payload that failed
        payload_preview: String,
    },
    /// Array elements failed the five-field scene validation
    #[display("Schema error: {} (payload: {})", errors.join("; "), payload_preview)]
    Schema {
        /// One entry per failing element
        errors: Vec<String>,
        /// Leading part of the payload that failed
        payload_preview: String,
    },
    /// Both the extraction and the repair attempt failed for a chunk
    #[display("Chunk {} extraction failed: initial: {}; repair: {}", chunk, initial, repair)]
    ExtractionFailed {
        /// Zero-based chunk index
        chunk: usize,
        /// Failure of the first attempt
        initial: String,
        /// Failure of the repair attempt
        repair: String,
    },
    /// Continuation reply was neither yes nor no
    #[display("Ambiguous continuation reply: {}", _0)]
    AmbiguousDecision(String),
    /// Merge reply did not validate as a single scene
    #[display("Merge synthesis failed: {}", _0)]
    MergeSynthesis(String),
}

impl SegmentErrorKind {
    /// Whether this is a malformed-response failure the repair prompt can address.
    pub fn is_repairable(&self) -> bool {
        matches!(
            self,
            SegmentErrorKind::Structural { .. } | SegmentErrorKind::Schema { .. }
        )
    }
}

/// Error type for segmentation operations.
///
/// # Examples
///
/// ```
/// use scenecut_error::{SegmentError, SegmentErrorKind};
///
/// let err = SegmentError::new(SegmentErrorKind::InvalidInput("target_chunk_words is 0".into()));
/// assert!(format!("{}", err).contains("target_chunk_words"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Segment Error: {} at line {} in {}", kind, line, file)]
pub struct SegmentError {
    /// The specific error condition
    pub kind: SegmentErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SegmentError {
    /// Create a new SegmentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SegmentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
