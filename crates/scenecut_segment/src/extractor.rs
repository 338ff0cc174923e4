//! Structured scene extraction with one repair attempt.

use crate::extraction::{extract_json_array, parse_scenes, preview};
use crate::prompts::{EXTRACTION_SYSTEM, REPAIR_SYSTEM, extraction_prompt, repair_prompt};
use crate::query::ask;
use scenecut_core::{ExtractionConfig, Scene};
use scenecut_error::{ScenecutError, SegmentError, SegmentErrorKind};
use scenecut_interface::ScenecutDriver;
use tracing::{debug, error, instrument, warn};

/// Scenes recovered from one chunk.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Extraction {
    /// Scenes in narrative order
    scenes: Vec<Scene>,
    /// Whether the repair call produced them
    repaired: bool,
}

impl Extraction {
    /// Take the scenes.
    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }
}

/// Result of one model call, classified.
///
/// Only repairable validation failures are `Invalid`; anything else the
/// repair prompt cannot fix is `Unavailable`.
enum Attempt {
    Valid(Vec<Scene>),
    Invalid {
        reply: String,
        payload: String,
        error: SegmentErrorKind,
    },
    Unavailable(ScenecutError),
}

/// Extracts scenes from chunk text through a generation driver.
///
/// A malformed reply (not an array, or elements that are not valid scenes)
/// gets exactly one repair call. A driver failure is not a malformed reply and
/// is never repaired.
#[derive(derive_new::new)]
pub struct SceneExtractor<'a, D: ?Sized> {
    driver: &'a D,
    config: &'a ExtractionConfig,
}

impl<D: ScenecutDriver + ?Sized> SceneExtractor<'_, D> {
    /// Extract the scenes of chunk `chunk`.
    ///
    /// # Errors
    ///
    /// [`SegmentErrorKind::ExtractionFailed`] when the first attempt and the
    /// repair both fail, or when the driver fails.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn extract(&self, chunk: usize, text: &str) -> Result<Extraction, SegmentError> {
        let (reply, payload, initial) =
            match self.attempt(EXTRACTION_SYSTEM, &extraction_prompt(text)).await {
                Attempt::Valid(scenes) => {
                    debug!(scenes = scenes.len(), "Extraction succeeded");
                    return Ok(Extraction {
                        scenes,
                        repaired: false,
                    });
                }
                Attempt::Unavailable(e) => {
                    error!(error = %e, "Extraction call failed");
                    return Err(SegmentError::new(SegmentErrorKind::ExtractionFailed {
                        chunk,
                        initial: e.to_string(),
                        repair: "not attempted".to_string(),
                    }));
                }
                Attempt::Invalid {
                    reply,
                    payload,
                    error,
                } => (reply, payload, error),
            };

        warn!(error = %initial, "Extraction reply invalid, attempting repair");

        let malformed = if payload.trim().is_empty() {
            reply
        } else {
            payload
        };
        let prompt = repair_prompt(text, &malformed, &error_detail(&initial));

        let repair = match self.attempt(REPAIR_SYSTEM, &prompt).await {
            Attempt::Valid(scenes) => {
                debug!(scenes = scenes.len(), "Repair succeeded");
                return Ok(Extraction {
                    scenes,
                    repaired: true,
                });
            }
            Attempt::Invalid { error, .. } => error.to_string(),
            Attempt::Unavailable(e) => e.to_string(),
        };

        error!(initial = %initial, repair = %repair, "Repair failed, chunk yields no scenes");
        Err(SegmentError::new(SegmentErrorKind::ExtractionFailed {
            chunk,
            initial: initial.to_string(),
            repair,
        }))
    }

    async fn attempt(&self, system: &str, prompt: &str) -> Attempt {
        let reply = match ask(self.driver, self.config, system, prompt).await {
            Ok(reply) => reply,
            Err(e) => return Attempt::Unavailable(e),
        };

        let preview_chars = *self.config.payload_preview_chars();
        debug!(reply = %preview(&reply, preview_chars), "Model reply");

        let payload = extract_json_array(&reply).to_string();
        match parse_scenes(&payload, preview_chars) {
            Ok(scenes) => Attempt::Valid(scenes),
            Err(error) if error.is_repairable() => Attempt::Invalid {
                reply,
                payload,
                error,
            },
            Err(error) => Attempt::Unavailable(SegmentError::new(error).into()),
        }
    }
}

/// The part of a validation failure worth showing the model.
fn error_detail(error: &SegmentErrorKind) -> String {
    match error {
        SegmentErrorKind::Schema { errors, .. } => errors.join("\n"),
        SegmentErrorKind::Structural { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
