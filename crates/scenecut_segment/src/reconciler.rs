//! Boundary reconciliation between adjacent chunks.
//!
//! Each chunk's scenes are folded into one accumulated list, left to right.
//! At every boundary the last accumulated scene and the first incoming scene
//! are put to the model as a yes/no continuation question; a yes triggers a
//! merge request whose single scene replaces the pair.

use crate::extraction::{extract_json_object, parse_scene, preview};
use crate::prompts::{CONTINUATION_SYSTEM, MERGE_SYSTEM, continuation_prompt, merge_prompt};
use crate::query::ask;
use scenecut_core::{ExtractionConfig, Scene};
use scenecut_error::SegmentErrorKind;
use scenecut_interface::ScenecutDriver;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// What happened at one chunk boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryOutcome {
    /// The pair was replaced by the synthesized scene
    Merged,
    /// The model answered no; scenes appended unchanged
    Distinct,
    /// The reply was neither yes nor no; treated as no
    Ambiguous(String),
    /// The model answered yes but the merged scene did not validate
    MergeFailed(String),
    /// A model call failed outright; scenes appended unchanged
    QueryFailed(String),
    /// The incoming chunk had no scenes
    SkippedEmptyChunk,
    /// Nothing accumulated yet; scenes appended without comparison
    SkippedEmptyAccumulator,
}

impl BoundaryOutcome {
    /// Whether the boundary collapsed two scenes into one.
    pub fn merged(&self) -> bool {
        matches!(self, BoundaryOutcome::Merged)
    }
}

/// Read a continuation reply as yes or no.
///
/// Case, surrounding whitespace, quotes, backticks and a trailing full stop
/// or exclamation mark are ignored. Anything else is `None`.
///
/// # Examples
///
/// ```
/// use scenecut_segment::parse_continuation;
///
/// assert_eq!(parse_continuation(" `Yes.` "), Some(true));
/// assert_eq!(parse_continuation("\"no\""), Some(false));
/// assert_eq!(parse_continuation("Yes, they continue"), None);
/// ```
pub fn parse_continuation(reply: &str) -> Option<bool> {
    let normalized: String = reply
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '`' | '"' | '\''))
        .collect();

    match normalized.trim().trim_end_matches(['.', '!']) {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

enum Decision {
    Continue,
    Stop(BoundaryOutcome),
}

/// Sequential owner of the accumulated scene list.
///
/// Each [`reconcile`](Self::reconcile) finishes its model calls before it
/// touches the list, so dropping the future mid-call leaves the list as it was
/// after the previous boundary.
pub struct BoundaryReconciler<'a, D: ?Sized> {
    driver: &'a D,
    config: &'a ExtractionConfig,
    accumulated: Vec<Scene>,
    outcomes: Vec<BoundaryOutcome>,
}

impl<'a, D: ScenecutDriver + ?Sized> BoundaryReconciler<'a, D> {
    /// Start with an empty list.
    pub fn new(driver: &'a D, config: &'a ExtractionConfig) -> Self {
        Self {
            driver,
            config,
            accumulated: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Seed the list with the first chunk's scenes.
    pub fn seed(&mut self, scenes: Vec<Scene>) {
        debug!(scenes = scenes.len(), "Seeding accumulated scenes");
        self.accumulated.extend(scenes);
    }

    /// Scenes accumulated so far.
    pub fn scenes(&self) -> &[Scene] {
        &self.accumulated
    }

    /// Outcomes recorded so far, one per reconciled boundary.
    pub fn outcomes(&self) -> &[BoundaryOutcome] {
        &self.outcomes
    }

    /// Fold the next chunk's scenes into the list.
    #[instrument(skip(self, incoming), fields(accumulated = self.accumulated.len(), incoming = incoming.len()))]
    pub async fn reconcile(&mut self, incoming: Vec<Scene>) -> BoundaryOutcome {
        if incoming.is_empty() {
            debug!("Incoming chunk has no scenes, skipping boundary");
            return self.record(BoundaryOutcome::SkippedEmptyChunk);
        }

        let Some(last) = self.accumulated.last() else {
            debug!("Nothing accumulated, appending without comparison");
            self.accumulated.extend(incoming);
            return self.record(BoundaryOutcome::SkippedEmptyAccumulator);
        };

        let decision = self.decide(last, &incoming[0]).await;
        let merged = match decision {
            Decision::Continue => self.synthesize(last, &incoming[0]).await,
            Decision::Stop(outcome) => Err(outcome),
        };

        match merged {
            Ok(scene) => {
                info!("Merging scenes across boundary");
                if let Some(tail) = self.accumulated.last_mut() {
                    *tail = scene;
                }
                self.accumulated.extend(incoming.into_iter().skip(1));
                self.record(BoundaryOutcome::Merged)
            }
            Err(outcome) => {
                self.accumulated.extend(incoming);
                self.record(outcome)
            }
        }
    }

    /// The accumulated scenes and every recorded outcome.
    pub fn into_parts(self) -> (Vec<Scene>, Vec<BoundaryOutcome>) {
        (self.accumulated, self.outcomes)
    }

    async fn decide(&self, last: &Scene, first: &Scene) -> Decision {
        let reply = match ask(
            self.driver,
            self.config,
            CONTINUATION_SYSTEM,
            &continuation_prompt(last, first),
        )
        .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Continuation query failed, not merging");
                return Decision::Stop(BoundaryOutcome::QueryFailed(e.to_string()));
            }
        };

        match parse_continuation(&reply) {
            Some(true) => Decision::Continue,
            Some(false) => {
                debug!("Scenes are distinct");
                Decision::Stop(BoundaryOutcome::Distinct)
            }
            None => {
                let reply = preview(reply.trim(), *self.config.payload_preview_chars());
                let error = SegmentErrorKind::AmbiguousDecision(reply.clone());
                warn!(error = %error, "Treating reply as no");
                Decision::Stop(BoundaryOutcome::Ambiguous(reply))
            }
        }
    }

    async fn synthesize(&self, last: &Scene, first: &Scene) -> Result<Scene, BoundaryOutcome> {
        let reply = ask(
            self.driver,
            self.config,
            MERGE_SYSTEM,
            &merge_prompt(last, first),
        )
        .await
        .map_err(|e| {
            warn!(error = %e, "Merge query failed, not merging");
            BoundaryOutcome::QueryFailed(e.to_string())
        })?;

        parse_scene(
            extract_json_object(&reply),
            *self.config.payload_preview_chars(),
        )
        .map_err(|e| {
            let error = SegmentErrorKind::MergeSynthesis(e.to_string());
            warn!(error = %error, "Keeping both scenes");
            BoundaryOutcome::MergeFailed(e.to_string())
        })
    }

    fn record(&mut self, outcome: BoundaryOutcome) -> BoundaryOutcome {
        self.outcomes.push(outcome.clone());
        outcome
    }
}
