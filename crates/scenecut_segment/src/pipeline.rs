//! Pipeline orchestration: split, extract in parallel, reconcile in order.

use crate::extractor::{Extraction, SceneExtractor};
use crate::reconciler::{BoundaryOutcome, BoundaryReconciler};
use crate::splitter::ChunkSplitter;
use futures::stream::{self, StreamExt};
use scenecut_core::{Chunk, ChunkingConfig, ExtractionConfig, Scene};
use scenecut_error::{ScenecutResult, SegmentError, SegmentErrorKind};
use scenecut_interface::ScenecutDriver;
use serde::{Deserialize, Serialize};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, info, instrument, warn};

/// Settings for one pipeline.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_new::new,
)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct PipelineConfig {
    /// How text is divided into chunks
    chunking: ChunkingConfig,
    /// How each chunk is extracted
    extraction: ExtractionConfig,
}

/// How one chunk fared during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct ChunkReport {
    /// Zero-based chunk index
    index: usize,
    /// Words in the chunk
    word_count: usize,
    /// Scenes the chunk contributed before reconciliation
    scene_count: usize,
    /// Whether the repair call produced the scenes
    repaired: bool,
    /// Why the chunk contributed nothing, if it failed
    failure: Option<String>,
}

impl ChunkReport {
    fn new(chunk: &Chunk) -> Self {
        Self {
            index: *chunk.index(),
            word_count: *chunk.word_count(),
            scene_count: 0,
            repaired: false,
            failure: None,
        }
    }
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct SegmentationRun {
    /// Final ordered scenes
    scenes: Vec<Scene>,
    /// One report per chunk, in order
    chunks: Vec<ChunkReport>,
    /// One outcome per reconciled boundary, in order
    boundaries: Vec<BoundaryOutcome>,
    /// Whether the deadline cut the run short
    timed_out: bool,
}

impl SegmentationRun {
    /// Take the scenes.
    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }

    /// Chunks that contributed no scenes because extraction failed.
    pub fn failed_chunks(&self) -> impl Iterator<Item = &ChunkReport> {
        self.chunks.iter().filter(|report| report.failure.is_some())
    }
}

/// Turns prose into an ordered list of scenes through a generation driver.
///
/// # Examples
///
/// ```no_run
/// use scenecut_segment::{PipelineConfig, ScenePipeline};
/// # async fn demo(driver: impl scenecut_interface::ScenecutDriver) -> scenecut_error::ScenecutResult<()> {
/// let pipeline = ScenePipeline::new(driver, PipelineConfig::default());
/// let run = pipeline.run("It was a dark and stormy night...").await?;
/// for scene in run.scenes() {
///     println!("{}: {}", scene.setting(), scene.current_action());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ScenePipeline<D> {
    driver: D,
    config: PipelineConfig,
}

impl<D: ScenecutDriver> ScenePipeline<D> {
    /// Create a pipeline over `driver`.
    pub fn new(driver: D, config: PipelineConfig) -> Self {
        Self { driver, config }
    }

    /// The driver every call goes through.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The pipeline settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Split `text` the way [`run`](Self::run) would, without calling the driver.
    ///
    /// # Errors
    ///
    /// See [`ChunkSplitter::split`].
    pub fn split(&self, text: &str) -> Result<Vec<Chunk>, SegmentError> {
        ChunkSplitter::new(*self.config.chunking()).split(text)
    }

    /// Run the whole pipeline.
    ///
    /// Only invalid settings or a failed partition are errors. A chunk whose
    /// extraction fails contributes no scenes and is reported in
    /// [`SegmentationRun::chunks`].
    ///
    /// # Errors
    ///
    /// [`SegmentErrorKind::InvalidInput`] or [`SegmentErrorKind::Partition`].
    pub async fn run(&self, text: &str) -> ScenecutResult<SegmentationRun> {
        self.execute(text, None).await
    }

    /// Run the pipeline, stopping at `deadline`.
    ///
    /// If the deadline passes during extraction the run has no scenes. If it
    /// passes during reconciliation the run holds the scenes accumulated up
    /// to the last completed boundary. Either way `timed_out` is set.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_until(&self, text: &str, deadline: Instant) -> ScenecutResult<SegmentationRun> {
        self.execute(text, Some(deadline)).await
    }

    /// Run the pipeline and keep only the scenes.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn segment(&self, text: &str) -> ScenecutResult<Vec<Scene>> {
        Ok(self.run(text).await?.into_scenes())
    }

    #[instrument(
        skip(self, text),
        fields(provider = self.driver.provider_name(), model = self.driver.model_name(), text_len = text.len())
    )]
    async fn execute(&self, text: &str, deadline: Option<Instant>) -> ScenecutResult<SegmentationRun> {
        self.config
            .extraction()
            .validate()
            .map_err(|e| SegmentError::new(SegmentErrorKind::InvalidInput(e)))?;

        let chunks = self.split(text)?;
        info!(chunks = chunks.len(), "Starting segmentation");

        let mut reports: Vec<ChunkReport> = chunks.iter().map(ChunkReport::new).collect();

        let extraction = self.extract_all(&chunks);
        let extracted = match deadline {
            Some(deadline) => match timeout_at(deadline, extraction).await {
                Ok(extracted) => extracted,
                Err(_) => {
                    warn!("Deadline elapsed during extraction");
                    for report in &mut reports {
                        report.failure = Some("deadline elapsed before extraction finished".into());
                    }
                    return Ok(SegmentationRun {
                        scenes: Vec::new(),
                        chunks: reports,
                        boundaries: Vec::new(),
                        timed_out: true,
                    });
                }
            },
            None => extraction.await,
        };

        let mut lists = Vec::with_capacity(extracted.len());
        for (report, result) in reports.iter_mut().zip(extracted) {
            match result {
                Some(Ok(extraction)) => {
                    report.scene_count = extraction.scenes().len();
                    report.repaired = *extraction.repaired();
                    lists.push(extraction.into_scenes());
                }
                Some(Err(e)) => {
                    error!(chunk = report.index, error = %e.kind, "Chunk contributes no scenes");
                    report.failure = Some(e.kind.to_string());
                    lists.push(Vec::new());
                }
                None => lists.push(Vec::new()),
            }
        }

        let mut reconciler = BoundaryReconciler::new(&self.driver, self.config.extraction());
        let mut lists = lists.into_iter();
        if let Some(first) = lists.next() {
            reconciler.seed(first);
        }

        let mut timed_out = false;
        for scenes in lists {
            match deadline {
                Some(deadline) => {
                    if timeout_at(deadline, reconciler.reconcile(scenes)).await.is_err() {
                        warn!(
                            reconciled = reconciler.outcomes().len(),
                            "Deadline elapsed during reconciliation, returning partial scenes"
                        );
                        timed_out = true;
                        break;
                    }
                }
                None => {
                    reconciler.reconcile(scenes).await;
                }
            }
        }

        let (scenes, boundaries) = reconciler.into_parts();
        info!(
            scenes = scenes.len(),
            merged = boundaries.iter().filter(|outcome| outcome.merged()).count(),
            failed_chunks = reports.iter().filter(|r| r.failure.is_some()).count(),
            timed_out,
            "Segmentation complete"
        );

        Ok(SegmentationRun {
            scenes,
            chunks: reports,
            boundaries,
            timed_out,
        })
    }

    /// Extract every chunk, at most `max_concurrent_extractions` at a time,
    /// keeping chunk order. Blank chunks are skipped and yield `None`.
    async fn extract_all(
        &self,
        chunks: &[Chunk],
    ) -> Vec<Option<Result<Extraction, SegmentError>>> {
        let extractor = SceneExtractor::new(&self.driver, self.config.extraction());
        let extractor = &extractor;

        stream::iter(chunks)
            .map(|chunk| async move {
                if chunk.is_blank() {
                    debug!(chunk = chunk.index(), "Skipping blank chunk");
                    return None;
                }
                Some(extractor.extract(*chunk.index(), chunk.text()).await)
            })
            .buffered(*self.config.extraction().max_concurrent_extractions())
            .collect()
            .await
    }
}

/// Segment `text` with default extraction settings and the given word budgets.
///
/// # Errors
///
/// Same as [`ScenePipeline::run`].
pub async fn segment<D>(
    driver: &D,
    text: &str,
    target_chunk_words: usize,
    slack_words: usize,
    min_chunk_words: usize,
) -> ScenecutResult<Vec<Scene>>
where
    D: ScenecutDriver + ?Sized,
{
    let config = PipelineConfig::new(
        ChunkingConfig::new(target_chunk_words, slack_words, min_chunk_words),
        ExtractionConfig::default(),
    );
    ScenePipeline::new(driver, config).segment(text).await
}
