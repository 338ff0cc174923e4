//! Test utilities for segmentation tests.

#![allow(dead_code)]

use async_trait::async_trait;
use scenecut_core::{GenerateRequest, GenerateResponse, Output, Scene};
use scenecut_error::{BackendError, ScenecutResult};
use scenecut_interface::ScenecutDriver;
use scenecut_segment::prompts::{CONTINUATION_SYSTEM, EXTRACTION_SYSTEM, MERGE_SYSTEM, REPAIR_SYSTEM};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Which pipeline step a call belongs to, read from its system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Extraction,
    Repair,
    Continuation,
    Merge,
}

impl CallKind {
    fn of(request: &GenerateRequest) -> Self {
        let system = request
            .messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        match system {
            EXTRACTION_SYSTEM => CallKind::Extraction,
            REPAIR_SYSTEM => CallKind::Repair,
            CONTINUATION_SYSTEM => CallKind::Continuation,
            MERGE_SYSTEM => CallKind::Merge,
            other => panic!("unexpected system instruction: {}", other),
        }
    }
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
    /// Sleep before answering with the inner reply.
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn after(self, delay: Duration) -> Self {
        Reply::Delayed(delay, Box::new(self))
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

struct Queue {
    script: VecDeque<Reply>,
    fallback: Reply,
}

impl Queue {
    fn new(fallback: Reply) -> Self {
        Self {
            script: VecDeque::new(),
            fallback,
        }
    }

    fn next(&mut self) -> Reply {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Driver with one reply queue per call kind.
///
/// Unscripted calls get the kind's fallback: two valid scenes for extraction,
/// "No" for continuation, and an unusable reply for repair and merge.
pub struct ScriptedDriver {
    extraction: Mutex<Queue>,
    repair: Mutex<Queue>,
    continuation: Mutex<Queue>,
    merge: Mutex<Queue>,
    calls: Mutex<Vec<(CallKind, String)>>,
    delay: Option<Duration>,
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self {
            extraction: Mutex::new(Queue::new(scenes_json("chunk", 2).into())),
            repair: Mutex::new(Queue::new("still not json".into())),
            continuation: Mutex::new(Queue::new("No".into())),
            merge: Mutex::new(Queue::new("cannot merge".into())),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    fn queue(&self, kind: CallKind) -> &Mutex<Queue> {
        match kind {
            CallKind::Extraction => &self.extraction,
            CallKind::Repair => &self.repair,
            CallKind::Continuation => &self.continuation,
            CallKind::Merge => &self.merge,
        }
    }

    pub fn script<R: Into<Reply>>(self, kind: CallKind, replies: Vec<R>) -> Self {
        self.queue(kind)
            .lock()
            .unwrap()
            .script
            .extend(replies.into_iter().map(Into::into));
        self
    }

    pub fn fallback(self, kind: CallKind, reply: impl Into<Reply>) -> Self {
        self.queue(kind).lock().unwrap().fallback = reply.into();
        self
    }

    /// Sleep this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls_of(&self, kind: CallKind) -> usize {
        self.prompts_of(kind).len()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts_of(&self, kind: CallKind) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl ScenecutDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        let kind = CallKind::of(req);
        let prompt = req
            .messages
            .get(1)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((kind, prompt));
        let mut reply = self.queue(kind).lock().unwrap().next();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        loop {
            match reply {
                Reply::Text(text) => return Ok(GenerateResponse::new(vec![Output::Text(text)])),
                Reply::Fail(message) => return Err(BackendError::new(message).into()),
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

pub fn scene(tag: &str) -> Scene {
    Scene::new(
        format!("{} lantern", tag),
        format!("{} Mara", tag),
        format!("{} harbour", tag),
        format!("{} wary", tag),
        format!("{} waits", tag),
    )
}

pub fn scenes(prefix: &str, count: usize) -> Vec<Scene> {
    (0..count).map(|i| scene(&format!("{}-{}", prefix, i))).collect()
}

/// A JSON array of `count` scenes tagged `prefix-i`, wrapped in chatter.
pub fn scenes_json(prefix: &str, count: usize) -> String {
    let array = serde_json::to_string(&scenes(prefix, count)).unwrap();
    format!("Here are the scenes:\n```json\n{}\n```", array)
}

pub fn scene_json(tag: &str) -> String {
    serde_json::to_string(&scene(tag)).unwrap()
}

/// Prose of `words` five-letter words, a full stop every 12 words and a
/// paragraph break every 300.
pub fn narrative(words: usize) -> String {
    let mut text = String::new();
    for i in 1..=words {
        text.push_str("lorem");
        if i % 12 == 0 {
            text.push('.');
        }
        if i == words {
            break;
        }
        text.push_str(if i % 300 == 0 { "\n\n" } else { " " });
    }
    text
}
