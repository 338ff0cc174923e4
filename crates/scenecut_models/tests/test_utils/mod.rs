//! Test utilities for driver tests.

use async_trait::async_trait;
use scenecut_core::{GenerateRequest, GenerateResponse, Output};
use scenecut_error::{ModelsError, ModelsErrorKind, ScenecutResult};
use scenecut_interface::ScenecutDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the mock does on one call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with this text
    Text(String),
    /// Fail with this provider error
    Fail(ModelsErrorKind),
}

/// Driver that plays back a fixed sequence of responses.
///
/// Once the script is exhausted it keeps replying "ok".
pub struct MockDriver {
    script: Mutex<VecDeque<MockResponse>>,
    calls: AtomicUsize,
}

impl MockDriver {
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScenecutDriver for MockDriver {
    async fn generate(&self, _req: &GenerateRequest) -> ScenecutResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Text("ok".to_string()));
        match next {
            MockResponse::Text(text) => Ok(GenerateResponse::new(vec![Output::Text(text)])),
            MockResponse::Fail(kind) => Err(ModelsError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
