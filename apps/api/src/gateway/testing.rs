//! Scripted model backend for tests. Replies are consumed in order; an exhausted
//! script answers with `LlmError::EmptyContent`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::{CompletionRequest, LlmError, ModelBackend, StructuredOutput};

#[derive(Default)]
pub struct ScriptedBackend {
    text_replies: Mutex<VecDeque<Result<String, LlmError>>>,
    structured_replies: Mutex<VecDeque<Result<Value, LlmError>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
    delay: Option<Duration>,
}

impl ScriptedBackend {
    /// Every reply arrives only after `delay` has elapsed.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn push_text(&self, reply: Result<String, LlmError>) {
        self.text_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_structured(&self, reply: Result<Value, LlmError>) {
        self.structured_replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }

    async fn record(&self, request: &CompletionRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.record(request).await;
        self.text_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }

    async fn complete_structured(
        &self,
        request: &CompletionRequest,
        _output: &StructuredOutput,
    ) -> Result<Value, LlmError> {
        self.record(request).await;
        self.structured_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}
