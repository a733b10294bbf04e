use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{inline_documents, GenerationRequest, TextGenerator};
use crate::errors::AppError;

/// Fake generator that replays queued replies in order and records every request.
/// Documents go through the same text-only gate as the Ollama backend. Running out of
/// replies is reported as an inference error.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queues a reply serialized from a JSON value.
    pub fn reply_json(self, value: serde_json::Value) -> Self {
        self.reply(value.to_string())
    }

    pub fn fail(self, error: AppError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        inline_documents(&request)?;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::InferenceError { message: "no scripted reply left".into() }))
    }
}
