pub mod template;
pub mod tools;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use rig::client::Nothing;
use rig::completion::Prompt;
use rig::prelude::CompletionClient;
use rig::providers::ollama;
use tracing::{debug, error};

use crate::errors::AppError;

const PREAMBLE: &str = "You are BizSpark AI, an assistant for business questions. \
                        Follow the instructions in each request exactly. \
                        When asked for JSON, reply with the JSON object only.";

/// A decoded document handed to the model next to the prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineDocument {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InlineDocument {
    /// Whether the document can be passed to a text-only model as UTF-8.
    pub fn is_textual(&self) -> bool {
        let mime = self.mime_type.to_ascii_lowercase();
        let essence = mime.split(';').next().unwrap_or_default().trim();
        essence.starts_with("text/")
            || matches!(essence, "application/json" | "application/xml" | "application/csv")
    }
}

/// One fully rendered request to the text-generation capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub documents: Vec<InlineDocument>,
}

/// The external text-generation capability every prompt template delegates to.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AppError>;
}

/// Text generator backed by a local Ollama server through the rig [`ollama::Client`].
/// A fresh agent is built per request; nothing is carried between calls.
#[derive(Clone)]
pub struct OllamaAgentService {
    client: ollama::Client,
    base_url: String,
    model: String,
}

impl OllamaAgentService {
    pub fn new(base_url: &str, model: &str) -> Result<Self, AppError> {
        let client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(base_url)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build Ollama client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            model: model.to_string(),
        })
    }

    fn classify(&self, message: String) -> AppError {
        if message.contains("Connection refused") || message.contains("connect") {
            AppError::OllamaUnavailable { host: self.base_url.clone() }
        } else if message.contains("model") {
            AppError::ModelNotFound { model_name: self.model.clone() }
        } else {
            AppError::InferenceError { message }
        }
    }
}

/// Appends textual documents to the prompt; refuses anything binary.
pub fn inline_documents(request: &GenerationRequest) -> Result<String, AppError> {
    let mut text = request.prompt.clone();
    for doc in &request.documents {
        if !doc.is_textual() {
            return Err(AppError::UnsupportedMedia { mime_type: doc.mime_type.clone() });
        }
        let body = String::from_utf8_lossy(&doc.bytes);
        text.push_str(&format!(
            "\n\n--- Attached document ({}) ---\n{}\n--- End of document ---",
            doc.mime_type, body
        ));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for OllamaAgentService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AppError> {
        let prompt = inline_documents(&request)?;
        let agent = self
            .client
            .agent(&self.model)
            .preamble(PREAMBLE)
            .build();

        debug!(model = %self.model, prompt_len = prompt.len(), "sending prompt to Ollama");

        agent.prompt(prompt.as_str()).await.map_err(|e| {
            error!("Ollama inference failed: {e}");
            self.classify(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(mime: &str, body: &str) -> InlineDocument {
        InlineDocument { mime_type: mime.to_string(), bytes: body.as_bytes().to_vec() }
    }

    #[test]
    fn textual_media_types_are_recognised() {
        assert!(doc("text/plain", "").is_textual());
        assert!(doc("text/csv; charset=utf-8", "").is_textual());
        assert!(doc("Application/JSON", "").is_textual());
        assert!(!doc("application/pdf", "").is_textual());
        assert!(!doc("image/png", "").is_textual());
    }

    #[test]
    fn documents_are_appended_after_the_prompt() {
        let request = GenerationRequest {
            prompt: "Summarize this.".to_string(),
            documents: vec![doc("text/csv", "quarter,revenue\nQ1,100")],
        };
        let text = inline_documents(&request).unwrap();
        assert!(text.starts_with("Summarize this."));
        assert!(text.contains("--- Attached document (text/csv) ---\nquarter,revenue\nQ1,100"));
    }

    #[test]
    fn binary_documents_are_refused() {
        let request = GenerationRequest {
            prompt: "Summarize this.".to_string(),
            documents: vec![doc("application/pdf", "%PDF-1.7")],
        };
        let err = inline_documents(&request).unwrap_err();
        assert!(err.is_unsupported_media());
    }

    #[test]
    fn plain_text_request_has_no_documents() {
        let request = GenerationRequest { prompt: "hello".to_string(), ..Default::default() };
        assert_eq!(inline_documents(&request).unwrap(), "hello");
    }
}
