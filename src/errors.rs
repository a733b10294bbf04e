use thiserror::Error;

/// Top-level application error.
/// All variants carry a human-readable message for logging; the chat pipeline never
/// lets one reach the end user.
#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum AppError {
    // ── AI Agent errors ──────────────────────────────────────────────────────
    #[error("Ollama service unavailable at {host}")]
    OllamaUnavailable { host: String },

    #[error("Model '{model_name}' not found in Ollama")]
    ModelNotFound { model_name: String },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("Template '{template}' produced no usable output: {reason}")]
    UnavailableOutput { template: &'static str, reason: String },

    // ── Document errors ──────────────────────────────────────────────────────
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    #[error("Unsupported media type '{mime_type}'")]
    UnsupportedMedia { mime_type: String },

    // ── Tool errors ──────────────────────────────────────────────────────────
    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unavailable(template: &'static str, reason: impl Into<String>) -> Self {
        AppError::UnavailableOutput { template, reason: reason.into() }
    }

    pub fn invalid_document(reason: impl Into<String>) -> Self {
        AppError::InvalidDocument { reason: reason.into() }
    }

    pub fn is_unavailable_output(&self) -> bool {
        matches!(self, AppError::UnavailableOutput { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyField { .. } | AppError::FieldTooLong { .. } | AppError::InvalidDocument { .. }
        )
    }

    pub fn is_unsupported_media(&self) -> bool {
        matches!(self, AppError::UnsupportedMedia { .. })
    }

    pub fn is_agent_unavailable(&self) -> bool {
        matches!(self, AppError::OllamaUnavailable { .. })
    }
}
