use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::agent::template::invoke;
use crate::agent::TextGenerator;
use crate::errors::AppError;
use crate::flows::{
    BusinessPlanInput, GenerateBusinessPlan, ValidateAndImproveResponse, ValidateResponseInput,
};

pub const MAX_PROMPT_LENGTH: usize = 8000;

/// Returned for blank prompts; no model call is made.
pub const PROMPT_REQUEST: &str = "Please provide a prompt.";

/// The only thing an end user ever sees when the pipeline fails.
pub const APOLOGY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generating,
    Validating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Generating => "generating",
            Stage::Validating => "validating",
        })
    }
}

/// Why a pipeline run ended in FAILED. Recorded for operators only.
#[derive(Debug, Error)]
pub enum PipelineFailure {
    #[error("AI failed to generate an initial response: {reason}")]
    EmptyGeneration { reason: String },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: AppError,
    },
}

/// The DONE state: which text the pipeline settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Improved(String),
    /// The validation pass produced nothing usable; the first draft stands.
    Original(String),
}

impl Answer {
    pub fn into_text(self) -> String {
        match self {
            Answer::Improved(text) | Answer::Original(text) => text,
        }
    }
}

/// Rejects prompts the `/api/flows/*` routes refuse to template. The chat pipeline
/// only refuses blank prompts.
pub fn validate_prompt(field_name: &str, prompt: &str) -> Result<(), AppError> {
    if prompt.trim().is_empty() {
        return Err(AppError::EmptyField { field_name: field_name.to_string() });
    }
    let actual_length = prompt.chars().count();
    if actual_length > MAX_PROMPT_LENGTH {
        return Err(AppError::FieldTooLong {
            field_name: field_name.to_string(),
            max_length: MAX_PROMPT_LENGTH,
            actual_length,
        });
    }
    Ok(())
}

/// The business-plan response pipeline: generate, then validate and improve.
#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    /// Answers one chat prompt. Always yields a well-formed string.
    pub async fn respond(&self, prompt: &str) -> String {
        if prompt.trim().is_empty() {
            return PROMPT_REQUEST.to_string();
        }

        let request_id = Uuid::new_v4();
        let span = info_span!("chat_pipeline", %request_id);
        match self.run_pipeline(prompt).instrument(span).await {
            Ok(answer) => answer.into_text(),
            Err(failure) => {
                error!(%request_id, "Error getting AI response: {failure}");
                APOLOGY.to_string()
            }
        }
    }

    /// GENERATING → VALIDATING → DONE, or FAILED with the reason.
    pub async fn run_pipeline(&self, prompt: &str) -> Result<Answer, PipelineFailure> {
        // ── GENERATING ───────────────────────────────────────────────────────
        let draft = match invoke::<GenerateBusinessPlan>(
            self.generator(),
            &BusinessPlanInput { prompt: prompt.to_string() },
        )
        .await
        {
            Ok(out) if !out.business_plan.is_empty() => out.business_plan,
            Ok(_) => {
                return Err(PipelineFailure::EmptyGeneration { reason: "empty businessPlan".into() })
            }
            Err(e) if e.is_unavailable_output() => {
                return Err(PipelineFailure::EmptyGeneration { reason: e.to_string() })
            }
            Err(source) => return Err(PipelineFailure::Stage { stage: Stage::Generating, source }),
        };
        info!(draft_len = draft.len(), "business plan drafted");

        // ── VALIDATING ───────────────────────────────────────────────────────
        let validated = invoke::<ValidateAndImproveResponse>(
            self.generator(),
            &ValidateResponseInput {
                original_response: draft.clone(),
                topic: prompt.to_string(),
            },
        )
        .await;

        match validated {
            Ok(out) if !out.improved_response.is_empty() => {
                info!(is_valid = out.is_valid, "response improved");
                Ok(Answer::Improved(out.improved_response))
            }
            Ok(_) => {
                warn!("validation returned no improved text, keeping the draft");
                Ok(Answer::Original(draft))
            }
            Err(e) if e.is_unavailable_output() => {
                warn!("validation output unusable, keeping the draft: {e}");
                Ok(Answer::Original(draft))
            }
            Err(source) => Err(PipelineFailure::Stage { stage: Stage::Validating, source }),
        }
    }
}
