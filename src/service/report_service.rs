use std::sync::Arc;

use rig::tool::Tool;
use tracing::{info, warn};

use crate::agent::template::{invoke, PromptTemplate};
use crate::agent::tools::{ValidateSummaryArgs, ValidateSummaryTool};
use crate::agent::TextGenerator;
use crate::errors::AppError;
use crate::flows::{SummarizeFinancialReport, SummarizeReportInput, SummarizeReportOutput};

/// Financial report summarizer: one summarization call, then the validation tool.
#[derive(Clone)]
pub struct ReportService<V = ValidateSummaryTool> {
    generator: Arc<dyn TextGenerator>,
    validator: V,
}

impl ReportService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_validator(generator, ValidateSummaryTool)
    }
}

impl<V> ReportService<V>
where
    V: Tool<Args = ValidateSummaryArgs, Output = String>,
{
    pub fn with_validator(generator: Arc<dyn TextGenerator>, validator: V) -> Self {
        Self { generator, validator }
    }

    /// Summarizes the report. A failing validator does not fail the call; its reason is
    /// attached as the validation result instead.
    pub async fn summarize(
        &self,
        input: &SummarizeReportInput,
    ) -> Result<SummarizeReportOutput, AppError> {
        let output = invoke::<SummarizeFinancialReport>(self.generator.as_ref(), input).await?;
        if output.summary.is_empty() {
            return Err(AppError::unavailable(SummarizeFinancialReport::NAME, "empty summary"));
        }
        info!(summary_len = output.summary.len(), "financial report summarized");

        let validation_result = match self
            .validator
            .call(ValidateSummaryArgs { summary: output.summary.clone() })
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = V::NAME, "summary validation failed: {e}");
                format!("Summary validation failed: {e}")
            }
        };

        Ok(SummarizeReportOutput {
            validation_result: Some(validation_result),
            ..output
        })
    }
}
