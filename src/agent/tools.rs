use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSummaryArgs {
    /// The financial report summary to validate.
    pub summary: String,
}

/// Summary validation capability offered to the summarizer flow.
///
/// This is a placeholder: it performs no validation and echoes its input. Real checks
/// (recent news, figures cross-checked against the report) slot in behind the same
/// args and output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateSummaryTool;

impl Tool for ValidateSummaryTool {
    const NAME: &'static str = "validateSummaryTool";

    type Error = AppError;
    type Args = ValidateSummaryArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Validates a financial report summary for accuracy and completeness."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "summary": {
                        "type": "string",
                        "description": "The financial report summary to validate."
                    }
                },
                "required": ["summary"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(format!(
            "Summary validation not implemented yet. Input summary: {}",
            args.summary
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_echoes_the_summary() {
        let out = ValidateSummaryTool
            .call(ValidateSummaryArgs { summary: "Revenue grew 12%.".to_string() })
            .await
            .unwrap();
        assert_eq!(out, "Summary validation not implemented yet. Input summary: Revenue grew 12%.");
    }

    #[tokio::test]
    async fn definition_advertises_summary_argument() {
        let def = ValidateSummaryTool.definition(String::new()).await;
        assert_eq!(def.name, "validateSummaryTool");
        assert_eq!(def.parameters["required"][0], "summary");
    }
}
