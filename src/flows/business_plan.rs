use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agent::template::PromptTemplate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessPlanInput {
    /// A prompt describing the business venture.
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPlanOutput {
    /// The generated business plan.
    pub business_plan: String,
}

/// Drafts a business plan from a free-form prompt.
pub struct GenerateBusinessPlan;

impl PromptTemplate for GenerateBusinessPlan {
    const NAME: &'static str = "generateBusinessPlanPrompt";
    const TEMPLATE: &'static str = "You are an AI assistant designed to generate business plans.
Based on the prompt provided, generate a comprehensive business plan.
Prompt: {{{prompt}}}";

    type Input = BusinessPlanInput;
    type Output = BusinessPlanOutput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::template::{parse_output, render};

    #[test]
    fn prompt_is_substituted() {
        let text = render::<GenerateBusinessPlan>(&BusinessPlanInput {
            prompt: "A bakery in Lisbon".to_string(),
        })
        .unwrap();
        assert!(text.ends_with("Prompt: A bakery in Lisbon"));
        assert!(!text.contains("{{{"));
    }

    #[test]
    fn output_uses_camel_case_field() {
        let out = parse_output::<GenerateBusinessPlan>("{\"businessPlan\": \"Plan X\"}").unwrap();
        assert_eq!(out.business_plan, "Plan X");
        assert!(parse_output::<GenerateBusinessPlan>("{\"business_plan\": \"Plan X\"}")
            .unwrap_err()
            .is_unavailable_output());
    }
}
