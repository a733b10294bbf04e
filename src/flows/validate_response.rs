use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agent::template::PromptTemplate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponseInput {
    /// The original AI-generated response.
    pub original_response: String,
    /// The topic of the original response.
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponseOutput {
    /// Whether the original response is valid.
    pub is_valid: bool,
    /// The improved AI-generated response with added details or disclaimers.
    pub improved_response: String,
}

/// Checks a generated answer for accuracy, relevance and freshness, and returns an
/// improved version with extra detail or disclaimers.
pub struct ValidateAndImproveResponse;

impl PromptTemplate for ValidateAndImproveResponse {
    const NAME: &'static str = "validateResponsePrompt";
    const TEMPLATE: &'static str = "You are an AI assistant that validates and improves AI-generated responses.

You will be given an original AI response and a topic.
You will validate the original AI response based on the following criteria:
- Accuracy: Is the information in the response accurate?
- Relevance: Is the information in the response relevant to the topic?
- Up-to-date: Is the information in the response up-to-date?

If the response is not valid, you will improve it by adding additional details or disclaimers.
You MUST return the improved response in the improvedResponse field.

Original Response: {{{originalResponse}}}
Topic: {{{topic}}}

Output a JSON object with the following fields:
- isValid: Whether the original response is valid.
- improvedResponse: The improved AI-generated response with added details or disclaimers.";

    type Input = ValidateResponseInput;
    type Output = ValidateResponseOutput;
}
