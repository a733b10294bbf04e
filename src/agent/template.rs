use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{GenerationRequest, InlineDocument, TextGenerator};
use crate::errors::AppError;

/// A fixed natural-language instruction with `{{{field}}}` placeholders, paired with
/// the input shape that fills them and the output shape the model must answer with.
pub trait PromptTemplate {
    const NAME: &'static str;
    const TEMPLATE: &'static str;

    type Input: Serialize + Send + Sync;
    type Output: DeserializeOwned + JsonSchema + Send;

    /// Documents attached to the request alongside the rendered text.
    fn documents(_input: &Self::Input) -> Result<Vec<InlineDocument>, AppError> {
        Ok(Vec::new())
    }
}

/// Substitutes every top-level string field of `input` into its `{{{name}}}` placeholder
/// in a single left-to-right pass, so inserted values are never re-expanded.
/// Placeholders without a matching string field are left untouched.
pub fn render<T: PromptTemplate>(input: &T::Input) -> Result<String, AppError> {
    let value = serde_json::to_value(input)
        .map_err(|e| AppError::Unexpected(format!("Failed to serialize {} input: {e}", T::NAME)))?;
    let fields = value.as_object().ok_or_else(|| {
        AppError::Unexpected(format!("{} input must serialize to an object", T::NAME))
    })?;

    let mut text = String::with_capacity(T::TEMPLATE.len());
    let mut rest = T::TEMPLATE;
    while let Some(start) = rest.find("{{{") {
        text.push_str(&rest[..start]);
        let after_open = &rest[start + 3..];
        let Some(end) = after_open.find("}}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after_open[..end];
        match fields.get(name).and_then(|v| v.as_str()) {
            Some(value) => text.push_str(value),
            None => text.push_str(&rest[start..start + 3 + end + 3]),
        }
        rest = &after_open[end + 3..];
    }
    text.push_str(rest);
    Ok(text)
}

/// The instruction appended to every rendered template, carrying the output's JSON Schema.
pub fn schema_instruction<T: PromptTemplate>() -> Result<String, AppError> {
    let schema = schemars::schema_for!(T::Output);
    let schema = serde_json::to_string_pretty(&schema)
        .map_err(|e| AppError::Unexpected(format!("Failed to render {} schema: {e}", T::NAME)))?;
    Ok(format!(
        "\n\nRespond with a single JSON object that conforms to this JSON Schema. \
         Do not add any text outside the object.\n{schema}"
    ))
}

/// Finds the JSON object inside a model reply, tolerating code fences and surrounding prose.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

/// Parses a raw reply into the template's output shape.
pub fn parse_output<T: PromptTemplate>(reply: &str) -> Result<T::Output, AppError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| AppError::unavailable(T::NAME, "reply contained no JSON object"))?;
    serde_json::from_str(json).map_err(|e| AppError::unavailable(T::NAME, e.to_string()))
}

/// Runs one template against the generator.
///
/// Transport and inference failures are returned as-is; a reply that does not match
/// the output schema becomes [`AppError::UnavailableOutput`].
pub async fn invoke<T: PromptTemplate>(
    generator: &dyn TextGenerator,
    input: &T::Input,
) -> Result<T::Output, AppError> {
    let mut prompt = render::<T>(input)?;
    prompt.push_str(&schema_instruction::<T>()?);
    let documents = T::documents(input)?;

    debug!(template = T::NAME, documents = documents.len(), "invoking prompt template");
    let reply = generator.generate(GenerationRequest { prompt, documents }).await?;

    parse_output::<T>(&reply).inspect_err(|e| {
        warn!(template = T::NAME, "discarding reply: {e}");
    })
}
