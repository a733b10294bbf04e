use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agent::template::PromptTemplate;
use crate::agent::InlineDocument;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeReportInput {
    /// A financial report as a data URI: `data:<mimetype>;base64,<encoded_data>`.
    pub report_data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeReportOutput {
    /// A summary of the key insights from the report.
    pub summary: String,
    /// Result of the validation, including warnings and suggestions for improvement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_result: Option<String>,
}

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(uri: &str) -> Result<Self, AppError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| AppError::invalid_document("report must be a data URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::invalid_document("data URI has no payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::invalid_document("data URI must use base64 encoding"))?;
        if mime_type.trim().is_empty() {
            return Err(AppError::invalid_document("data URI has no media type"));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::invalid_document(format!("payload is not valid base64: {e}")))?;

        Ok(Self { mime_type: mime_type.to_string(), bytes })
    }
}

impl From<DataUri> for InlineDocument {
    fn from(uri: DataUri) -> Self {
        InlineDocument { mime_type: uri.mime_type, bytes: uri.bytes }
    }
}

/// Summarizes the key insights of an attached financial report.
pub struct SummarizeFinancialReport;

impl PromptTemplate for SummarizeFinancialReport {
    const NAME: &'static str = "summarizeFinancialReportPrompt";
    const TEMPLATE: &'static str = "You are an expert financial analyst. Please summarize the key insights from the following financial report. Focus on key metrics, trends, and potential risks and opportunities.

Financial Report: the attached document.";

    type Input = SummarizeReportInput;
    type Output = SummarizeReportOutput;

    fn documents(input: &Self::Input) -> Result<Vec<InlineDocument>, AppError> {
        Ok(vec![DataUri::parse(&input.report_data_uri)?.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mime_type_and_payload() {
        let uri = DataUri::parse("data:text/csv;base64,cSxyZXYKUTEsMTAw").unwrap();
        assert_eq!(uri.mime_type, "text/csv");
        assert_eq!(uri.bytes, b"q,rev\nQ1,100");
    }

    #[test]
    fn keeps_media_type_parameters() {
        let uri = DataUri::parse("data:text/plain;charset=utf-8;base64,aGk=").unwrap();
        assert_eq!(uri.mime_type, "text/plain;charset=utf-8");
        assert_eq!(uri.bytes, b"hi");
    }

    #[test]
    fn rejects_malformed_uris() {
        for bad in [
            "https://example.com/report.pdf",
            "data:text/plain;base64",
            "data:text/plain,hello",
            "data:;base64,aGk=",
            "data:text/plain;base64,not base64!",
        ] {
            let err = DataUri::parse(bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidDocument { .. }), "accepted {bad}");
        }
    }

    #[test]
    fn template_attaches_the_decoded_report() {
        let docs = SummarizeFinancialReport::documents(&SummarizeReportInput {
            report_data_uri: "data:text/plain;base64,aGk=".to_string(),
        })
        .unwrap();
        assert_eq!(docs, vec![InlineDocument { mime_type: "text/plain".into(), bytes: b"hi".to_vec() }]);
    }

    #[test]
    fn validation_result_is_optional_on_the_wire() {
        let out: SummarizeReportOutput = serde_json::from_str("{\"summary\": \"s\"}").unwrap();
        assert_eq!(out.validation_result, None);
        assert_eq!(serde_json::to_string(&out).unwrap(), "{\"summary\":\"s\"}");
    }
}
