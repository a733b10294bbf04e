//! The prompt templates, each with its input and output schema.

pub mod business_plan;
pub mod financial_report;
pub mod validate_response;

pub use business_plan::{BusinessPlanInput, BusinessPlanOutput, GenerateBusinessPlan};
pub use financial_report::{SummarizeFinancialReport, SummarizeReportInput, SummarizeReportOutput};
pub use validate_response::{ValidateAndImproveResponse, ValidateResponseInput, ValidateResponseOutput};
