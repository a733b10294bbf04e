use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::AppState;
use crate::agent::template::invoke;
use crate::errors::AppError;
use crate::flows::{
    BusinessPlanInput, BusinessPlanOutput, GenerateBusinessPlan, SummarizeReportInput,
    SummarizeReportOutput, ValidateAndImproveResponse, ValidateResponseInput,
    ValidateResponseOutput,
};
use crate::models::{ChatRequest, ChatResponse, ErrorBody};
use crate::service::chat_service::validate_prompt;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/chat`: runs the response pipeline. Always 200 with a displayable string.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let response = state.chat.respond(&request.prompt).await;
    Json(ChatResponse { response })
}

/// POST `/api/reports/summarize`: financial report summary with validation annotation.
pub async fn summarize_report_handler(
    State(state): State<AppState>,
    Json(input): Json<SummarizeReportInput>,
) -> Result<Json<SummarizeReportOutput>, Response> {
    state
        .reports
        .summarize(&input)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

/// POST `/api/flows/generate-business-plan`: the generation template on its own.
pub async fn generate_business_plan_handler(
    State(state): State<AppState>,
    Json(input): Json<BusinessPlanInput>,
) -> Result<Json<BusinessPlanOutput>, Response> {
    validate_prompt("prompt", &input.prompt).map_err(|e| error_response(&e))?;
    invoke::<GenerateBusinessPlan>(state.chat.generator(), &input)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

/// POST `/api/flows/validate-and-improve-response`: the validation template on its own.
pub async fn validate_response_handler(
    State(state): State<AppState>,
    Json(input): Json<ValidateResponseInput>,
) -> Result<Json<ValidateResponseOutput>, Response> {
    validate_prompt("originalResponse", &input.original_response)
        .and_then(|_| validate_prompt("topic", &input.topic))
        .map_err(|e| error_response(&e))?;
    invoke::<ValidateAndImproveResponse>(state.chat.generator(), &input)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn status_for(err: &AppError) -> StatusCode {
    if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_unsupported_media() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    } else if err.is_agent_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else if matches!(err, AppError::Unexpected(_)) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_GATEWAY
    }
}

fn error_response(err: &AppError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        error!("request failed with {status}: {err}");
    }
    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::agent::testing::ScriptedGenerator;
    use crate::routes::api_router;
    use crate::service::chat_service::ChatService;
    use crate::service::report_service::ReportService;

    fn app(generator: Arc<ScriptedGenerator>) -> Router {
        api_router(AppState {
            chat: ChatService::new(generator.clone()),
            reports: ReportService::new(generator),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn chat_returns_improved_answer() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .reply_json(json!({ "businessPlan": "Plan X" }))
                .reply_json(json!({ "isValid": true, "improvedResponse": "Plan X, improved" })),
        );
        let (status, body) =
            post_json(app(generator), "/api/chat", json!({ "prompt": "coffee shop" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Plan X, improved");
    }

    #[tokio::test]
    async fn chat_failure_is_still_ok_with_apology() {
        let generator = Arc::new(
            ScriptedGenerator::new().fail(AppError::InferenceError { message: "boom".into() }),
        );
        let (status, body) =
            post_json(app(generator), "/api/chat", json!({ "prompt": "coffee shop" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Sorry, I encountered an error while processing your request. Please try again."
        );
    }

    #[tokio::test]
    async fn chat_without_prompt_asks_for_one() {
        let (status, body) =
            post_json(app(Arc::new(ScriptedGenerator::new())), "/api/chat", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Please provide a prompt.");
    }

    #[tokio::test]
    async fn summarize_rejects_bad_documents() {
        let (status, body) = post_json(
            app(Arc::new(ScriptedGenerator::new())),
            "/api/reports/summarize",
            json!({ "reportDataUri": "report.pdf" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid document"));
    }

    #[tokio::test]
    async fn summarize_refuses_binary_media() {
        let (status, _) = post_json(
            app(Arc::new(ScriptedGenerator::new())),
            "/api/reports/summarize",
            json!({ "reportDataUri": "data:application/pdf;base64,JVBERi0xLjc=" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn summarize_returns_summary_and_validation() {
        let generator =
            Arc::new(ScriptedGenerator::new().reply_json(json!({ "summary": "Revenue is 120." })));
        let (status, body) = post_json(
            app(generator),
            "/api/reports/summarize",
            json!({ "reportDataUri": "data:text/plain;base64,UmV2ZW51ZTogMTIw" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Revenue is 120.");
        assert!(body["validationResult"]
            .as_str()
            .unwrap()
            .starts_with("Summary validation not implemented yet."));
    }

    #[tokio::test]
    async fn business_plan_flow_validates_input() {
        let (status, body) = post_json(
            app(Arc::new(ScriptedGenerator::new())),
            "/api/flows/generate-business-plan",
            json!({ "prompt": "   " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Field 'prompt' cannot be empty");
    }

    #[tokio::test]
    async fn validate_flow_reports_unusable_output_as_bad_gateway() {
        let generator = Arc::new(ScriptedGenerator::new().reply("looks good to me"));
        let (status, _) = post_json(
            app(generator),
            "/api/flows/validate-and-improve-response",
            json!({ "originalResponse": "Plan X", "topic": "coffee" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unavailable_agent_maps_to_503() {
        let err = AppError::OllamaUnavailable { host: "http://localhost:11434".into() };
        assert_eq!(status_for(&err), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&AppError::Unexpected("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
