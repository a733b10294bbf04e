pub mod api_routes;

use axum::routing::post;
use axum::Router;

use crate::service::chat_service::ChatService;
use crate::service::report_service::ReportService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub reports: ReportService,
}

/// All `/api` routes, without middleware.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(api_routes::chat_handler))
        .route("/api/reports/summarize", post(api_routes::summarize_report_handler))
        .route(
            "/api/flows/generate-business-plan",
            post(api_routes::generate_business_plan_handler),
        )
        .route(
            "/api/flows/validate-and-improve-response",
            post(api_routes::validate_response_handler),
        )
        .with_state(state)
}
