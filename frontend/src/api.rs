use gloo_net::http::Request;

use crate::models::{ChatRequest, ChatResponse};

/// Base URL of the backend API server.
const API_BASE: &str = "http://localhost:3000";

/// Sends a prompt through the backend response pipeline.
pub async fn send_chat(prompt: &str) -> Result<ChatResponse, String> {
    let body = ChatRequest { prompt: prompt.to_string() };

    let resp = Request::post(&format!("{API_BASE}/api/chat"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<ChatResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}
