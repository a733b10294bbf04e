use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// Response from `POST /api/chat`. The backend always answers with a displayable string.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
