use serde::{Deserialize, Serialize};

// GET /auth/discord
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    pub redirect: Option<String>,
}

// GET /auth/discord/callback
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub redirect: Option<String>,
}

// Health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
