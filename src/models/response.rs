use serde::Serialize;

use crate::models::validation::ValidationIssue;

/// 200 body for a processed webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAccepted {
    pub success: bool,
    pub request_id: String,
}

impl WebhookAccepted {
    pub fn new(request_id: String) -> Self {
        Self {
            success: true,
            request_id,
        }
    }
}

/// 400 body naming each schema violation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: Vec<ValidationIssue>,
}

impl ValidationErrorResponse {
    pub fn new(details: Vec<ValidationIssue>) -> Self {
        Self {
            error: "Invalid payload".to_string(),
            details,
        }
    }
}

/// 500 body; `message` carries the error text only in development mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerErrorResponse {
    pub error: String,
    pub request_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServerErrorResponse {
    pub fn new(request_id: String, message: Option<String>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            request_id,
            message,
        }
    }
}
