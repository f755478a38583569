use serde::Serialize;
use serde_json::{Map, Value};

/// One schema violation in an inbound payload, echoed back in the 400 body.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// A validated inbound webhook event.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub event_type: String,
    pub body: Map<String, Value>,
    pub timestamp: Option<String>,
}

/// Checks the payload against `{type: string, body: object, timestamp?: string}`.
/// The body's inner shape is deliberately not validated; it varies per event
/// source and formatters probe it defensively.
pub fn validate_webhook_payload(payload: &Value) -> Result<WebhookEvent, Vec<ValidationIssue>> {
    let Some(object) = payload.as_object() else {
        return Err(vec![ValidationIssue::new("", "payload must be an object")]);
    };

    let mut issues = Vec::new();

    let event_type = match object.get("type") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            issues.push(ValidationIssue::new("type", "\"type\" must not be empty"));
            None
        }
        Some(_) => {
            issues.push(ValidationIssue::new("type", "\"type\" must be a string"));
            None
        }
        None => {
            issues.push(ValidationIssue::new("type", "\"type\" is required"));
            None
        }
    };

    let body = match object.get("body") {
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => {
            issues.push(ValidationIssue::new("body", "\"body\" must be an object"));
            None
        }
        None => {
            issues.push(ValidationIssue::new("body", "\"body\" is required"));
            None
        }
    };

    let timestamp = match object.get("timestamp") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push(ValidationIssue::new(
                "timestamp",
                "\"timestamp\" must be a string",
            ));
            None
        }
        None => None,
    };

    if !issues.is_empty() {
        return Err(issues);
    }

    match (event_type, body) {
        (Some(event_type), Some(body)) => Ok(WebhookEvent {
            event_type,
            body,
            timestamp,
        }),
        _ => Err(vec![ValidationIssue::new("", "payload rejected")]),
    }
}
