use std::{sync::Arc, time::Instant};

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    clients::{slack::SlackSink, xentral::CustomerClient},
    config::{Config, RunMode},
    formatters::format_event,
    models::{
        health::HealthReport,
        message::{Block, SlackMessage, TextObject},
        response::{ServerErrorResponse, ValidationErrorResponse, WebhookAccepted},
        validation::validate_webhook_payload,
    },
    utils::short_request_id,
};

pub struct AppState {
    pub customers: CustomerClient,
    pub slack: SlackSink,
    pub run_mode: RunMode,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            customers: CustomerClient::new(config)?,
            slack: SlackSink::new(config)?,
            run_mode: config.run_mode,
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router: Router<Arc<AppState>> = Router::new()
        .route("/xentral", post(xentral_webhook))
        .route("/health", get(health_check))
        .route("/", get(service_info));

    if state.run_mode.is_development() {
        router = router.route("/test", post(send_test_message));
    }

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: Config) -> Result<(), Error> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, run_mode = ?config.run_mode, "Xentral webhook relay started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn xentral_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Response {
    let started = Instant::now();
    let request_id = short_request_id();

    info!(request_id = %request_id, payload = %payload, "Received webhook request");

    let event = match validate_webhook_payload(&payload) {
        Ok(event) => event,
        Err(details) => {
            warn!(request_id = %request_id, "Invalid webhook payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse::new(details)),
            )
                .into_response();
        }
    };

    info!(
        request_id = %request_id,
        event_type = %event.event_type,
        "Processing webhook event"
    );

    let body = Value::Object(event.body);
    let message = format_event(&event.event_type, &body, &state.customers).await;

    match state.slack.deliver(&message).await {
        Ok(()) => {
            info!(
                request_id = %request_id,
                event_type = %event.event_type,
                duration_ms = started.elapsed().as_millis() as u64,
                "Webhook processed successfully"
            );
            (StatusCode::OK, Json(WebhookAccepted::new(request_id))).into_response()
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                event_type = %event.event_type,
                error = %e,
                duration_ms = started.elapsed().as_millis() as u64,
                "Webhook processing failed"
            );
            let detail = state.run_mode.is_development().then(|| e.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(request_id, detail)),
            )
                .into_response()
        }
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthReport::healthy()))
}

async fn service_info() -> impl IntoResponse {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "webhook": "/xentral",
            "health": "/health",
        },
    }))
}

/// Development-only route for verifying the Slack integration end to end.
async fn send_test_message(State(state): State<Arc<AppState>>) -> Response {
    let message = SlackMessage::new(
        "🧪 Test Message from xentral-relay".to_string(),
        vec![
            Block::header("🧪 Test Message"),
            Block::Section {
                fields: vec![TextObject::Mrkdwn {
                    text: "This is a test message to verify the Slack integration is working."
                        .to_string(),
                }],
            },
        ],
    );

    match state.slack.deliver(&message).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Test message sent successfully"})),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Test endpoint failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to send test message", "details": e.to_string()})),
            )
                .into_response()
        }
    }
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Endpoint not found", "path": uri.path()})),
    )
}
