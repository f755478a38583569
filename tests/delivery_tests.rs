use anyhow::Result;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};
use xentral_relay::{
    clients::slack::SlackSink,
    models::message::{Block, SlackMessage},
};

use crate::test_config;

fn test_message() -> SlackMessage {
    SlackMessage::new(
        "📦 New Order Created #42".to_string(),
        vec![
            Block::header("📦 New Order Created"),
            Block::field_section(&[("Order ID", Some("42".to_string()))]),
        ],
    )
}

fn configured_sink(server_uri: &str) -> Result<SlackSink> {
    let mut config = test_config();
    config.slack_webhook_url = Some(format!("{server_uri}/services/T000/B000/hook"));
    Ok(SlackSink::new(&config)?)
}

/// Test: An unconfigured sink accepts messages without error or network calls
#[tokio::test]
async fn test_unconfigured_sink_is_noop() -> Result<()> {
    let sink = SlackSink::new(&test_config())?;

    assert!(!sink.is_configured());
    sink.deliver(&test_message()).await?;

    Ok(())
}

/// Test: Delivery posts the Block Kit wire shape to the webhook URL
#[tokio::test]
async fn test_delivery_posts_block_kit_payload() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/T000/B000/hook"))
        .and(body_partial_json(json!({
            "text": "📦 New Order Created #42",
            "blocks": [
                {"type": "header", "text": {"type": "plain_text", "text": "📦 New Order Created"}},
                {"type": "section", "fields": [{"type": "mrkdwn", "text": "*Order ID:*\n42"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let sink = configured_sink(&server.uri())?;
    sink.deliver(&test_message()).await?;

    Ok(())
}

/// Test: A transient failure is retried and delivery still succeeds
#[tokio::test]
async fn test_delivery_retries_then_succeeds() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = configured_sink(&server.uri())?;
    sink.deliver(&test_message()).await?;

    Ok(())
}

/// Test: After exhausting all attempts the delivery error reaches the caller
#[tokio::test]
async fn test_delivery_exhaustion_propagates_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("channel_not_found"))
        .expect(3)
        .mount(&server)
        .await;

    let sink = configured_sink(&server.uri())?;
    let error = sink
        .deliver(&test_message())
        .await
        .expect_err("exhausted delivery must surface an error");

    assert!(
        error.to_string().contains("500"),
        "Error should carry the upstream status (got: {error})"
    );

    Ok(())
}
