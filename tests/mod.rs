mod delivery_tests;

use xentral_relay::config::{Config, RunMode};

/// Baseline config for tests: no integrations configured, fast retry delays.
pub fn test_config() -> Config {
    Config {
        xentral_customer_url_template: None,
        xentral_api_token: None,
        slack_webhook_url: None,
        port: 0,
        run_mode: RunMode::Production,
        max_retry_attempts: 3,
        initial_retry_delay_ms: 20,
        max_retry_delay_ms: 100,
        request_timeout_ms: 2000,
    }
}
