#![allow(dead_code)]

use mm_config::MailgunConfig;
use mm_hub::{AppState, ConnectionConfig};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Keepalive interval long enough that pings never interleave with test frames
pub const TEST_HEARTBEAT_SECS: u64 = 60;

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(ConnectionConfig {
        heartbeat_interval_secs: TEST_HEARTBEAT_SECS,
        ..ConnectionConfig::default()
    })
}

/// Create a TestServer with custom connection configuration
pub fn create_test_server_with_config(config: ConnectionConfig) -> TestServerWithState {
    let app_state = AppState::new(config, MailgunConfig::default());

    let app = Router::new()
        .route("/ws", get(mm_hub::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

/// Wait until the registry holds `expected` connections, or give up after two seconds
pub async fn wait_for_connections(app_state: &AppState, expected: usize) -> usize {
    let registry = app_state.hub.registry();
    for _ in 0..100 {
        let count = registry.total_count().await;
        if count == expected {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    registry.total_count().await
}
