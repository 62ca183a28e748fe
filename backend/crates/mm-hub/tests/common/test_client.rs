use axum_test::{TestServer, TestWebSocket};
use serde_json::Value;
use tokio::time::{Duration, timeout};

/// WebSocket viewer wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the viewer endpoint
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;

        Self { ws }
    }

    /// Connect and consume the initial sync frame
    pub async fn connect_synced(server: &TestServer) -> (Self, Value) {
        let mut client = Self::connect(server).await;
        let sync = client.receive_json().await;
        assert_eq!(sync["action"], "sync", "first frame must be sync");
        (client, sync)
    }

    /// Send a JSON request
    pub async fn send_json(&mut self, value: &Value) {
        self.ws.send_json(value).await;
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Receive the next frame as JSON
    pub async fn receive_json(&mut self) -> Value {
        self.ws.receive_json().await
    }

    /// Receive the next frame unless `wait` elapses first
    pub async fn try_receive_json(&mut self, wait: Duration) -> Option<Value> {
        timeout(wait, self.ws.receive_json::<Value>()).await.ok()
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}
