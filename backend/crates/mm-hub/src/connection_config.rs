use mm_config::{DEFAULT_HEARTBEAT_INTERVAL_SECS, DEFAULT_SEND_BUFFER_SIZE, WebSocketConfig};

use std::time::Duration;

/// Configuration for viewer connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue capacity in frames (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Keepalive ping interval in seconds
    pub heartbeat_interval_secs: u64,
}

impl ConnectionConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
        }
    }
}

impl From<&WebSocketConfig> for ConnectionConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval_secs: config.heartbeat_interval_secs,
        }
    }
}
