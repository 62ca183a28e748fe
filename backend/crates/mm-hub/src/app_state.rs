use crate::{ConnectionConfig, MessageHub, Metrics, ShutdownCoordinator, WebSocketConnection};

use mm_config::MailgunConfig;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use log::{debug, error};

/// Shared application state for the HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub hub: MessageHub,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    pub mailgun: MailgunConfig,
}

impl AppState {
    pub fn new(config: ConnectionConfig, mailgun: MailgunConfig) -> Self {
        let metrics = Metrics::new();
        Self {
            hub: MessageHub::new(metrics.clone()),
            metrics,
            shutdown: ShutdownCoordinator::new(),
            config,
            mailgun,
        }
    }
}

/// WebSocket upgrade handler
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    debug!("WebSocket upgrade request");

    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(state.hub, state.config, state.metrics);
    let connection_id = connection.connection_id();

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection {connection_id} error: {e}");
    }
}
