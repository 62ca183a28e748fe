pub mod app_state;
pub mod broadcaster;
pub mod connection_config;
pub mod connection_handle;
pub mod connection_id;
pub mod connection_registry;
pub mod error;
pub mod event;
pub mod inbound_frame;
pub mod message;
pub mod message_hub;
pub mod message_store;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use broadcaster::Broadcaster;
pub use connection_config::ConnectionConfig;
pub use connection_handle::{ConnectionHandle, EnqueueOutcome};
pub use connection_id::ConnectionId;
pub use connection_registry::ConnectionRegistry;
pub use error::{HubError, Result};
pub use event::{Event, Frame};
pub use inbound_frame::{InboundAction, InboundFrame};
pub use message::{Message, MessageId, Messages};
pub use message_hub::MessageHub;
pub use message_store::{MessageStore, MessageStoreView, MessageStoreWriter};
pub use metrics::Metrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;
