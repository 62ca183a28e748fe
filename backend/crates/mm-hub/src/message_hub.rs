use crate::{
    Broadcaster, ConnectionHandle, ConnectionId, ConnectionRegistry, EnqueueOutcome, Event,
    HubError, Message, MessageId, MessageStore, Metrics, Result,
};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;

/// Entry point for everything that changes what viewers see.
///
/// Lock order is always store, then registry: mutations broadcast while still
/// holding the store write lock, and attach registers while holding the store
/// read lock. Two mutations therefore reach every viewer in the order they
/// took the store lock, and a new viewer's `sync` snapshot is exact: every
/// later change arrives as an event after it.
#[derive(Clone)]
pub struct MessageHub {
    store: MessageStore,
    registry: ConnectionRegistry,
    broadcaster: Broadcaster,
    metrics: Metrics,
}

impl MessageHub {
    pub fn new(metrics: Metrics) -> Self {
        let registry = ConnectionRegistry::new();
        Self {
            store: MessageStore::new(),
            broadcaster: Broadcaster::new(registry.clone(), metrics.clone()),
            registry,
            metrics,
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Store a message (replacing any with the same id) and announce it.
    /// Returns how many viewers the `add` frame was queued for.
    pub async fn submit(&self, id: MessageId, message: Message) -> usize {
        let mut writer = self.store.write().await;
        let stored = writer.insert(id.clone(), message);
        self.metrics.message_ingested();

        self.broadcaster
            .broadcast(&Event::Add { id: &id, message: stored })
            .await
    }

    /// Remove a message and, if it existed, announce the removal to every
    /// viewer, the requester included. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut writer = self.store.write().await;
        if !writer.remove(id) {
            debug!("Remove of unknown message {id} ignored");
            return false;
        }
        self.metrics.message_removed();

        self.broadcaster.broadcast(&Event::Del { id }).await;
        true
    }

    /// Register a viewer and queue its `sync` frame.
    ///
    /// Returns the number of messages in the snapshot.
    pub async fn attach(&self, handle: &Arc<ConnectionHandle>) -> Result<usize> {
        let view = self.store.read().await;
        let frame = Event::Sync {
            messages: view.messages(),
        }
        .to_frame()?;

        self.registry.register(Arc::clone(handle)).await;

        match handle.try_enqueue(frame) {
            EnqueueOutcome::Queued => Ok(view.len()),
            EnqueueOutcome::Full | EnqueueOutcome::Closed => Err(HubError::SendBufferFull {
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Drop a viewer from the registry. Safe to call more than once.
    pub async fn detach(&self, connection_id: ConnectionId) -> bool {
        self.registry.unregister(connection_id).await
    }
}
