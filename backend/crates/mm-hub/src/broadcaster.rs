use crate::{ConnectionRegistry, EnqueueOutcome, Event, Metrics};

use log::{debug, error, warn};

/// Fans events out to every open connection in the registry.
///
/// Delivery is best effort. Each frame is offered with a non-blocking
/// enqueue, so one stalled viewer never holds up the others: a viewer whose
/// bounded queue is full is closed on the spot and its lifecycle task tears
/// it down.
pub struct Broadcaster {
    registry: ConnectionRegistry,
    metrics: Metrics,
}

impl Broadcaster {
    pub fn new(registry: ConnectionRegistry, metrics: Metrics) -> Self {
        Self { registry, metrics }
    }

    /// Serialize `event` once and enqueue it for every open connection.
    ///
    /// Returns how many connections accepted the frame.
    pub async fn broadcast(&self, event: &Event<'_>) -> usize {
        let action = event.action();

        let frame = match event.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to serialize {action} event: {e}");
                return 0;
            }
        };

        let mut delivered = 0;
        self.registry
            .for_each(|handle| {
                if !handle.is_open() {
                    return;
                }

                match handle.try_enqueue(frame.clone()) {
                    EnqueueOutcome::Queued => delivered += 1,
                    EnqueueOutcome::Full => {
                        warn!(
                            "Connection {} is not draining its queue ({} frames dropped), closing it",
                            handle.id(),
                            handle.dropped_frames()
                        );
                        self.metrics.slow_consumer_closed();
                        handle.close();
                    }
                    EnqueueOutcome::Closed => {
                        debug!("Connection {} went away before {action} delivery", handle.id());
                        handle.close();
                    }
                }
            })
            .await;

        debug!(
            "Broadcast {action}{} to {delivered} connections",
            event.id().map(|id| format!(" {id}")).unwrap_or_default()
        );
        self.metrics.broadcast_published(action, delivered);

        delivered
    }
}

impl Clone for Broadcaster {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
