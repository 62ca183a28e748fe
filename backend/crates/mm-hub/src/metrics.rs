use metrics::{counter, gauge};

/// Metrics collector for hub operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "mm_hub" }
    }

    /// Record new viewer connection opened
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record viewer connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record frame received from a viewer
    pub fn frame_received(&self, action: &str) {
        counter!(format!("{}.frames.received", self.prefix)).increment(1);
        counter!(format!("{}.frames.received.{}", self.prefix, action)).increment(1);
    }

    /// Record frame written to a viewer
    pub fn frame_sent(&self) {
        counter!(format!("{}.frames.sent", self.prefix)).increment(1);
    }

    /// Record keepalive ping written to a viewer
    pub fn ping_sent(&self) {
        counter!(format!("{}.pings.sent", self.prefix)).increment(1);
    }

    /// Record broadcast fan-out
    pub fn broadcast_published(&self, action: &str, recipient_count: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.published.{}", self.prefix, action)).increment(1);
        gauge!(format!("{}.broadcast.recipients", self.prefix)).set(recipient_count as f64);
    }

    /// Record a viewer disconnected for not draining its queue
    pub fn slow_consumer_closed(&self) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.slow_consumer", self.prefix)).increment(1);
    }

    /// Record message accepted into the store
    pub fn message_ingested(&self) {
        counter!(format!("{}.messages.ingested", self.prefix)).increment(1);
    }

    /// Record message removed from the store
    pub fn message_removed(&self) {
        counter!(format!("{}.messages.removed", self.prefix)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
