use crate::{ConnectionId, Frame};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

/// Result of offering a frame to a connection's outbound queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    /// Queue at capacity; the frame was dropped
    Full,
    /// Connection closing or its writer is gone; the frame was dropped
    Closed,
}

/// Registry-side view of one live viewer connection.
///
/// The lifecycle task owns the transport; the handle carries only what the
/// broadcaster and the close routine need: the producer end of the bounded
/// outbound queue, the open flag and the close signal.
#[derive(Debug)]
pub struct ConnectionHandle {
    connection_id: ConnectionId,
    connected_at: DateTime<Utc>,
    sender: mpsc::Sender<Frame>,
    open: AtomicBool,
    close_signal: CancellationToken,
    dropped_frames: AtomicU64,
}

impl ConnectionHandle {
    pub fn new(sender: mpsc::Sender<Frame>) -> Self {
        Self {
            connection_id: ConnectionId::new(),
            connected_at: Utc::now(),
            sender,
            open: AtomicBool::new(true),
            close_signal: CancellationToken::new(),
            dropped_frames: AtomicU64::new(0),
        }
    }

    /// Create a handle together with the consumer end of its outbound queue.
    pub fn channel(capacity: usize) -> (Arc<Self>, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Arc::new(Self::new(tx)), rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Offer a frame without waiting.
    pub fn try_enqueue(&self, frame: Frame) -> EnqueueOutcome {
        if !self.is_open() {
            return EnqueueOutcome::Closed;
        }

        match self.sender.try_send(frame) {
            Ok(()) => EnqueueOutcome::Queued,
            Err(TrySendError::Full(_)) => {
                self.dropped_frames.fetch_add(1, Ordering::Relaxed);
                EnqueueOutcome::Full
            }
            Err(TrySendError::Closed(_)) => EnqueueOutcome::Closed,
        }
    }

    /// Mark the connection closed and wake its reader and writer.
    ///
    /// Returns true only for the call that performed the transition; later
    /// calls are no-ops.
    pub fn close(&self) -> bool {
        if self.open.swap(false, Ordering::AcqRel) {
            self.close_signal.cancel();
            true
        } else {
            false
        }
    }

    /// Resolves once close() has been called.
    pub async fn closed(&self) {
        self.close_signal.cancelled().await
    }

    /// Frames dropped because the queue was full
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }
}
