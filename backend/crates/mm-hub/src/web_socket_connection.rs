use crate::{
    ConnectionConfig, ConnectionHandle, ConnectionId, Frame, HubError, InboundAction,
    InboundFrame, MessageHub, Metrics, Result as HubErrorResult, ShutdownGuard,
};

use std::fmt::Display;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use chrono::Utc;
use error_location::ErrorLocation;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// How long the writer may spend closing the transport
const SINK_CLOSE_TIMEOUT: Duration = Duration::from_secs(1);
/// How long teardown waits for the writer before aborting it
const WRITER_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Manages a single viewer connection
///
/// Connecting -> Open -> Closing -> Closed. Once attached, a spawned writer
/// drains the outbound queue and sends keepalive pings while the reader
/// handles inbound requests. Either side ending, a peer close frame, or
/// server shutdown closes the handle; the other side sees the close signal
/// and stops, then the connection is unregistered.
pub struct WebSocketConnection {
    handle: Arc<ConnectionHandle>,
    outbound: mpsc::Receiver<Frame>,
    hub: MessageHub,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl WebSocketConnection {
    pub fn new(hub: MessageHub, config: ConnectionConfig, metrics: Metrics) -> Self {
        let (handle, outbound) = ConnectionHandle::channel(config.send_buffer_size);
        Self {
            handle,
            outbound,
            hub,
            config,
            metrics,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.handle.id()
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        shutdown_guard: ShutdownGuard,
    ) -> HubErrorResult<()> {
        let (ws_sender, ws_receiver) = socket.split();
        self.run(ws_sender, ws_receiver, shutdown_guard).await
    }

    /// Drive the connection over any message sink/stream pair.
    pub async fn run<S, R, E>(
        self,
        ws_sender: S,
        mut ws_receiver: R,
        mut shutdown_guard: ShutdownGuard,
    ) -> HubErrorResult<()>
    where
        S: Sink<Message> + Unpin + Send + 'static,
        S::Error: Display + Send,
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let Self {
            handle,
            outbound,
            hub,
            config,
            metrics,
        } = self;
        let connection_id = handle.id();

        // Connecting -> Open: register and queue the sync snapshot
        match hub.attach(&handle).await {
            Ok(snapshot_len) => {
                log::info!(
                    "Viewer connection {connection_id} opened, sync with {snapshot_len} messages"
                );
            }
            Err(e) => {
                log::error!("Failed to attach connection {connection_id}: {e}");
                handle.close();
                hub.detach(connection_id).await;
                return Err(e);
            }
        }
        metrics.connection_established();

        let send_task = tokio::spawn(Self::write_loop(
            ws_sender,
            outbound,
            Arc::clone(&handle),
            config.heartbeat_interval(),
            metrics.clone(),
        ));

        let (read_result, shutdown) = tokio::select! {
            result = Self::read_loop(&mut ws_receiver, &handle, &hub, &metrics) => (result, false),
            _ = shutdown_guard.wait() => {
                log::info!("Shutting down connection {connection_id} gracefully");
                (Ok(()), true)
            }
        };

        // Open -> Closing
        handle.close();

        // Closing -> Closed; unregister before waiting on a possibly stuck writer
        hub.detach(connection_id).await;

        let mut send_task = send_task;
        let write_result = match tokio::time::timeout(WRITER_JOIN_TIMEOUT, &mut send_task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(HubError::Internal {
                message: format!("writer task failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => {
                log::warn!("Writer for connection {connection_id} did not stop, aborting it");
                send_task.abort();
                Ok(())
            }
        };

        let result = read_result.and(write_result);
        let reason = match (&result, shutdown) {
            (Err(_), _) => "error",
            (Ok(()), true) => "shutdown",
            (Ok(()), false) => "normal",
        };
        metrics.connection_closed(reason);

        let open_for = Utc::now() - handle.connected_at();
        log::info!(
            "Viewer connection {connection_id} closed ({reason}) after {}s",
            open_for.num_seconds()
        );

        result
    }

    /// Drain the outbound queue and ping on a fixed interval until the
    /// connection closes, the queue closes, or a write fails.
    async fn write_loop<S>(
        mut ws_sender: S,
        mut outbound: mpsc::Receiver<Frame>,
        handle: Arc<ConnectionHandle>,
        heartbeat_interval: Duration,
        metrics: Metrics,
    ) -> HubErrorResult<()>
    where
        S: Sink<Message> + Unpin,
        S::Error: Display,
    {
        let mut keepalive =
            tokio::time::interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            let message = tokio::select! {
                _ = handle.closed() => break Ok(()),

                frame = outbound.recv() => match frame {
                    Some(frame) => Message::Text(frame),
                    None => break Ok(()),
                },

                _ = keepalive.tick() => Message::Ping(Bytes::new()),
            };
            let is_ping = matches!(message, Message::Ping(_));

            // A peer that stops reading leaves the send pending forever
            let sent = tokio::select! {
                sent = ws_sender.send(message) => sent,
                _ = handle.closed() => break Ok(()),
            };

            match sent {
                Ok(()) if is_ping => metrics.ping_sent(),
                Ok(()) => metrics.frame_sent(),
                Err(e) => {
                    log::warn!("Write to connection {} failed: {e}", handle.id());
                    break Err(HubError::connection_closed(format!("write failed: {e}")));
                }
            }
        };

        handle.close();
        outbound.close();
        if tokio::time::timeout(SINK_CLOSE_TIMEOUT, ws_sender.close())
            .await
            .is_err()
        {
            log::debug!("Transport for connection {} did not close in time", handle.id());
        }

        result
    }

    /// Read inbound frames until the peer goes away or the connection closes.
    async fn read_loop<R, E>(
        ws_receiver: &mut R,
        handle: &ConnectionHandle,
        hub: &MessageHub,
        metrics: &Metrics,
    ) -> HubErrorResult<()>
    where
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let connection_id = handle.id();

        loop {
            tokio::select! {
                _ = handle.closed() => return Ok(()),

                msg = ws_receiver.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        Self::dispatch(text.as_str().as_bytes(), connection_id, hub, metrics).await;
                    }
                    Some(Ok(Message::Binary(data))) => {
                        Self::dispatch(&data, connection_id, hub, metrics).await;
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) => {
                        log::info!("Received close frame from connection {connection_id}");
                        return Ok(());
                    }
                    Some(Err(e)) => {
                        log::warn!("WebSocket error on connection {connection_id}: {e}");
                        return Err(HubError::connection_closed(format!("read failed: {e}")));
                    }
                    None => {
                        log::info!("Connection {connection_id} closed by client");
                        return Ok(());
                    }
                },
            }
        }
    }

    /// Apply one inbound request. Unknown actions and malformed payloads are
    /// ignored.
    async fn dispatch(
        payload: &[u8],
        connection_id: ConnectionId,
        hub: &MessageHub,
        metrics: &Metrics,
    ) {
        match InboundFrame::parse(payload).into_action() {
            InboundAction::Remove(id) => {
                metrics.frame_received("remove");
                let existed = hub.remove(&id).await;
                log::debug!("Connection {connection_id} removed {id} (existed: {existed})");
            }
            InboundAction::Ignore(action) => {
                metrics.frame_received("ignored");
                log::debug!("Ignoring action {action:?} from connection {connection_id}");
            }
        }
    }
}
