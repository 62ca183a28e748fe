
use crate::{Frame, Message};

use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

/// Build a message from (field, value) pairs; repeated fields keep every value
pub(crate) fn message(fields: &[(&str, &str)]) -> Message {
    let mut message = Message::new();
    for (name, value) in fields {
        message
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    message
}

/// Receive the next queued frame as JSON, failing the test after a second
pub(crate) async fn next_json(rx: &mut mpsc::Receiver<Frame>) -> serde_json::Value {
    let frame = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("queue closed");
    serde_json::from_str(frame.as_str()).expect("frame is not JSON")
}
