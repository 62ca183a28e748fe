use crate::{Message, Messages, Result};

use axum::extract::ws::Utf8Bytes;
use serde::Serialize;

/// One serialized event, ready to write as a WebSocket text frame.
/// Cloning shares the underlying buffer.
pub type Frame = Utf8Bytes;

/// A store change (or full snapshot) announced to viewers
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A message was submitted (or replaced)
    Add { id: &'a str, message: &'a Message },
    /// A message was removed
    Del { id: &'a str },
    /// Full store contents, sent once to a newly attached viewer
    Sync { messages: &'a Messages },
}

/// Wire shape: `{"action": .., "id": .., "data": ..}`; `sync` carries no id.
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    data: T,
}

#[derive(Serialize)]
struct EmptyData {}

impl Event<'_> {
    pub fn action(&self) -> &'static str {
        match self {
            Event::Add { .. } => "add",
            Event::Del { .. } => "del",
            Event::Sync { .. } => "sync",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match *self {
            Event::Add { id, .. } | Event::Del { id } => Some(id),
            Event::Sync { .. } => None,
        }
    }

    /// Serialize into a transport frame.
    pub fn to_frame(&self) -> Result<Frame> {
        let action = self.action();

        let json = match *self {
            Event::Add { id, message } => serde_json::to_string(&Envelope {
                action,
                id: Some(id),
                data: message,
            })?,
            Event::Del { id } => serde_json::to_string(&Envelope {
                action,
                id: Some(id),
                data: EmptyData {},
            })?,
            Event::Sync { messages } => serde_json::to_string(&Envelope {
                action,
                id: None,
                data: messages,
            })?,
        };

        Ok(Frame::from(json))
    }
}
