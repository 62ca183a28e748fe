use crate::MessageId;

use serde::Deserialize;

pub const REMOVE_ACTION: &str = "remove";

/// A request sent by a viewer: `{"action": "remove", "id": "<message id>"}`.
///
/// Parsing is lenient. A payload that is not valid JSON, or not an
/// object of string fields, becomes an empty frame whose action matches
/// nothing, so malformed input is dropped instead of ending the connection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundFrame {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub id: String,
}

/// What the hub should do with an inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundAction {
    Remove(MessageId),
    /// Anything else, including the empty action of a malformed frame
    Ignore(String),
}

impl InboundFrame {
    pub fn parse(payload: &[u8]) -> Self {
        serde_json::from_slice(payload).unwrap_or_default()
    }

    pub fn into_action(self) -> InboundAction {
        if self.action == REMOVE_ACTION {
            InboundAction::Remove(self.id)
        } else {
            InboundAction::Ignore(self.action)
        }
    }
}
