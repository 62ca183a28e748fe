use serde::Serialize;

pub const QUEUED_MESSAGE: &str = "Queued. Thank you.";

/// Body returned once a message has been accepted
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub id: String,
    pub message: &'static str,
}

impl QueuedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: QUEUED_MESSAGE,
        }
    }
}
