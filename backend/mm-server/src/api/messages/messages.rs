//! Message ingestion handler

use crate::{ApiKeyAuth, ApiResult, MessageForm, QueuedResponse};

use mm_hub::{AppState, Message, MessageId};

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

/// Field that lets a client choose the message id
pub const MESSAGE_ID_FIELD: &str = "h:message-id";

/// POST /v3/{domain}/messages
pub async fn post_message(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    Path(domain): Path<String>,
    MessageForm(message): MessageForm,
) -> ApiResult<Json<QueuedResponse>> {
    let now_nanos = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
    let id = resolve_message_id(&domain, &message, now_nanos);

    log::info!(
        "Accepted message {id} for {domain} ({} fields)",
        message.len()
    );

    let delivered = state.hub.submit(id.clone(), message).await;
    log::debug!("Message {id} announced to {delivered} viewers");

    Ok(Json(QueuedResponse::new(id)))
}

/// Id for a message: the first value of an `h:message-id` field (any
/// case) when present, else a timestamp-based id for the domain.
pub fn resolve_message_id(domain: &str, message: &Message, now_nanos: i64) -> MessageId {
    message
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(MESSAGE_ID_FIELD))
        .and_then(|(_, values)| values.first())
        .cloned()
        .unwrap_or_else(|| generated_message_id(domain, now_nanos))
}

/// `<unix nanos>@<domain>`
pub fn generated_message_id(domain: &str, now_nanos: i64) -> MessageId {
    format!("{now_nanos}@{domain}")
}
