pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::basic_auth::ApiKeyAuth,
    messages::{
        message_form::MessageForm,
        messages::{generated_message_id, post_message, resolve_message_id},
        queued_response::QueuedResponse,
    },
};

pub use crate::routes::build_router;
