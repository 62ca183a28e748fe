pub mod message_form;
#[allow(clippy::module_inception)]
pub mod messages;
pub mod queued_response;
