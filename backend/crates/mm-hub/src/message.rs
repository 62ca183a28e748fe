use std::collections::{BTreeMap, HashMap};

/// Caller-assigned message identifier. Opaque to the hub; uniqueness is the
/// submitter's concern and a repeated id replaces the earlier message.
pub type MessageId = String;

/// One submitted message: form field name to every value sent for it, in
/// submission order.
pub type Message = BTreeMap<String, Vec<String>>;

/// Full store contents as sent in a `sync` frame.
pub type Messages = HashMap<MessageId, Message>;
