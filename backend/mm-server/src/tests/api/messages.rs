use crate::{generated_message_id, resolve_message_id};

use mm_hub::Message;

use googletest::prelude::*;

fn message(fields: &[(&str, &str)]) -> Message {
    let mut message = Message::new();
    for (name, value) in fields {
        message
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    message
}

#[test]
fn given_no_id_field_when_resolving_then_timestamp_at_domain() {
    let msg = message(&[("to", "a@example.com")]);

    let id = resolve_message_id("example.com", &msg, 1_700_000_000_123_456_789);

    assert_that!(id, eq("1700000000123456789@example.com"));
}

#[test]
fn given_id_field_when_resolving_then_overrides_generated() {
    let msg = message(&[("h:message-id", "custom-1"), ("h:message-id", "custom-2")]);

    let id = resolve_message_id("example.com", &msg, 42);

    assert_that!(id, eq("custom-1"));
}

#[test]
fn given_id_field_in_other_case_when_resolving_then_still_overrides() {
    let msg = message(&[("H:Message-Id", "<abc@mail>")]);

    let id = resolve_message_id("example.com", &msg, 42);

    assert_that!(id, eq("<abc@mail>"));
}

#[test]
fn given_similar_field_name_when_resolving_then_not_used() {
    let msg = message(&[("h:message-id-extra", "nope"), ("message-id", "nope")]);

    let id = resolve_message_id("mg.example.org", &msg, 7);

    assert_that!(id, eq("7@mg.example.org"));
}

#[test]
fn given_domain_when_generating_then_nanos_prefix() {
    assert_that!(generated_message_id("d", 12), ends_with("@d"));
    assert_that!(generated_message_id("d", 12), starts_with("12"));
}
