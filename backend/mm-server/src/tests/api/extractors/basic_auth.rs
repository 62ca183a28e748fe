use crate::ApiKeyAuth;
use crate::api::extractors::basic_auth::parse_basic_credentials;

use mm_config::MailgunConfig;
use mm_hub::{AppState, ConnectionConfig};

use axum::{body::Body, extract::FromRequestParts, http::Request};
use base64::{Engine, engine::general_purpose::STANDARD};
use googletest::prelude::*;

fn state_with_key(api_key: &str) -> AppState {
    AppState::new(
        ConnectionConfig::default(),
        MailgunConfig {
            api_key: api_key.to_string(),
            ..MailgunConfig::default()
        },
    )
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

async fn authenticate(state: &AppState, authorization: Option<&str>) -> bool {
    let mut builder = Request::builder().uri("/v3/example.com/messages");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();

    ApiKeyAuth::from_request_parts(&mut parts, state).await.is_ok()
}

#[tokio::test]
async fn given_correct_key_when_authenticating_then_accepted() {
    let state = state_with_key("key-123");

    assert!(authenticate(&state, Some(&basic("api", "key-123"))).await);
}

#[tokio::test]
async fn given_wrong_password_when_authenticating_then_rejected() {
    let state = state_with_key("key-123");

    assert!(!authenticate(&state, Some(&basic("api", "nope"))).await);
}

#[tokio::test]
async fn given_wrong_user_when_authenticating_then_rejected() {
    let state = state_with_key("key-123");

    assert!(!authenticate(&state, Some(&basic("admin", "key-123"))).await);
}

#[tokio::test]
async fn given_missing_header_when_authenticating_then_rejected() {
    let state = state_with_key("key-123");

    assert!(!authenticate(&state, None).await);
}

#[tokio::test]
async fn given_unset_key_when_empty_password_then_accepted() {
    // Given - no key configured, so the empty password matches
    let state = state_with_key("");

    // When / Then
    assert!(authenticate(&state, Some(&basic("api", ""))).await);
    assert!(!authenticate(&state, None).await);
}

#[tokio::test]
async fn given_bearer_scheme_when_authenticating_then_rejected() {
    let state = state_with_key("key-123");

    assert!(!authenticate(&state, Some("Bearer key-123")).await);
}

#[test]
fn given_lowercase_scheme_when_parsed_then_credentials_decoded() {
    let header = format!("basic {}", STANDARD.encode("api:key"));

    assert_eq!(
        parse_basic_credentials(&header),
        Some(("api".to_string(), "key".to_string()))
    );
}

#[test]
fn given_password_with_colons_when_parsed_then_split_at_first_colon() {
    let header = basic("api", "a:b:c");

    assert_eq!(
        parse_basic_credentials(&header),
        Some(("api".to_string(), "a:b:c".to_string()))
    );
}

#[test]
fn given_invalid_base64_when_parsed_then_none() {
    assert_that!(parse_basic_credentials("Basic !!!"), none());
    assert_that!(parse_basic_credentials("Basic"), none());
    assert_that!(
        parse_basic_credentials(&format!("Basic {}", STANDARD.encode("no-colon"))),
        none()
    );
}
