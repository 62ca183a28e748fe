#![allow(dead_code)]

//! Test infrastructure for mm-server API tests

use mm_config::MailgunConfig;
use mm_hub::{AppState, ConnectionConfig, Frame};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

pub const TEST_API_KEY: &str = "key-test-0123456789";
pub const TEST_DOMAIN: &str = "sandbox.example.com";
pub const BOUNDARY: &str = "mm-test-boundary";

/// Create AppState for testing
pub fn create_test_app_state() -> AppState {
    AppState::new(
        ConnectionConfig::default(),
        MailgunConfig {
            api_key: TEST_API_KEY.to_string(),
            ..MailgunConfig::default()
        },
    )
}

/// Router over a throwaway static directory
pub fn create_test_router(state: AppState) -> Router {
    mm_server::build_router(state, std::env::temp_dir().join("mm-server-tests-no-static"))
}

/// `Authorization` header value for the given credentials
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Authorized urlencoded submission
pub fn form_request(domain: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v3/{domain}/messages"))
        .header("Authorization", basic_auth("api", TEST_API_KEY))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One multipart part: (name, optional filename, content)
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

/// Encode parts as a `multipart/form-data` body using [`BOUNDARY`]
pub fn multipart_body(parts: &[Part<'_>]) -> String {
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

/// Authorized multipart submission
pub fn multipart_request(domain: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v3/{domain}/messages"))
        .header("Authorization", basic_auth("api", TEST_API_KEY))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Collect a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Collect a response body as bytes
pub async fn raw_body(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Next frame queued for a viewer, as JSON
pub async fn next_frame(rx: &mut mpsc::Receiver<Frame>) -> serde_json::Value {
    let frame = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("queue closed");
    serde_json::from_str(frame.as_str()).unwrap()
}
