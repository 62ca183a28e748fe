use crate::ApiError;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;

#[tokio::test]
async fn given_unauthorized_when_into_response_then_401_with_empty_body() {
    let response = ApiError::unauthorized("no header").into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn given_bad_request_when_into_response_then_400_with_json_body() {
    let response = ApiError::bad_request("invalid boundary").into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(
        json["error"]["message"],
        "could not parse request: invalid boundary"
    );
}

#[test]
fn given_error_when_displayed_then_includes_message() {
    let error = ApiError::bad_request("truncated body");

    assert!(error.to_string().contains("truncated body"));
}
