//! Basic auth guard for the ingestion API

use crate::ApiError;

use mm_hub::AppState;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};

const BASIC_PREFIX: &str = "basic ";

/// Proof that the request carried the account's API key.
///
/// Mailgun clients authenticate with Basic auth, user `api` and the API key
/// as password. Anything else is rejected with 401.
#[derive(Debug)]
pub struct ApiKeyAuth;

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .ok_or_else(|| ApiError::unauthorized("missing Authorization header"))?
                .to_str()
                .map_err(|_| ApiError::unauthorized("Authorization header is not ASCII"))?;

            let (username, password) = parse_basic_credentials(header)
                .ok_or_else(|| ApiError::unauthorized("malformed Basic credentials"))?;

            if !state.mailgun.authorizes(&username, &password) {
                return Err(ApiError::unauthorized(format!(
                    "bad credentials for user {username:?}"
                )));
            }

            Ok(ApiKeyAuth)
        }
    }
}

/// Decode `Basic <base64(user:password)>`. The scheme name is matched
/// case-insensitively and the password may itself contain colons.
pub fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let prefix = header.get(..BASIC_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BASIC_PREFIX) {
        return None;
    }

    let decoded = STANDARD.decode(&header[BASIC_PREFIX.len()..]).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}
