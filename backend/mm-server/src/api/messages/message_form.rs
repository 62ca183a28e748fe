//! Form body extraction for submitted messages

use crate::ApiError;

use mm_hub::{AppState, Message};

use std::future::Future;

use axum::{
    extract::{Form, FromRequest, Multipart, Query, Request},
    http::header::CONTENT_TYPE,
};

const MULTIPART_FORM_DATA: &str = "multipart/form-data";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A submitted message: every form field with all of its values.
///
/// Accepts `multipart/form-data` (file parts are skipped) and
/// `application/x-www-form-urlencoded` bodies. Query string fields are
/// merged in after the body fields. Any other content type contributes no
/// body fields.
#[derive(Debug)]
pub struct MessageForm(pub Message);

impl MessageForm {
    fn push(&mut self, name: String, value: String) {
        self.0.entry(name).or_default().push(value);
    }

    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = MessageForm(Message::new());
        for (name, value) in pairs {
            form.push(name, value);
        }
        form
    }
}

impl FromRequest<AppState> for MessageForm {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request(
        req: Request,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let query = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
                .map(|Query(pairs)| pairs)
                .map_err(|e| ApiError::bad_request(e.body_text()))?;

            let content_type = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_ascii_lowercase();

            let mut form = if content_type.starts_with(MULTIPART_FORM_DATA) {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                Self::read_multipart(multipart).await?
            } else if content_type.starts_with(FORM_URLENCODED) {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                Self::from_pairs(pairs)
            } else {
                MessageForm(Message::new())
            };

            for (name, value) in query {
                form.push(name, value);
            }

            Ok(form)
        }
    }
}

impl MessageForm {
    async fn read_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = MessageForm(Message::new());

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            if field.file_name().is_some() {
                log::debug!("Skipping attachment part {:?}", field.name());
                continue;
            }
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            form.push(name, value);
        }

        Ok(form)
    }
}
