use serde::Deserialize;

/// Credentials of the emulated Mailgun account.
///
/// The API key guards the ingestion endpoint (Basic auth, user `api`).
/// Webhook settings are carried for reporting only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MailgunConfig {
    pub api_key: String,
    pub webhook_key: String,
    pub webhook_url: String,
}

impl MailgunConfig {
    /// Check a Basic auth credential pair against the configured key.
    pub fn authorizes(&self, username: &str, password: &str) -> bool {
        username == "api" && password == self.api_key
    }
}
