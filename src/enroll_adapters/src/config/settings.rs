use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment};
use secrecy::Secret;
use serde::Deserialize;

use super::constants;

/// Service configuration, loaded from defaults plus `ENROLL_`-prefixed
/// environment variables (nested keys separated by `__`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub postgres: PostgresSettings,
    pub email_client: EmailClientSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.address", constants::prod::APP_ADDRESS)?
            .set_default(
                "email_client.base_url",
                constants::prod::email_client::BASE_URL,
            )?
            .set_default("email_client.sender", constants::prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_in_millis",
                constants::prod::email_client::TIMEOUT_IN_MILLIS,
            )?
            .set_default("auth.token_ttl_in_seconds", 600_i64)?
            .add_source(
                Environment::with_prefix("ENROLL")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("app.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}
