use chrono::Utc;
use enroll_core::{AccountRecord, TokenSigner};
use jsonwebtoken::{EncodingKey, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone)]
pub struct JwtSignerConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

/// Signs bearer tokens over the full stored account record.
#[derive(Clone)]
pub struct JwtTokenSigner {
    config: JwtSignerConfig,
}

impl JwtTokenSigner {
    pub fn new(config: JwtSignerConfig) -> Self {
        Self { config }
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, record: &AccountRecord) -> Result<String, String> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds)
            .ok_or_else(|| String::from("Failed to create token duration"))?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or_else(|| String::from("Duration out of range"))?
            .timestamp();

        let exp: usize = exp
            .try_into()
            .map_err(|_| String::from("Failed to cast i64 to usize"))?;

        let claims = Claims {
            account: record.attributes().clone(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub account: Map<String, Value>,
    pub exp: usize,
}
