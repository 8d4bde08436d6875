use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::{account::AccountRecord, email::Email, password::Password};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Port trait for one-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: Password) -> Result<Secret<String>, String>;
}

/// Port trait for signing authentication tokens over a stored record
pub trait TokenSigner: Send + Sync {
    fn sign(&self, record: &AccountRecord) -> Result<String, String>;
}
