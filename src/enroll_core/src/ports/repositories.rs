use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{account::AccountRecord, email::Email, referral_code::ReferralCode};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Port trait for the account persistence store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account whose document contains every criteria attribute.
    async fn find_match(
        &self,
        criteria: &Map<String, Value>,
    ) -> Result<Option<AccountRecord>, AccountStoreError>;

    /// Credit the account owning `code` for referring `new_member`:
    /// increment its free spots and append the new member's email to its
    /// referrals list. A code nobody owns is a no-op, not an error.
    async fn credit_referrer(
        &self,
        code: &ReferralCode,
        new_member: &Email,
    ) -> Result<(), AccountStoreError>;

    /// Persist a new account record, returning it as stored.
    async fn insert(&self, record: AccountRecord) -> Result<AccountRecord, AccountStoreError>;
}
