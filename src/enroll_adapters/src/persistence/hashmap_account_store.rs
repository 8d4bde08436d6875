use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use enroll_core::{
    AccountRecord, AccountStore, AccountStoreError, Email, ReferralCode,
};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};

/// In-memory account store, keyed by email. Used in tests and local wiring.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<String, AccountRecord>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a stored record by email. Test helper, not part of the port.
    pub async fn get(&self, email: &str) -> Option<AccountRecord> {
        let accounts = self.accounts.read().await;
        accounts.get(email).cloned()
    }

    pub async fn count(&self) -> usize {
        let accounts = self.accounts.read().await;
        accounts.len()
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn find_match(
        &self,
        criteria: &Map<String, Value>,
    ) -> Result<Option<AccountRecord>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|record| record.matches(criteria))
            .cloned())
    }

    async fn credit_referrer(
        &self,
        code: &ReferralCode,
        new_member: &Email,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if let Some(referrer) = accounts
            .values_mut()
            .find(|record| record.referral_code() == Some(code.as_str()))
        {
            referrer.credit_referral(new_member.as_ref().expose_secret());
        }
        Ok(())
    }

    async fn insert(&self, record: AccountRecord) -> Result<AccountRecord, AccountStoreError> {
        let email = record
            .email()
            .ok_or_else(|| AccountStoreError::UnexpectedError("record has no email".to_string()))?
            .to_owned();

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        accounts.insert(email, record.clone());
        Ok(record)
    }
}
