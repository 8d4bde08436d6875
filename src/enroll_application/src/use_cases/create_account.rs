use enroll_core::{
    AccountPayload, AccountRecord, AccountStore, AccountStoreError, Email, EmailClient,
    PasswordHasher, ReferralCode, TokenSigner,
};
use serde_json::Value;
use thiserror::Error;

pub const WELCOME_EMAIL_SUBJECT: &str = "Welcome! Please verify your account";

#[derive(Debug, Error)]
pub enum CreateAccountError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("{0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Email delivery failed: {0}")]
    EmailError(String),
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Token signing failed: {0}")]
    TokenError(String),
}

/// Outcome of a successful account creation: the stored record with the
/// password removed, and a bearer token signed over the full record.
pub struct CreatedAccount {
    pub record: AccountRecord,
    pub bearer: String,
}

/// Create account use case - orchestrates the registration flow
pub struct CreateAccountUseCase<S, E, H, T> {
    account_store: S,
    email_client: E,
    password_hasher: H,
    token_signer: T,
}

impl<S, E, H, T> CreateAccountUseCase<S, E, H, T>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient,
    H: PasswordHasher,
    T: TokenSigner,
{
    pub fn new(account_store: S, email_client: E, password_hasher: H, token_signer: T) -> Self {
        Self {
            account_store,
            email_client,
            password_hasher,
            token_signer,
        }
    }

    /// Execute the create-account use case.
    ///
    /// Each step gates the next: duplicate check, welcome email, password
    /// hashing, then persistence. The referral credit is the one exception -
    /// it is dispatched as a detached task and can never change the outcome.
    #[tracing::instrument(name = "CreateAccountUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        payload: AccountPayload,
        referral_code: Option<ReferralCode>,
    ) -> Result<CreatedAccount, CreateAccountError> {
        let criteria = payload.match_criteria();
        if self.account_store.find_match(&criteria).await?.is_some() {
            return Err(CreateAccountError::AccountAlreadyExists);
        }

        let content = welcome_email_content(&payload);
        self.email_client
            .send_email(payload.email(), WELCOME_EMAIL_SUBJECT, &content)
            .await
            .map_err(CreateAccountError::EmailError)?;

        let password_hash = self
            .password_hasher
            .hash_password(payload.password().clone())
            .await
            .map_err(CreateAccountError::HashingError)?;

        if let Some(code) = referral_code {
            self.dispatch_referral_credit(code, payload.email().clone());
        }

        let record = payload.into_record(password_hash, ReferralCode::issue());
        let stored = self.account_store.insert(record).await?;

        let bearer = self
            .token_signer
            .sign(&stored)
            .map_err(CreateAccountError::TokenError)?;

        Ok(CreatedAccount {
            record: stored.sanitized(),
            bearer,
        })
    }

    /// Credit the referrer without blocking the main flow. The task is never
    /// joined; a failed credit is logged and the signup proceeds as usual.
    fn dispatch_referral_credit(&self, code: ReferralCode, new_member: Email) {
        let store = self.account_store.clone();
        tokio::spawn(async move {
            if let Err(error) = store.credit_referrer(&code, &new_member).await {
                tracing::warn!(%error, referral_code = %code, "failed to credit referrer");
            }
        });
    }
}

fn welcome_email_content(payload: &AccountPayload) -> String {
    let details = Value::Object(payload.match_criteria());
    format!("A new account registration was received:\n{details}")
}
