use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use enroll_application::CreateAccountUseCase;
use enroll_core::{
    AccountPayload, AccountRecord, AccountStore, EmailClient, PasswordHasher, ReferralCode,
    TokenSigner,
};
use serde::Serialize;
use serde_json::Value;

use crate::config::constants::CORRELATION_ID_HEADER;

use super::error::AccountApiError;

const REFERRAL_CODE_ATTRIBUTE: &str = "referralCode";

/// Account creation route.
///
/// Validation happens entirely up front: the referral code is stripped from
/// the body, the correlation header and remaining payload are checked, and
/// only then are any collaborators invoked.
#[tracing::instrument(name = "Create account", skip_all)]
pub async fn create_account<S, E, H, T>(
    State((account_store, email_client, password_hasher, token_signer)): State<(S, E, H, T)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + Send + Sync + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
    H: PasswordHasher + Clone + Send + Sync + 'static,
    T: TokenSigner + Clone + Send + Sync + 'static,
{
    let Value::Object(mut attributes) = body else {
        return Err(AccountApiError::InvalidRequest);
    };

    // Extract the inbound referral code before validation; empty or
    // non-string codes are treated as absent.
    let referral_code = match attributes.remove(REFERRAL_CODE_ATTRIBUTE) {
        Some(Value::String(code)) => ReferralCode::parse(&code).ok(),
        _ => None,
    };

    let correlation_id = headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());
    if correlation_id.is_none() {
        return Err(AccountApiError::InvalidRequest);
    }

    let payload = AccountPayload::parse(attributes)?;

    let use_case =
        CreateAccountUseCase::new(account_store, email_client, password_hasher, token_signer);
    let created = use_case.execute(payload, referral_code).await?;

    Ok((
        StatusCode::OK,
        Json(CreateAccountResponse {
            data: created.record,
            meta: ResponseMeta {
                bearer: created.bearer,
            },
        }),
    ))
}

/// Success body: the sanitized record plus the auth token as metadata.
#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub data: AccountRecord,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub bearer: String,
}
