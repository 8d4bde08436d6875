use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enroll_application::CreateAccountError;
use enroll_core::{AccountError, AccountStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("Invalid header or body")]
    InvalidRequest,

    #[error("An account with that email already exists.")]
    AccountAlreadyExists,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AccountApiError::InvalidRequest => (StatusCode::BAD_REQUEST, self.to_string()),

            AccountApiError::AccountAlreadyExists => (StatusCode::CONFLICT, self.to_string()),

            AccountApiError::UnexpectedError(detail) => {
                // Full detail stays server-side; the caller only sees a
                // generic failure.
                tracing::error!(error = %detail, "request failed with server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Unexpected server error"),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<AccountError> for AccountApiError {
    fn from(_: AccountError) -> Self {
        AccountApiError::InvalidRequest
    }
}

impl From<CreateAccountError> for AccountApiError {
    fn from(error: CreateAccountError) -> Self {
        match error {
            CreateAccountError::AccountAlreadyExists
            | CreateAccountError::AccountStoreError(AccountStoreError::AccountAlreadyExists) => {
                AccountApiError::AccountAlreadyExists
            }
            CreateAccountError::AccountStoreError(e) => {
                AccountApiError::UnexpectedError(e.to_string())
            }
            CreateAccountError::EmailError(e)
            | CreateAccountError::HashingError(e)
            | CreateAccountError::TokenError(e) => AccountApiError::UnexpectedError(e),
        }
    }
}
