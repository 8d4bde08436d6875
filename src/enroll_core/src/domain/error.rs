use thiserror::Error;

use crate::domain::account::MIN_ATTRIBUTES;

/// Validation errors for inbound registration data.
///
/// Every variant maps to the same client-error response; the distinctions
/// exist for logging and tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Payload must contain at least {MIN_ATTRIBUTES} attributes")]
    TooFewAttributes,

    #[error("Attribute `{0}` is server-assigned")]
    ReservedAttribute(String),

    #[error("Missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("Invalid referral code")]
    InvalidReferralCode,
}
