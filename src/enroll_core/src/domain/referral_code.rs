use std::fmt;

use uuid::Uuid;

use crate::domain::error::AccountError;

/// A referral code identifying the account that referred a new signup.
///
/// Codes handed out by this service are UUIDv4; inbound codes are opaque
/// strings and only checked for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Generate a fresh, globally unique code for a newly created account.
    pub fn issue() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(code: &str) -> Result<Self, AccountError> {
        if code.is_empty() {
            return Err(AccountError::InvalidReferralCode);
        }
        Ok(Self(code.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
