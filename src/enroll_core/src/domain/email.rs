use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use crate::domain::error::AccountError;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// A validated email address.
///
/// Wrapped in `Secret` so it never shows up in debug output or logs.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl TryFrom<Secret<String>> for Email {
    type Error = AccountError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if EMAIL_REGEX.is_match(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(AccountError::InvalidEmail)
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_is_accepted() {
        let email = Email::try_from(Secret::from("a@x.com".to_string()));
        assert!(email.is_ok());
    }

    #[test]
    fn test_email_without_at_sign_is_rejected() {
        let email = Email::try_from(Secret::from("ax.com".to_string()));
        assert_eq!(email, Err(AccountError::InvalidEmail));
    }

    #[test]
    fn test_email_without_domain_is_rejected() {
        let email = Email::try_from(Secret::from("a@".to_string()));
        assert_eq!(email, Err(AccountError::InvalidEmail));
    }

    #[test]
    fn test_empty_email_is_rejected() {
        let email = Email::try_from(Secret::from(String::new()));
        assert_eq!(email, Err(AccountError::InvalidEmail));
    }
}
