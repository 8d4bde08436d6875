use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    email::Email, error::AccountError, password::Password, referral_code::ReferralCode,
};

/// Minimum number of attributes a registration payload must carry
/// (after the inbound referral code has been removed).
pub const MIN_ATTRIBUTES: usize = 5;

/// Attributes that are assigned by the server and must never be submitted
/// by a client.
pub const RESERVED_ATTRIBUTES: [&str; 3] = ["freeSpots", "balance", "referrals"];

const EMAIL_ATTRIBUTE: &str = "email";
const PASSWORD_ATTRIBUTE: &str = "password";
const REFERRAL_CODE_ATTRIBUTE: &str = "referralCode";
const FREE_SPOTS_ATTRIBUTE: &str = "freeSpots";
const REFERRALS_ATTRIBUTE: &str = "referrals";

/// A validated registration payload.
///
/// The account schema is open-ended: clients may submit arbitrary
/// attributes, so the payload keeps the raw attribute map and only parses
/// out the fields the creation flow needs.
#[derive(Debug, Clone)]
pub struct AccountPayload {
    attributes: Map<String, Value>,
    email: Email,
    password: Password,
}

impl AccountPayload {
    pub fn parse(attributes: Map<String, Value>) -> Result<Self, AccountError> {
        if attributes.len() < MIN_ATTRIBUTES {
            return Err(AccountError::TooFewAttributes);
        }
        for key in RESERVED_ATTRIBUTES {
            if attributes.contains_key(key) {
                return Err(AccountError::ReservedAttribute(key.to_owned()));
            }
        }

        let email = attributes
            .get(EMAIL_ATTRIBUTE)
            .and_then(Value::as_str)
            .ok_or(AccountError::MissingAttribute(EMAIL_ATTRIBUTE))?;
        let email = Email::try_from(Secret::from(email.to_owned()))?;

        let password = attributes
            .get(PASSWORD_ATTRIBUTE)
            .and_then(Value::as_str)
            .ok_or(AccountError::MissingAttribute(PASSWORD_ATTRIBUTE))?;
        let password = Password::try_from(Secret::from(password.to_owned()))?;

        Ok(Self {
            attributes,
            email,
            password,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// The attribute set used to look for a matching existing account.
    ///
    /// Every submitted attribute participates except the password, which is
    /// stored as a one-way hash and can never match the plaintext.
    pub fn match_criteria(&self) -> Map<String, Value> {
        let mut criteria = self.attributes.clone();
        criteria.remove(PASSWORD_ATTRIBUTE);
        criteria
    }

    /// Turn the payload into a persistable record: the plaintext password is
    /// replaced with its hash and the server-issued referral code is set.
    pub fn into_record(
        mut self,
        password_hash: Secret<String>,
        referral_code: ReferralCode,
    ) -> AccountRecord {
        self.attributes.insert(
            PASSWORD_ATTRIBUTE.to_owned(),
            Value::from(password_hash.expose_secret().clone()),
        );
        self.attributes.insert(
            REFERRAL_CODE_ATTRIBUTE.to_owned(),
            Value::from(referral_code.as_str()),
        );
        AccountRecord {
            attributes: self.attributes,
        }
    }
}

/// An account document as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRecord {
    attributes: Map<String, Value>,
}

impl AccountRecord {
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn email(&self) -> Option<&str> {
        self.attributes.get(EMAIL_ATTRIBUTE).and_then(Value::as_str)
    }

    pub fn referral_code(&self) -> Option<&str> {
        self.attributes
            .get(REFERRAL_CODE_ATTRIBUTE)
            .and_then(Value::as_str)
    }

    pub fn free_spots(&self) -> i64 {
        self.attributes
            .get(FREE_SPOTS_ATTRIBUTE)
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    pub fn referrals(&self) -> Vec<&str> {
        self.attributes
            .get(REFERRALS_ATTRIBUTE)
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether every criteria attribute is present with an equal value.
    pub fn matches(&self, criteria: &Map<String, Value>) -> bool {
        criteria
            .iter()
            .all(|(key, value)| self.attributes.get(key) == Some(value))
    }

    /// Record a successful referral: one more free spot, one more entry in
    /// the referrals list.
    pub fn credit_referral(&mut self, new_member_email: &str) {
        let free_spots = self.free_spots();
        self.attributes.insert(
            FREE_SPOTS_ATTRIBUTE.to_owned(),
            Value::from(free_spots + 1),
        );
        let referrals = self
            .attributes
            .entry(REFERRALS_ATTRIBUTE)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = referrals {
            list.push(Value::from(new_member_email));
        }
    }

    /// A copy safe to return to clients: the password hash is removed.
    pub fn sanitized(mut self) -> Self {
        self.attributes.remove(PASSWORD_ATTRIBUTE);
        self
    }
}
