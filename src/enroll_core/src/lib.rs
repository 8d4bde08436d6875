pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{AccountPayload, AccountRecord, MIN_ATTRIBUTES, RESERVED_ATTRIBUTES},
    email::Email,
    error::AccountError,
    password::Password,
    referral_code::ReferralCode,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{EmailClient, PasswordHasher, TokenSigner},
};
