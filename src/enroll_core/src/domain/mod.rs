pub mod account;
pub mod email;
pub mod error;
pub mod password;
pub mod referral_code;
