pub mod create_account;
pub mod error;

pub use create_account::{CreateAccountResponse, ResponseMeta, create_account};
pub use error::{AccountApiError, ErrorResponse};
