pub mod create_account;

// Re-export for convenience
pub use create_account::{CreateAccountError, CreateAccountUseCase, CreatedAccount};
