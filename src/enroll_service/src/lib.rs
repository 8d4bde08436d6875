mod account_service;
mod helpers;
mod tracing;

pub use account_service::AccountService;
pub use helpers::{configure_postgresql, get_postgres_pool};

pub use crate::tracing::{init_tracing, make_span_with_request_id, on_request, on_response};

// Re-export commonly used types
pub use enroll_core::{AccountStore, Email, EmailClient, PasswordHasher, TokenSigner};
