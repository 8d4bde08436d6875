//! # Enroll - Account Registration Service Library
//!
//! This is a facade crate that re-exports all public APIs from the enroll
//! service components. Use this crate to get access to all registration
//! functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! enroll = { path = "../enroll" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `AccountPayload`, `AccountRecord`, `Email`, etc.
//! - **Repository traits**: `AccountStore`
//! - **Use cases**: `CreateAccountUseCase`
//! - **Adapters**: `PostgresAccountStore`, `PostmarkEmailClient`, `JwtTokenSigner`, etc.
//! - **Service**: `AccountService` - The main entry point for the enroll service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use enroll_core::*;
}

// Re-export most commonly used core types at the root level
pub use enroll_core::{
    AccountError, AccountPayload, AccountRecord, Email, MIN_ATTRIBUTES, Password,
    RESERVED_ATTRIBUTES, ReferralCode,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use enroll_core::{AccountStore, AccountStoreError};
}

// Re-export repository traits at root level
pub use enroll_core::{AccountStore, AccountStoreError, EmailClient, PasswordHasher, TokenSigner};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use enroll_application::*;
}

// Re-export use cases at root level
pub use enroll_application::{CreateAccountError, CreateAccountUseCase, CreatedAccount};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use enroll_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use enroll_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use enroll_adapters::email::*;
    }

    /// Password hashing and token signing
    pub mod auth {
        pub use enroll_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use enroll_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use enroll_adapters::{
    auth::{Argon2PasswordHasher, JwtTokenSigner},
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{HashMapAccountStore, PostgresAccountStore},
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use enroll_service::{AccountService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
