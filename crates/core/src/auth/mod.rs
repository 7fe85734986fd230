//! Authentication and role resolution.
//!
//! This module provides:
//! - Credential verification across the three stored formats, with
//!   migration to the salted format
//! - The principal model and the fixed login probe order
//! - The `PrincipalStore` seam implemented by the database layer
//! - The `AuthService` login state machine

mod error;
mod password;
mod principal;
mod service;
mod store;

#[cfg(test)]
mod password_props;

pub use error::AuthError;
pub use password::{
    CredentialFormat, SALT_SEPARATOR, Verification, hash_password, hash_with_salt,
    verify_and_maybe_migrate,
};
pub use principal::{
    LoginEntry, PrincipalKey, PrincipalProfile, PrincipalRecord, STAFF_PROBE_ORDER,
};
pub use service::{AuthService, LoginOutcome};
pub use store::{PrincipalStore, StoreError};
