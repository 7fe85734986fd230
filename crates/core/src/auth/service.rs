//! Login state machine.
//!
//! A login moves through credential presence checks, role resolution,
//! password verification, an optional credential migration, last-login
//! bookkeeping and token issuance. Any failing check rejects the attempt;
//! the two bookkeeping writes are best-effort and never fail a login.

use std::sync::Arc;

use parkpro_shared::JwtService;
use parkpro_shared::auth::LoginResponse;
use tracing::{info, warn};

use super::error::AuthError;
use super::password::verify_and_maybe_migrate;
use super::principal::{LoginEntry, PrincipalRecord};
use super::store::PrincipalStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated principal.
    pub principal: PrincipalRecord,
    /// Signed session token.
    pub token: String,
    /// Landing page hint for the client.
    pub dashboard: &'static str,
}

impl LoginOutcome {
    /// Builds the wire response.
    #[must_use]
    pub fn into_response(self) -> LoginResponse {
        LoginResponse {
            message: "Login successful".to_string(),
            token: self.token,
            user: self.principal.user_info(),
            dashboard: self.dashboard.to_string(),
        }
    }
}

/// Authenticates principals against a store and issues session tokens.
#[derive(Debug, Clone)]
pub struct AuthService<S> {
    store: S,
    jwt: Arc<JwtService>,
}

impl<S: PrincipalStore> AuthService<S> {
    /// Creates a new service.
    pub fn new(store: S, jwt: Arc<JwtService>) -> Self {
        Self { store, jwt }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the first principal holding `email` among the entry's
    /// roles, probing in order.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if a lookup fails.
    pub async fn resolve(
        &self,
        entry: LoginEntry,
        email: &str,
    ) -> Result<Option<PrincipalRecord>, AuthError> {
        for role in entry.probe_order() {
            if let Some(record) = self.store.find_by_email(*role, email).await? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Runs a complete login attempt.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingCredentials` if email or password is absent or
    ///   blank.
    /// - `AuthError::InvalidCredentials` if no principal matches or the
    ///   password is wrong.
    /// - `AuthError::Store` if the lookup fails.
    /// - `AuthError::Token` if the token cannot be signed.
    pub async fn login(
        &self,
        entry: LoginEntry,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginOutcome, AuthError> {
        let email = email.map(str::trim).unwrap_or_default();
        let password = password.unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(mut principal) = self.resolve(entry, email).await? else {
            info!(?entry, "Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let verification = verify_and_maybe_migrate(password, &principal.credential);
        if !verification.matched {
            info!(role = %principal.role(), id = principal.key.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(migrated) = verification.migrated {
            match self.store.update_credential(principal.key, &migrated).await {
                Ok(()) => {
                    info!(role = %principal.role(), id = principal.key.id, "Migrated legacy credential");
                    principal.credential = migrated;
                }
                Err(e) => {
                    warn!(role = %principal.role(), id = principal.key.id, error = %e, "Credential migration failed");
                }
            }
        }

        if let Err(e) = self.store.record_login(principal.key).await {
            warn!(role = %principal.role(), id = principal.key.id, error = %e, "Failed to record last login");
        }

        let token = self.jwt.issue(
            &principal.key.id.to_string(),
            &principal.profile.email,
            principal.role(),
        )?;

        info!(role = %principal.role(), id = principal.key.id, "Login successful");

        Ok(LoginOutcome {
            dashboard: principal.role().dashboard_path(),
            principal,
            token,
        })
    }
}
