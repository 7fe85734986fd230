//! Session token issuing and verification.
//!
//! Tokens are stateless HS256 JWTs: nothing is stored server-side and a
//! token stays valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;

use crate::auth::Claims;
use crate::types::Role;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expires_secs: i64,
}

impl JwtConfig {
    /// Lifetime of a session token: 24 hours.
    pub const DEFAULT_EXPIRY_SECS: i64 = 86_400;
}

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// Token has expired.
    #[error("Token has expired")]
    Expired,

    /// Token is malformed or its signature does not verify.
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expires_secs", &self.config.token_expires_secs)
            .field("secret", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a token for a principal, valid for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Encoding` if signing fails or the configured
    /// lifetime does not fit in a timestamp.
    pub fn issue(&self, subject_id: &str, email: &str, role: Role) -> Result<String, JwtError> {
        let expires_at = Duration::try_seconds(self.config.token_expires_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::Encoding(format!(
                    "token lifetime of {}s is out of range",
                    self.config.token_expires_secs
                ))
            })?;
        self.sign(&Claims::new(subject_id, email, role, expires_at))
    }

    /// Signs arbitrary claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Encoding` if signing fails.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// Verifies a token and returns its claims.
    ///
    /// A token is valid iff its signature verifies and the current time is
    /// strictly before its expiry; no leeway is granted.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` once the expiry has passed and
    /// `JwtError::Invalid` for every other failure.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })?;

        // `exp` is checked with `>` by the library; the boundary second is
        // already expired here.
        if claims.exp <= Utc::now().timestamp() {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    /// Returns the token lifetime in seconds.
    #[must_use]
    pub const fn token_expires_in(&self) -> i64 {
        self.config.token_expires_secs
    }
}
