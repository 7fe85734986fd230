//! Persistence seam used by the login flow.

use async_trait::async_trait;
use parkpro_shared::Role;
use thiserror::Error;

use super::principal::{PrincipalKey, PrincipalRecord};

/// Failure reported by a principal store.
///
/// Carries the driver message for logs only.
#[derive(Debug, Error)]
#[error("principal store failure: {0}")]
pub struct StoreError(pub String);

/// Read and bookkeeping access to the principal tables.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Finds the principal of `role` with this email, ignoring case.
    async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<PrincipalRecord>, StoreError>;

    /// Replaces the stored credential of a principal.
    async fn update_credential(
        &self,
        key: PrincipalKey,
        credential: &str,
    ) -> Result<(), StoreError>;

    /// Stamps the principal's last login with the current time.
    async fn record_login(&self, key: PrincipalKey) -> Result<(), StoreError>;
}
