//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{AppState, error::ApiError};
use parkpro_core::auth::PrincipalKey;
use parkpro_shared::{Claims, Role};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates session tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Verifies the token with the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return ApiError::unauthorized("Token is missing").into_response();
    };

    let Some(token) = header.to_str().ok().and_then(extract_bearer_token) else {
        return ApiError::unauthorized("Invalid token: expected a Bearer token").into_response();
    };

    match state.jwt_service.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Extractor for the authenticated principal.
///
/// ```ignore
/// async fn handler(user: AuthUser) -> Result<Json<Value>, ApiError> {
///     user.require(Role::can_manage_staff)?;
///     let id = user.id()?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the principal's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.0.role
    }

    /// Returns the email the token was issued to.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Returns the principal's id within its role table.
    ///
    /// # Errors
    ///
    /// Returns 401 if the subject is not a numeric id.
    pub fn id(&self) -> Result<i32, ApiError> {
        self.0
            .subject_id()
            .parse()
            .map_err(|_| ApiError::unauthorized("Invalid token: malformed subject"))
    }

    /// Returns the principal's key.
    ///
    /// # Errors
    ///
    /// Returns 401 if the subject is not a numeric id.
    pub fn key(&self) -> Result<PrincipalKey, ApiError> {
        Ok(PrincipalKey::new(self.role(), self.id()?))
    }

    /// Checks the caller's role against a capability.
    ///
    /// # Errors
    ///
    /// Returns 403 when the role lacks the capability.
    pub fn require(&self, allowed: impl FnOnce(&Role) -> bool) -> Result<(), ApiError> {
        if allowed(&self.0.role) {
            Ok(())
        } else {
            Err(ApiError::forbidden("Unauthorized access"))
        }
    }

    /// Checks that the caller has exactly this role.
    ///
    /// # Errors
    ///
    /// Returns 403 for any other role.
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        self.require(|r| *r == role)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Token is missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("Bearer ", None)]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def.ghi", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(header), expected);
    }

    #[test]
    fn test_require_checks_capability() {
        let claims = Claims::new("3", "f@example.com", Role::Finance, chrono::Utc::now());
        let user = AuthUser(claims);

        assert!(user.require(Role::can_escalate).is_ok());
        assert!(user.require(Role::can_manage_staff).is_err());
        assert!(user.require_role(Role::Finance).is_ok());
        assert_eq!(user.key().unwrap(), PrincipalKey::new(Role::Finance, 3));
    }
}
