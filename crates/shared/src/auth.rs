//! Authentication types for session tokens and login payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Claims carried by a session token.
///
/// The subject id is only unique within the principal's table, so the
/// role is what pins it to a single principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id within its role table, as a string.
    pub user_id: String,
    /// Principal email at issue time.
    pub email: String,
    /// Principal role.
    pub role: Role,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a principal.
    #[must_use]
    pub fn new(user_id: &str, email: &str, role: Role, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the subject id from the claims.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.user_id
    }
}

/// Login request payload.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Principal email.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Profile returned after a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Principal id within its table.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Phone number, empty when unknown.
    pub phone: String,
    /// Principal role.
    pub role: Role,
    /// Park affiliation, empty when none.
    pub park: String,
    /// Avatar URL, empty when none.
    pub avatar_url: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Human readable status.
    pub message: String,
    /// Signed session token.
    pub token: String,
    /// Authenticated principal.
    pub user: UserInfo,
    /// Landing page hint for the client.
    pub dashboard: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.c"));
        assert!(req.password.is_none());

        let empty: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.email.is_none());
    }

    #[test]
    fn test_user_info_serializes_camel_case() {
        let info = UserInfo {
            id: "7".into(),
            first_name: "Ada".into(),
            last_name: "Park".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            role: Role::ParkStaff,
            park: "Akagera".into(),
            avatar_url: String::new(),
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], "Park");
        assert_eq!(value["role"], "park-staff");
        assert_eq!(value["avatarUrl"], "");
    }

    #[test]
    fn test_claims_round_trip_role_as_wire_name() {
        let claims = Claims::new("3", "x@y.z", Role::Finance, Utc::now() + Duration::hours(1));
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["role"], "finance");
        assert_eq!(value["user_id"], "3");
    }
}
