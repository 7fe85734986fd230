//! Principal model and login entry points.

use chrono::{DateTime, Utc};
use parkpro_shared::Role;
use parkpro_shared::auth::UserInfo;

/// Identity of a principal: its role (and so its table) plus the row id.
///
/// Ids repeat across tables, so an id is never meaningful without the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrincipalKey {
    /// Role, selecting the table.
    pub role: Role,
    /// Row id within the role's table.
    pub id: i32,
}

impl PrincipalKey {
    /// Creates a new key.
    #[must_use]
    pub const fn new(role: Role, id: i32) -> Self {
        Self { role, id }
    }
}

/// Profile fields shared by every principal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalProfile {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email, unique across all principal tables.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Park affiliation.
    pub park_name: Option<String>,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
}

/// A principal row as read for authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalRecord {
    /// Identity.
    pub key: PrincipalKey,
    /// Profile fields.
    pub profile: PrincipalProfile,
    /// Stored password credential in any supported format.
    pub credential: String,
}

impl PrincipalRecord {
    /// Returns the role of the principal.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.key.role
    }

    /// Builds the profile payload returned to the client.
    #[must_use]
    pub fn user_info(&self) -> UserInfo {
        let profile = &self.profile;
        UserInfo {
            id: self.key.id.to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            role: self.key.role,
            park: profile.park_name.clone().unwrap_or_default(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
        }
    }
}

/// Tables probed by the generic staff login, in priority order.
pub const STAFF_PROBE_ORDER: [Role; 5] = [
    Role::Admin,
    Role::ParkStaff,
    Role::Finance,
    Role::Auditor,
    Role::Government,
];

/// Login endpoint a request arrived through.
///
/// Visitors are not staff and only authenticate through their own entry
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginEntry {
    /// `POST /api/login`: every staff table.
    Staff,
    /// `POST /api/admin/login`: administrators only.
    Admin,
    /// `POST /api/visitor/login`: visitors only.
    Visitor,
}

impl LoginEntry {
    /// Returns the roles probed by this entry point, first match wins.
    #[must_use]
    pub const fn probe_order(&self) -> &'static [Role] {
        match self {
            Self::Staff => &STAFF_PROBE_ORDER,
            Self::Admin => &[Role::Admin],
            Self::Visitor => &[Role::Visitor],
        }
    }
}
