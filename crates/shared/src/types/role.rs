//! Principal roles and their backing tables.
//!
//! Every principal lives in exactly one table, selected by its role. The
//! mapping below is the only place a principal table name is produced, so
//! no query ever interpolates a table name taken from request input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of principal roles.
///
/// A role is immutable for the lifetime of a principal row: changing it
/// means moving the row to another table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Staff member attached to a park.
    ParkStaff,
    /// Finance officer.
    Finance,
    /// Read-only auditor.
    Auditor,
    /// Government officer reviewing escalated requests.
    Government,
    /// Public visitor account.
    Visitor,
}

impl Role {
    /// All roles, in the order their tables are created.
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::ParkStaff,
        Self::Finance,
        Self::Auditor,
        Self::Government,
        Self::Visitor,
    ];

    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ParkStaff => "park-staff",
            Self::Finance => "finance",
            Self::Auditor => "auditor",
            Self::Government => "government",
            Self::Visitor => "visitor",
        }
    }

    /// Parses a role from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    /// Returns the table holding principals of this role.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::Admin => "admintable",
            Self::ParkStaff => "parkstaff",
            Self::Finance => "finance_officers",
            Self::Auditor => "auditors",
            Self::Government => "government_officers",
            Self::Visitor => "visitors",
        }
    }

    /// Returns the landing page the client should open after login.
    #[must_use]
    pub const fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::ParkStaff => "/parkstaff/dashboard",
            Self::Finance => "/finance/dashboard",
            Self::Auditor => "/auditor/dashboard",
            Self::Government => "/government/dashboard",
            Self::Visitor => "/visitor/dashboard",
        }
    }

    /// Returns true for every role except visitors.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        !matches!(self, Self::Visitor)
    }

    /// Returns true if this role can provision and edit park staff.
    #[must_use]
    pub const fn can_manage_staff(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role decides park-staff fund requests and
    /// service applications.
    #[must_use]
    pub const fn can_review_fund_requests(&self) -> bool {
        matches!(self, Self::Finance)
    }

    /// Returns true if this role can read tours, donations, services and
    /// fund requests.
    #[must_use]
    pub const fn can_view_finance_records(&self) -> bool {
        matches!(self, Self::Finance | Self::Auditor | Self::Admin)
    }

    /// Returns true if this role raises emergency, extra-funds and budget
    /// requests to government.
    #[must_use]
    pub const fn can_escalate(&self) -> bool {
        matches!(self, Self::Finance)
    }

    /// Returns true if this role decides escalated requests.
    #[must_use]
    pub const fn can_review_escalations(&self) -> bool {
        matches!(self, Self::Government)
    }

    /// Returns true if this role can read escalated requests.
    #[must_use]
    pub const fn can_view_escalations(&self) -> bool {
        matches!(self, Self::Government | Self::Auditor | Self::Finance)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Admin, "admin", "admintable", "/admin/dashboard")]
    #[case(Role::ParkStaff, "park-staff", "parkstaff", "/parkstaff/dashboard")]
    #[case(Role::Finance, "finance", "finance_officers", "/finance/dashboard")]
    #[case(Role::Auditor, "auditor", "auditors", "/auditor/dashboard")]
    #[case(
        Role::Government,
        "government",
        "government_officers",
        "/government/dashboard"
    )]
    #[case(Role::Visitor, "visitor", "visitors", "/visitor/dashboard")]
    fn test_role_mapping(
        #[case] role: Role,
        #[case] wire: &str,
        #[case] table: &str,
        #[case] dashboard: &str,
    ) {
        assert_eq!(role.as_str(), wire);
        assert_eq!(role.table_name(), table);
        assert_eq!(role.dashboard_path(), dashboard);
        assert_eq!(Role::parse(wire), Some(role));
    }

    #[test]
    fn test_parse_unknown_role() {
        assert_eq!(Role::parse("owner"), None);
        assert_eq!(Role::parse("ParkStaff"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::ParkStaff).unwrap();
        assert_eq!(json, "\"park-staff\"");

        let role: Role = serde_json::from_str("\"government\"").unwrap();
        assert_eq!(role, Role::Government);
    }

    #[test]
    fn test_table_names_are_distinct() {
        let mut tables: Vec<_> = Role::ALL.iter().map(Role::table_name).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), Role::ALL.len());
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Admin.can_manage_staff());
        assert!(!Role::Finance.can_manage_staff());

        assert!(Role::Finance.can_review_fund_requests());
        assert!(!Role::Auditor.can_review_fund_requests());

        assert!(Role::Auditor.can_view_finance_records());
        assert!(!Role::Visitor.can_view_finance_records());

        assert!(Role::Government.can_review_escalations());
        assert!(!Role::Finance.can_review_escalations());
        assert!(Role::Finance.can_view_escalations());

        assert!(!Role::Visitor.is_staff());
        assert!(Role::Auditor.is_staff());
    }
}
