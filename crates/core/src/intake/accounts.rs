//! Account provisioning and self-service forms.
//!
//! Every password accepted here leaves as a salted credential; plaintext
//! never reaches the persistence layer.

use serde::Deserialize;

use super::error::IntakeError;
use super::fields::{RequiredFields, optional};
use crate::auth::hash_password;

/// A principal row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrincipal {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Stored password credential.
    pub credential: String,
}

/// Profile fields to overwrite on an existing principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// `None` leaves the park affiliation untouched.
    pub park_name: Option<String>,
}

/// Visitor self-registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitorRegistration {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

impl VisitorRegistration {
    /// Validates the form and hashes the password.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields`.
    pub fn validate(self) -> Result<NewPrincipal, IntakeError> {
        let mut fields = RequiredFields::new();
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        let password = fields.secret("password", self.password);
        fields.finish()?;

        Ok(NewPrincipal {
            first_name,
            last_name,
            email,
            phone: optional(self.phone),
            park_name: None,
            credential: hash_password(&password),
        })
    }
}

/// Park-staff form used by administrators, for both create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffInput {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Park the staff member works at.
    pub park: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

impl StaffInput {
    /// Validates a new staff member, password included.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields`.
    pub fn validate_new(self) -> Result<NewPrincipal, IntakeError> {
        let mut fields = RequiredFields::new();
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        let park = fields.text("park", self.park);
        let password = fields.secret("password", self.password);
        fields.finish()?;

        Ok(NewPrincipal {
            first_name,
            last_name,
            email,
            phone: optional(self.phone),
            park_name: Some(park),
            credential: hash_password(&password),
        })
    }

    /// Validates an edit; any password in the form is ignored.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields`.
    pub fn validate_update(self) -> Result<ProfileChanges, IntakeError> {
        let mut fields = RequiredFields::new();
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        let park = fields.text("park", self.park);
        fields.finish()?;

        Ok(ProfileChanges {
            first_name,
            last_name,
            email,
            phone: optional(self.phone),
            park_name: Some(park),
        })
    }
}

/// Administrator profile form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileInput {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
}

impl ProfileInput {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields`.
    pub fn validate(self) -> Result<ProfileChanges, IntakeError> {
        let mut fields = RequiredFields::new();
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        let phone = fields.text("phone", self.phone);
        fields.finish()?;

        Ok(ProfileChanges {
            first_name,
            last_name,
            email,
            phone: Some(phone),
            park_name: None,
        })
    }
}

/// Password reset by an administrator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordReset {
    /// Plaintext password.
    pub password: Option<String>,
}

impl PasswordReset {
    /// Returns the new salted credential.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields`.
    pub fn into_credential(self) -> Result<String, IntakeError> {
        let mut fields = RequiredFields::new();
        let password = fields.secret("password", self.password);
        fields.finish()?;
        Ok(hash_password(&password))
    }
}

/// Self-service password change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordChange {
    /// Password the caller claims to hold now.
    pub current_password: Option<String>,
    /// Requested new password.
    pub new_password: Option<String>,
    /// Repeat of the new password.
    pub confirm_password: Option<String>,
}

/// A checked password change; the current password still has to be
/// verified against the stored credential.
#[derive(Debug, Clone)]
pub struct CheckedPasswordChange {
    /// Password the caller claims to hold now.
    pub current_password: String,
    /// Credential replacing the current one.
    pub new_credential: String,
}

impl PasswordChange {
    /// Checks presence and that the new password was typed twice.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or `IntakeError::PasswordMismatch`.
    pub fn validate(self) -> Result<CheckedPasswordChange, IntakeError> {
        let mut fields = RequiredFields::new();
        let current_password = fields.secret("currentPassword", self.current_password);
        let new_password = fields.secret("newPassword", self.new_password);
        let confirm_password = fields.secret("confirmPassword", self.confirm_password);
        fields.finish()?;

        if new_password != confirm_password {
            return Err(IntakeError::PasswordMismatch);
        }

        Ok(CheckedPasswordChange {
            current_password,
            new_credential: hash_password(&new_password),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialFormat, verify_and_maybe_migrate};

    #[test]
    fn test_registration_hashes_password() {
        let principal = VisitorRegistration {
            first_name: Some("Jean".into()),
            last_name: Some("Bosco".into()),
            email: Some("jean@example.com".into()),
            phone: Some("".into()),
            password: Some("Secret123".into()),
        }
        .validate()
        .unwrap();

        assert_eq!(
            CredentialFormat::detect(&principal.credential),
            CredentialFormat::SaltedSha256
        );
        assert!(verify_and_maybe_migrate("Secret123", &principal.credential).matched);
        assert!(principal.phone.is_none());
        assert!(principal.park_name.is_none());
    }

    #[test]
    fn test_new_staff_requires_password_and_park() {
        let err = StaffInput {
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("ab@example.com".into()),
            ..StaffInput::default()
        }
        .validate_new()
        .unwrap_err();

        assert_eq!(
            err,
            IntakeError::MissingFields(vec!["park".into(), "password".into()])
        );
    }

    #[test]
    fn test_staff_update_ignores_password() {
        let changes = StaffInput {
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("ab@example.com".into()),
            park: Some("Akagera".into()),
            password: Some("ignored".into()),
            ..StaffInput::default()
        }
        .validate_update()
        .unwrap();

        assert_eq!(changes.park_name.as_deref(), Some("Akagera"));
    }

    #[test]
    fn test_admin_profile_requires_phone() {
        let err = ProfileInput {
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("a@example.com".into()),
            phone: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, IntakeError::MissingFields(vec!["phone".into()]));
    }

    #[test]
    fn test_password_change_requires_matching_confirmation() {
        let err = PasswordChange {
            current_password: Some("old".into()),
            new_password: Some("new-one".into()),
            confirm_password: Some("new-two".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "New passwords don't match");

        let checked = PasswordChange {
            current_password: Some("old".into()),
            new_password: Some("new-one".into()),
            confirm_password: Some("new-one".into()),
        }
        .validate()
        .unwrap();
        assert!(verify_and_maybe_migrate("new-one", &checked.new_credential).matched);
    }

    #[test]
    fn test_password_reset_requires_password() {
        assert!(PasswordReset::default().into_credential().is_err());
        let credential = PasswordReset {
            password: Some("Secret123".into()),
        }
        .into_credential()
        .unwrap();
        assert!(verify_and_maybe_migrate("Secret123", &credential).matched);
    }
}
