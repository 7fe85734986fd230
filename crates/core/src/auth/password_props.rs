//! Property-based tests for credential verification.

use proptest::prelude::*;
use sha2::{Digest, Sha256};

use super::password::{CredentialFormat, hash_password, hash_with_salt, verify_and_maybe_migrate};

fn password_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,32}"
}

fn unsalted(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The right password always matches the current format.
    #[test]
    fn prop_salted_accepts_own_password(password in password_strategy()) {
        let stored = hash_password(&password);
        let result = verify_and_maybe_migrate(&password, &stored);
        prop_assert!(result.matched);
        prop_assert!(result.migrated.is_none());
    }

    /// Any other password is rejected by both SHA-256 formats.
    #[test]
    fn prop_different_password_rejected(
        password in password_strategy(),
        other in password_strategy(),
        salt in "[0-9a-f]{8,32}",
    ) {
        prop_assume!(password != other);

        prop_assert!(!verify_and_maybe_migrate(&other, &hash_with_salt(&password, &salt)).matched);
        prop_assert!(!verify_and_maybe_migrate(&other, &unsalted(&password)).matched);
    }

    /// An unsalted match migrates to a salted credential that keeps working.
    #[test]
    fn prop_unsalted_migration_round_trips(password in password_strategy()) {
        let result = verify_and_maybe_migrate(&password, &unsalted(&password));
        prop_assert!(result.matched);

        let migrated = result.migrated.unwrap();
        prop_assert_eq!(CredentialFormat::detect(&migrated), CredentialFormat::SaltedSha256);
        prop_assert!(verify_and_maybe_migrate(&password, &migrated).matched);
    }

    /// Arbitrary stored strings never panic and never match their own text.
    #[test]
    fn prop_foreign_credentials_fail_closed(stored in "[^:]{0,64}") {
        let result = verify_and_maybe_migrate(&stored, &stored);
        prop_assert!(!result.matched);
    }
}
