//! Credential hashing, verification, and forward migration.
//!
//! Stored credentials come in three formats:
//! - `salt:hex(sha256(password + salt))`: current, written by every
//!   password change and by migration.
//! - a bcrypt hash (`$2a$`, `$2b$`, `$2x$`, `$2y$`): legacy.
//! - `hex(sha256(password))`: legacy, unsalted.
//!
//! A successful match against a legacy format yields a freshly salted
//! credential that the caller persists once the login has succeeded.

use sha2::{Digest, Sha256};

/// Separates the salt from the digest in the current format.
pub const SALT_SEPARATOR: char = ':';

/// Length of a generated salt in bytes (hex-encoded to twice this).
const SALT_BYTES: usize = 16;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

/// Format of a stored credential, determined by a cheap sniff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFormat {
    /// `salt:hex(sha256(password + salt))`.
    SaltedSha256,
    /// Modular-crypt bcrypt hash.
    LegacyBcrypt,
    /// `hex(sha256(password))`.
    UnsaltedSha256,
}

impl CredentialFormat {
    /// Classifies a stored credential.
    ///
    /// Anything that is neither salted nor bcrypt-prefixed is treated as an
    /// unsalted digest, so a foreign string can only ever be compared
    /// against a digest of the submitted password.
    #[must_use]
    pub fn detect(stored: &str) -> Self {
        if stored.contains(SALT_SEPARATOR) {
            Self::SaltedSha256
        } else if BCRYPT_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            Self::LegacyBcrypt
        } else {
            Self::UnsaltedSha256
        }
    }

    /// Returns true for formats that must be rewritten after a match.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        !matches!(self, Self::SaltedSha256)
    }
}

/// Outcome of checking a password against a stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether the password matched.
    pub matched: bool,
    /// Replacement credential in the current format, present only after a
    /// match against a legacy format.
    pub migrated: Option<String>,
}

impl Verification {
    const fn rejected() -> Self {
        Self {
            matched: false,
            migrated: None,
        }
    }
}

/// Hashes a password into the current salted format with a random salt.
///
/// # Example
///
/// ```
/// use parkpro_core::auth::{CredentialFormat, hash_password};
///
/// let stored = hash_password("Secret123");
/// assert_eq!(CredentialFormat::detect(&stored), CredentialFormat::SaltedSha256);
/// ```
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_BYTES] = rand::random();
    hash_with_salt(password, &to_hex(&salt))
}

/// Hashes a password into the current format with the given salt.
#[must_use]
pub fn hash_with_salt(password: &str, salt: &str) -> String {
    let digest = sha256_hex(&[password.as_bytes(), salt.as_bytes()]);
    format!("{salt}{SALT_SEPARATOR}{digest}")
}

/// Checks a password against a stored credential of any supported format.
///
/// Never fails: malformed or foreign credentials simply do not match.
///
/// # Example
///
/// ```
/// use parkpro_core::auth::{hash_password, verify_and_maybe_migrate};
///
/// let stored = hash_password("Secret123");
/// assert!(verify_and_maybe_migrate("Secret123", &stored).matched);
/// assert!(!verify_and_maybe_migrate("secret123", &stored).matched);
/// ```
#[must_use]
pub fn verify_and_maybe_migrate(password: &str, stored: &str) -> Verification {
    let format = CredentialFormat::detect(stored);

    let matched = match format {
        CredentialFormat::SaltedSha256 => verify_salted(password, stored),
        CredentialFormat::LegacyBcrypt => verify_bcrypt(password, stored),
        CredentialFormat::UnsaltedSha256 => {
            let computed = sha256_hex(&[password.as_bytes()]);
            constant_time_eq(
                computed.as_bytes(),
                stored.to_ascii_lowercase().as_bytes(),
            )
        }
    };

    if !matched {
        return Verification::rejected();
    }

    Verification {
        matched,
        migrated: format.is_legacy().then(|| hash_password(password)),
    }
}

fn verify_salted(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once(SALT_SEPARATOR) else {
        return false;
    };
    let computed = sha256_hex(&[password.as_bytes(), salt.as_bytes()]);
    constant_time_eq(
        computed.as_bytes(),
        expected.to_ascii_lowercase().as_bytes(),
    )
}

fn verify_bcrypt(password: &str, stored: &str) -> bool {
    match bcrypt::verify(password, stored) {
        Ok(matched) => matched,
        Err(e) => {
            tracing::debug!(error = %e, "Stored bcrypt credential is malformed");
            false
        }
    }
}

fn sha256_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    format!("{:x}", hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compares two byte strings without exiting at the first difference.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unsalted(password: &str) -> String {
        sha256_hex(&[password.as_bytes()])
    }

    fn bcrypt_cheap(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    #[rstest]
    #[case::salted(hash_password("Secret123"))]
    #[case::fixed_salt(hash_with_salt("Secret123", "abcdef"))]
    #[case::unsalted(unsalted("Secret123"))]
    #[case::bcrypt(bcrypt_cheap("Secret123"))]
    fn test_correct_password_matches_every_format(#[case] stored: String) {
        assert!(verify_and_maybe_migrate("Secret123", &stored).matched);
    }

    #[rstest]
    #[case::salted(hash_password("Secret123"))]
    #[case::unsalted(unsalted("Secret123"))]
    #[case::bcrypt(bcrypt_cheap("Secret123"))]
    fn test_wrong_password_never_matches(#[case] stored: String) {
        for wrong in ["secret123", "Secret1234", "", "Secret123 "] {
            let result = verify_and_maybe_migrate(wrong, &stored);
            assert!(!result.matched, "{wrong:?} should not match");
            assert!(result.migrated.is_none());
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            CredentialFormat::detect(&hash_password("x")),
            CredentialFormat::SaltedSha256
        );
        assert_eq!(
            CredentialFormat::detect(&bcrypt_cheap("x")),
            CredentialFormat::LegacyBcrypt
        );
        assert_eq!(
            CredentialFormat::detect(&unsalted("x")),
            CredentialFormat::UnsaltedSha256
        );
        assert_eq!(
            CredentialFormat::detect("$argon2id$v=19$m=65536"),
            CredentialFormat::UnsaltedSha256
        );
    }

    #[test]
    fn test_salted_match_needs_no_migration() {
        let stored = hash_password("Secret123");
        let result = verify_and_maybe_migrate("Secret123", &stored);

        assert!(result.matched);
        assert!(result.migrated.is_none());
    }

    #[rstest]
    #[case::unsalted(unsalted("Secret123"))]
    #[case::bcrypt(bcrypt_cheap("Secret123"))]
    fn test_legacy_match_migrates_to_salted(#[case] stored: String) {
        let result = verify_and_maybe_migrate("Secret123", &stored);
        assert!(result.matched);

        let migrated = result.migrated.expect("legacy match must migrate");
        assert_eq!(
            CredentialFormat::detect(&migrated),
            CredentialFormat::SaltedSha256
        );

        let again = verify_and_maybe_migrate("Secret123", &migrated);
        assert!(again.matched);
        assert!(again.migrated.is_none());
    }

    #[rstest]
    #[case("$2b$12$notreallyabcrypthash")]
    #[case("$2y$")]
    #[case("$2a$04$")]
    fn test_malformed_bcrypt_fails_closed(#[case] stored: &str) {
        assert!(!verify_and_maybe_migrate("Secret123", stored).matched);
        assert!(!verify_and_maybe_migrate("", stored).matched);
    }

    #[test]
    fn test_foreign_string_is_not_compared_to_plaintext() {
        // A plaintext password stored by mistake must not authenticate.
        assert!(!verify_and_maybe_migrate("Secret123", "Secret123").matched);
        assert!(!verify_and_maybe_migrate("", "").matched);
    }

    #[test]
    fn test_uppercase_digests_are_accepted() {
        let stored = unsalted("Secret123").to_ascii_uppercase();
        assert!(verify_and_maybe_migrate("Secret123", &stored).matched);

        let salted = hash_with_salt("Secret123", "s4lt");
        let (salt, digest) = salted.split_once(':').unwrap();
        let shouting = format!("{salt}:{}", digest.to_ascii_uppercase());
        assert!(verify_and_maybe_migrate("Secret123", &shouting).matched);
    }

    #[test]
    fn test_salt_is_part_of_the_digest() {
        let stored = hash_with_salt("Secret123", "one");
        let (_, digest) = stored.split_once(':').unwrap();
        let swapped = format!("two:{digest}");

        assert!(!verify_and_maybe_migrate("Secret123", &swapped).matched);
    }

    #[test]
    fn test_hash_password_uses_fresh_salts() {
        let first = hash_password("Secret123");
        let second = hash_password("Secret123");

        assert_ne!(first, second);
        let (salt, digest) = first.split_once(':').unwrap();
        assert_eq!(salt.len(), SALT_BYTES * 2);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_unsalted_digest_shape() {
        let digest = unsalted("Secret123");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}
