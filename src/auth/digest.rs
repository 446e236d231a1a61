use super::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::OnceLock;

/// Lowercase hex SHA-256 of a password. Request types only accept this form.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PasswordDigest(pub(crate) String);

impl PasswordDigest {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordDigest({})", &self.0[..8.min(self.0.len())])
    }
}

/// Hash `input` with SHA-256 and hex encode the result.
#[must_use]
pub fn digest(input: &str) -> PasswordDigest {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());

    PasswordDigest(hex::encode(hasher.finalize()))
}

fn pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9a-f]{64}$"))
        .as_ref()
        .map_err(|e| Error::Pattern(e.clone()))
}

/// Returns true when `value` looks like the output of [`digest`].
///
/// # Errors
/// Returns an error if the digest pattern fails to compile.
pub fn is_digest(value: &str) -> Result<bool> {
    Ok(pattern()?.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_known_vectors() {
        assert_eq!(
            digest("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            digest("password").as_str(),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_digest_is_deterministic_and_well_formed() -> Result<()> {
        for input in ["", "hunter2", "pässwörd", "a much longer passphrase with spaces"] {
            let first = digest(input);
            let second = digest(input);
            assert_eq!(first, second);
            assert_eq!(first.as_str().len(), 64);
            assert!(is_digest(first.as_str())?, "{input} produced {first}");
        }
        Ok(())
    }

    #[test]
    fn test_is_digest_rejects_other_shapes() -> Result<()> {
        assert!(!is_digest("hunter2")?);
        assert!(!is_digest(
            "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8"
        )?);
        assert!(!is_digest(
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d"
        )?);
        Ok(())
    }

    #[test]
    fn test_debug_does_not_print_full_digest() {
        let value = digest("password");
        assert_eq!(format!("{value:?}"), "PasswordDigest(5e884898)");
    }
}
