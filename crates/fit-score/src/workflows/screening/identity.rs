use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the SHA-256 digest.
pub const PID_LENGTH: usize = 16;

/// Secret prefix mixed into every pseudonymous ID.
///
/// Scoring and join runs must use byte-identical salts for their IDs to correlate.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdentityError::EmptySalt);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

/// Pseudonymous applicant identifier derived from a salted email hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(String);

impl Pid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("secret salt must not be empty")]
    EmptySalt,
}

/// Trim and lowercase an email. Missing input normalizes to the empty string.
pub fn normalize_email(raw: Option<&str>) -> String {
    raw.map(|value| value.trim().to_lowercase())
        .unwrap_or_default()
}

/// Derives pseudonymous IDs from normalized emails under one salt.
#[derive(Debug, Clone)]
pub struct IdentityHasher {
    salt: Salt,
}

impl IdentityHasher {
    pub fn new(salt: Salt) -> Self {
        Self { salt }
    }

    /// Hash `salt || normalized_email` and keep the first 16 hex characters.
    pub fn hash_id(&self, normalized_email: &str) -> Pid {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.expose().as_bytes());
        hasher.update(normalized_email.as_bytes());
        let bytes = hasher.finalize();
        let mut hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        hex.truncate(PID_LENGTH);
        Pid(hex)
    }

    /// Normalize then hash a raw email cell.
    pub fn pid_for(&self, raw_email: Option<&str>) -> Pid {
        self.hash_id(&normalize_email(raw_email))
    }
}
