//! Account identifier type with `lat_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies an account chain; also encodes the owner's public key.
///
/// Layout: `lat_` + 52 base32 chars (public key) + 8 base32 chars (checksum).
/// This type only checks the shape; `lattice_crypto::validate_account_id`
/// decodes the key and verifies the checksum.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub const PREFIX: &'static str = "lat_";

    /// Number of characters after the prefix.
    pub const ENCODED_LEN: usize = 60;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Prefix and length check only.
    pub fn is_well_formed(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() == Self::PREFIX.len() + Self::ENCODED_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
