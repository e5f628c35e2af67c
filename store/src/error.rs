use std::fmt;
use thiserror::Error;

/// The uniqueness constraint an insert violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniqueKey {
    Hash,
    UIndex,
    /// `(account_id, index)`.
    AccountIndex,
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hash => "hash",
            Self::UIndex => "u_index",
            Self::AccountIndex => "(account_id, index)",
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A write collided with an existing block. Never retried.
    #[error("unique constraint violated on {0}")]
    Conflict(UniqueKey),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
