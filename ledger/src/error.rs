use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid block: {reason}")]
    InvalidBlock { reason: String },
}

impl From<bincode::Error> for LedgerError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
