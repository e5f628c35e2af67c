use thiserror::Error;

/// Infrastructure faults. Validation verdicts are [`ResultCode`](crate::ResultCode)s,
/// never errors.
#[derive(Debug, Error)]
pub enum AuthorizerError {
    #[error("store error: {0}")]
    Store(#[from] lattice_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] lattice_ledger::LedgerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("no service block available")]
    NoServiceBlock,
}
