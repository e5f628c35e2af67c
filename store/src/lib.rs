//! Storage contract for the account-chain ledger.
//!
//! The authorizer reads ancestors and siblings through [`AccountCollection`]
//! and writes committed blocks through it. Backends (a document database in
//! production, `NullStore` from `lattice-nullables` in tests) implement the
//! trait; nothing else in the workspace depends on a concrete backend.

pub mod collection;
pub mod error;

pub use collection::AccountCollection;
pub use error::{StoreError, UniqueKey};
