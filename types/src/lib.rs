//! Fundamental types for the account-chain ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! block hashes, account ids, keys and signatures, network ids, timestamps and token codes.

pub mod account;
pub mod block;
pub mod keys;
pub mod network;
pub mod time;
pub mod token;

pub use account::AccountId;
pub use block::BlockHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use time::{Clock, SystemClock, Timestamp};
pub use token::{is_valid_ticker, NATIVE_TICKER};
