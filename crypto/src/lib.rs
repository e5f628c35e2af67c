//! Cryptographic primitives for the account-chain ledger.
//!
//! - **Ed25519** for block owner signatures and authorizer endorsements
//! - **Blake2b-256** for block hashes and signing digests
//! - Account id derivation with the `lat_` prefix and base32 encoding

pub mod account;
pub mod hash;
pub mod keys;
pub mod sign;

pub use account::{decode_account_id, derive_account_id, public_key_of, validate_account_id};
pub use hash::{blake2b_256, blake2b_256_multi, hash_block};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{
    authorization_message, sign_authorization, sign_message, verify_account_signature,
    verify_authorization, verify_signature,
};
