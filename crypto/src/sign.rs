//! Ed25519 signing and verification.
//!
//! Two signing domains exist:
//! - the owner signature: the account's key over the block hash;
//! - the authorizer endorsement: the node's key over
//!   `account_id ∥ hash ∥ service_hash`. Binding the account id means an
//!   endorsement cannot be replayed onto another account's block.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use lattice_types::{AccountId, BlockHash, PrivateKey, PublicKey, Signature};

/// Sign a message with a private key.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Uses strict verification, so non-canonical signatures are rejected.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify_strict(message, &dalek_sig).is_ok()
}

/// Verify an owner signature over `hash`, using the key encoded in `account_id`.
pub fn verify_account_signature(
    hash: &BlockHash,
    account_id: &AccountId,
    signature: &Signature,
) -> bool {
    match crate::public_key_of(account_id) {
        Some(public_key) => verify_signature(hash.as_bytes(), signature, &public_key),
        None => false,
    }
}

/// Bytes an authorizer signs to endorse a block.
pub fn authorization_message(
    account_id: &AccountId,
    hash: &BlockHash,
    service_hash: &BlockHash,
) -> Vec<u8> {
    let mut message = Vec::with_capacity(account_id.as_bytes().len() + 64);
    message.extend_from_slice(account_id.as_bytes());
    message.extend_from_slice(hash.as_bytes());
    message.extend_from_slice(service_hash.as_bytes());
    message
}

/// Endorse `hash ∥ service_hash` for the block owned by `account_id`.
pub fn sign_authorization(
    private_key: &PrivateKey,
    account_id: &AccountId,
    hash: &BlockHash,
    service_hash: &BlockHash,
) -> Signature {
    sign_message(&authorization_message(account_id, hash, service_hash), private_key)
}

/// Check an endorsement produced by [`sign_authorization`].
pub fn verify_authorization(
    public_key: &PublicKey,
    account_id: &AccountId,
    hash: &BlockHash,
    service_hash: &BlockHash,
    signature: &Signature,
) -> bool {
    verify_signature(
        &authorization_message(account_id, hash, service_hash),
        signature,
        public_key,
    )
}
