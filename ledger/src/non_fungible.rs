//! Non-fungible token payloads.
//!
//! A transfer of an NFT carries the serialized item it moves. The item is
//! signed by the key declared in the token's genesis block, so only the
//! issuer can mint serials.

use lattice_crypto::{blake2b_256_multi, sign_message, verify_signature};
use lattice_types::{PrivateKey, PublicKey, Signature};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFungibleToken {
    pub token_code: String,
    /// Face value; must equal the amount moved by the carrying block.
    pub denomination: u128,
    pub serial_number: String,
    /// Issuer signature over [`NonFungibleToken::signing_digest`].
    pub signature: Signature,
}

impl NonFungibleToken {
    /// Mint a serial signed by the token issuer.
    pub fn issue(
        issuer: &PrivateKey,
        token_code: impl Into<String>,
        denomination: u128,
        serial_number: impl Into<String>,
    ) -> Self {
        let mut token = Self {
            token_code: token_code.into(),
            denomination,
            serial_number: serial_number.into(),
            signature: Signature::EMPTY,
        };
        token.signature = sign_message(&token.signing_digest(), issuer);
        token
    }

    /// Digest of `token_code ∥ 0x00 ∥ denomination (LE) ∥ serial_number`.
    pub fn signing_digest(&self) -> [u8; 32] {
        blake2b_256_multi(&[
            self.token_code.as_bytes(),
            &[0u8],
            &self.denomination.to_le_bytes(),
            self.serial_number.as_bytes(),
        ])
    }

    pub fn verify_signature(&self, issuer_key: &PublicKey) -> bool {
        verify_signature(&self.signing_digest(), &self.signature, issuer_key)
    }
}
