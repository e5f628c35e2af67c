//! The account-chain block.

use crate::error::LedgerError;
use crate::kind::{BlockKind, BlockType, ServiceParams, TokenGenesis};
use crate::non_fungible::NonFungibleToken;
use lattice_crypto::{hash_block, sign_message};
use lattice_types::{AccountId, BlockHash, NetworkId, PrivateKey, Signature, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token code -> balance in raw units. Ordered so the hash does not depend
/// on insertion order.
pub type Balances = BTreeMap<String, u128>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeType {
    NoFee,
    Regular,
}

/// One authorizer's endorsement of a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationSignature {
    /// Account id of the signing authorizer.
    pub key: AccountId,
    pub signature: Signature,
}

/// One state transition on one account's chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub account_id: AccountId,
    /// 1-based position in the account's own chain.
    pub index: u64,
    /// Ledger-wide sequence number, assigned at commit. 0 = unassigned.
    pub u_index: u64,
    /// `BlockHash::ZERO` for the first block of a chain.
    pub previous_hash: BlockHash,
    pub hash: BlockHash,
    /// Hash of the service block current at authorization time. Excluded
    /// from `hash`, included in the endorsement.
    pub service_hash: BlockHash,
    /// Owner's signature over `hash`.
    pub signature: Signature,
    pub network_id: NetworkId,
    pub timestamp: Timestamp,
    /// Full balance sheet after this block.
    pub balances: Balances,
    pub fee: u128,
    pub fee_code: String,
    pub fee_type: FeeType,
    pub non_fungible_token: Option<NonFungibleToken>,
    pub authorizations: Vec<AuthorizationSignature>,
    pub kind: BlockKind,
}

/// The fields covered by `hash`, in canonical order.
#[derive(Serialize)]
struct HashedFields<'a> {
    account_id: &'a AccountId,
    index: u64,
    previous_hash: &'a BlockHash,
    network_id: NetworkId,
    timestamp: Timestamp,
    balances: &'a Balances,
    fee: u128,
    fee_code: &'a str,
    fee_type: FeeType,
    non_fungible_token: &'a Option<NonFungibleToken>,
    kind: &'a BlockKind,
}

impl Block {
    /// An unsigned, unhashed block with no balances and no fee.
    pub fn new(
        account_id: AccountId,
        network_id: NetworkId,
        timestamp: Timestamp,
        kind: BlockKind,
    ) -> Self {
        Self {
            account_id,
            index: 0,
            u_index: 0,
            previous_hash: BlockHash::ZERO,
            hash: BlockHash::ZERO,
            service_hash: BlockHash::ZERO,
            signature: Signature::EMPTY,
            network_id,
            timestamp,
            balances: Balances::new(),
            fee: 0,
            fee_code: lattice_types::NATIVE_TICKER.to_string(),
            fee_type: FeeType::NoFee,
            non_fungible_token: None,
            authorizations: Vec::new(),
            kind,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    pub fn is_opening(&self) -> bool {
        self.kind.is_opening()
    }

    /// Balance of `token_code`; a missing key reads as zero.
    pub fn balance(&self, token_code: &str) -> u128 {
        self.balances.get(token_code).copied().unwrap_or(0)
    }

    /// Fee schedule, for service blocks.
    pub fn service_params(&self) -> Option<&ServiceParams> {
        match &self.kind {
            BlockKind::Service(params) => Some(params),
            _ => None,
        }
    }

    /// Registration data, for token and native genesis blocks.
    pub fn token_genesis(&self) -> Option<&TokenGenesis> {
        match &self.kind {
            BlockKind::TokenGenesis(token) | BlockKind::NativeTokenGenesis(token) => Some(token),
            _ => None,
        }
    }

    /// Blake2b-256 over the canonical encoding of the hashed fields.
    ///
    /// `u_index`, `service_hash`, the owner signature and the endorsements
    /// are all set after the owner hashes the block, so none are covered.
    pub fn compute_hash(&self) -> Result<BlockHash, LedgerError> {
        let fields = HashedFields {
            account_id: &self.account_id,
            index: self.index,
            previous_hash: &self.previous_hash,
            network_id: self.network_id,
            timestamp: self.timestamp,
            balances: &self.balances,
            fee: self.fee,
            fee_code: &self.fee_code,
            fee_type: self.fee_type,
            non_fungible_token: &self.non_fungible_token,
            kind: &self.kind,
        };
        Ok(hash_block(&bincode::serialize(&fields)?))
    }

    /// Link this block after `previous` (or make it the first of its chain).
    pub fn chain_after(&mut self, previous: Option<&Block>) {
        match previous {
            Some(prev) => {
                self.index = prev.index + 1;
                self.previous_hash = prev.hash;
            }
            None => {
                self.index = 1;
                self.previous_hash = BlockHash::ZERO;
            }
        }
    }

    /// Hash the block and sign the hash with the owner's key.
    pub fn seal(&mut self, owner: &PrivateKey) -> Result<(), LedgerError> {
        self.hash = self.compute_hash()?;
        self.signature = sign_message(self.hash.as_bytes(), owner);
        Ok(())
    }
}
