//! The node's identity and its view of the network's fee schedule.

use std::sync::{Arc, PoisonError, RwLock};

use lattice_crypto::{derive_account_id, sign_authorization};
use lattice_ledger::{Block, ServiceParams};
use lattice_store::AccountCollection;
use lattice_types::{AccountId, BlockHash, KeyPair, PublicKey, Signature};

use crate::AuthorizerError;

/// Process-wide authorizer identity.
///
/// The keypair is fixed for the lifetime of the process. The current
/// service block is an immutable snapshot swapped wholesale when a newer
/// one is committed, so readers never see a half-updated fee schedule.
pub struct ServiceAccount {
    account_id: AccountId,
    keypair: KeyPair,
    latest: RwLock<Arc<Block>>,
}

impl ServiceAccount {
    /// Fails with [`AuthorizerError::NoServiceBlock`] unless
    /// `initial_service_block` is a service block.
    pub fn new(keypair: KeyPair, initial_service_block: Block) -> Result<Self, AuthorizerError> {
        if initial_service_block.service_params().is_none() {
            return Err(AuthorizerError::NoServiceBlock);
        }
        Ok(Self {
            account_id: derive_account_id(&keypair.public),
            keypair,
            latest: RwLock::new(Arc::new(initial_service_block)),
        })
    }

    /// Start from the newest service block in `store`.
    pub fn load(keypair: KeyPair, store: &dyn AccountCollection) -> Result<Self, AuthorizerError> {
        let block = store
            .find_last_service_block()?
            .ok_or(AuthorizerError::NoServiceBlock)?;
        Self::new(keypair, block)
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn public_key(&self) -> PublicKey {
        self.keypair.public
    }

    pub fn latest_service_block(&self) -> Arc<Block> {
        // A poisoned lock still guards a whole, valid snapshot.
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fee schedule of the current snapshot.
    pub fn service_params(&self) -> Result<ServiceParams, AuthorizerError> {
        self.latest_service_block()
            .service_params()
            .cloned()
            .ok_or(AuthorizerError::NoServiceBlock)
    }

    /// Install `block` as the current snapshot. Non-service blocks and
    /// blocks not newer than the current snapshot are ignored; returns
    /// whether the snapshot changed.
    pub fn replace_service_block(&self, block: Block) -> bool {
        if block.service_params().is_none() {
            return false;
        }
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        if block.index <= latest.index {
            return false;
        }
        *latest = Arc::new(block);
        true
    }

    /// Endorse `hash ∥ service_hash` for a block of `account_id`.
    pub(crate) fn sign(
        &self,
        account_id: &AccountId,
        hash: &BlockHash,
        service_hash: &BlockHash,
    ) -> Signature {
        sign_authorization(&self.keypair.private, account_id, hash, service_hash)
    }
}
