//! Block collection trait.

use crate::StoreError;
use lattice_ledger::Block;
use lattice_types::{AccountId, BlockHash};

/// Queries and writes the authorizer needs from block storage.
///
/// Lookups return `Ok(None)` when nothing matches; `Err` is reserved for
/// backend faults. Implementations must be safe to share across threads.
pub trait AccountCollection: Send + Sync {
    fn find_block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>, StoreError>;

    /// A block of `account_id` with the given hash; blocks of other accounts
    /// never match.
    fn find_block_by_account_hash(
        &self,
        account_id: &AccountId,
        hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError>;

    fn find_block_by_index(
        &self,
        account_id: &AccountId,
        index: u64,
    ) -> Result<Option<Block>, StoreError>;

    /// The block, of any account, that declares `previous_hash` as its parent.
    fn find_block_by_previous_hash(
        &self,
        previous_hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError>;

    /// Head of the account's chain, i.e. its block with the highest `u_index`.
    fn find_latest_block(&self, account_id: &AccountId) -> Result<Option<Block>, StoreError>;

    /// Genesis block of a token. A `hash` narrows the search to that block;
    /// otherwise the ticker decides.
    fn find_token_genesis_block(
        &self,
        hash: Option<&BlockHash>,
        ticker: &str,
    ) -> Result<Option<Block>, StoreError>;

    /// The service block with the highest `u_index`.
    fn find_last_service_block(&self) -> Result<Option<Block>, StoreError>;

    /// The receive-class block that accepted the send `source_hash`.
    /// Fee-collecting blocks are not considered.
    fn find_block_by_source_hash(
        &self,
        source_hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError>;

    /// The `CancelTradeOrder` block that withdrew `trade_order_id`, if any.
    fn find_cancellation(
        &self,
        trade_order_id: &BlockHash,
    ) -> Result<Option<Block>, StoreError>;

    fn find_block_by_u_index(&self, u_index: u64) -> Result<Option<Block>, StoreError>;

    /// Highest `u_index` in use, 0 for an empty ledger.
    fn newest_u_index(&self) -> Result<u64, StoreError>;

    fn block_count(&self) -> Result<u64, StoreError>;

    /// Persist a block. Fails with [`StoreError::Conflict`] if its hash, its
    /// `u_index` or its `(account_id, index)` is taken; never overwrites.
    fn insert_block(&self, block: &Block) -> Result<(), StoreError>;

    /// Whether the account has at least one block.
    fn account_exists(&self, account_id: &AccountId) -> Result<bool, StoreError> {
        self.find_latest_block(account_id).map(|b| b.is_some())
    }
}
