//! Nullable store: thread-safe in-memory block collection for testing.
//!
//! All state sits behind one mutex, so the uniqueness checks in
//! [`AccountCollection::insert_block`] and the insert itself are atomic,
//! the same guarantee a unique index gives a real database.

use lattice_ledger::{Block, BlockKind, BlockType};
use lattice_store::{AccountCollection, StoreError, UniqueKey};
use lattice_types::{AccountId, BlockHash};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Blocks {
    by_hash: HashMap<BlockHash, Block>,
    by_u_index: BTreeMap<u64, BlockHash>,
    by_account_index: HashMap<(AccountId, u64), BlockHash>,
}

impl Blocks {
    fn find(&self, pred: impl Fn(&Block) -> bool) -> Option<Block> {
        self.by_hash.values().find(|b| pred(b)).cloned()
    }

    /// Matching block with the highest `u_index`.
    fn newest(&self, pred: impl Fn(&Block) -> bool) -> Option<Block> {
        self.by_hash
            .values()
            .filter(|b| pred(b))
            .max_by_key(|b| b.u_index)
            .cloned()
    }
}

/// An in-memory block collection enforcing the hash, `u_index` and
/// `(account_id, index)` uniqueness constraints.
pub struct NullStore {
    blocks: Mutex<Blocks>,
    insert_attempts: AtomicUsize,
    fail_reads: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            blocks: Mutex::new(Blocks::default()),
            insert_attempts: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Number of `insert_block` calls, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    /// Make every subsequent read fail with a backend error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Blocks>, StoreError> {
        self.blocks
            .lock()
            .map_err(|_| StoreError::Backend("null store lock poisoned".into()))
    }

    fn read(&self) -> Result<MutexGuard<'_, Blocks>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store read failure".into()));
        }
        self.lock()
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountCollection for NullStore {
    fn find_block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>, StoreError> {
        Ok(self.read()?.by_hash.get(hash).cloned())
    }

    fn find_block_by_account_hash(
        &self,
        account_id: &AccountId,
        hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError> {
        Ok(self
            .read()?
            .by_hash
            .get(hash)
            .filter(|b| &b.account_id == account_id)
            .cloned())
    }

    fn find_block_by_index(
        &self,
        account_id: &AccountId,
        index: u64,
    ) -> Result<Option<Block>, StoreError> {
        let blocks = self.read()?;
        Ok(blocks
            .by_account_index
            .get(&(account_id.clone(), index))
            .and_then(|hash| blocks.by_hash.get(hash))
            .cloned())
    }

    fn find_block_by_previous_hash(
        &self,
        previous_hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError> {
        Ok(self.read()?.find(|b| &b.previous_hash == previous_hash))
    }

    fn find_latest_block(&self, account_id: &AccountId) -> Result<Option<Block>, StoreError> {
        Ok(self.read()?.newest(|b| &b.account_id == account_id))
    }

    fn find_token_genesis_block(
        &self,
        hash: Option<&BlockHash>,
        ticker: &str,
    ) -> Result<Option<Block>, StoreError> {
        let blocks = self.read()?;
        let is_genesis_of = |b: &Block| b.token_genesis().is_some_and(|t| t.ticker == ticker);
        Ok(match hash {
            Some(hash) => blocks.by_hash.get(hash).filter(|b| is_genesis_of(b)).cloned(),
            None => blocks.find(is_genesis_of),
        })
    }

    fn find_last_service_block(&self) -> Result<Option<Block>, StoreError> {
        Ok(self
            .read()?
            .newest(|b| b.block_type() == BlockType::Service))
    }

    fn find_block_by_source_hash(
        &self,
        source_hash: &BlockHash,
    ) -> Result<Option<Block>, StoreError> {
        Ok(self.read()?.find(|b| {
            !matches!(
                b.kind,
                BlockKind::ReceiveFee { .. } | BlockKind::OpenWithReceiveFee { .. }
            ) && b.kind.source_hash() == Some(source_hash)
        }))
    }

    fn find_cancellation(
        &self,
        trade_order_id: &BlockHash,
    ) -> Result<Option<Block>, StoreError> {
        Ok(self.read()?.find(|b| match &b.kind {
            BlockKind::CancelTradeOrder(cancel) => &cancel.trade_order_id == trade_order_id,
            _ => false,
        }))
    }

    fn find_block_by_u_index(&self, u_index: u64) -> Result<Option<Block>, StoreError> {
        let blocks = self.read()?;
        Ok(blocks
            .by_u_index
            .get(&u_index)
            .and_then(|hash| blocks.by_hash.get(hash))
            .cloned())
    }

    fn newest_u_index(&self) -> Result<u64, StoreError> {
        Ok(self
            .read()?
            .by_u_index
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0))
    }

    fn block_count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.by_hash.len() as u64)
    }

    fn insert_block(&self, block: &Block) -> Result<(), StoreError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        let mut blocks = self.lock()?;
        let position = (block.account_id.clone(), block.index);

        if blocks.by_hash.contains_key(&block.hash) {
            return Err(StoreError::Conflict(UniqueKey::Hash));
        }
        if blocks.by_u_index.contains_key(&block.u_index) {
            return Err(StoreError::Conflict(UniqueKey::UIndex));
        }
        if blocks.by_account_index.contains_key(&position) {
            return Err(StoreError::Conflict(UniqueKey::AccountIndex));
        }

        blocks.by_u_index.insert(block.u_index, block.hash);
        blocks.by_account_index.insert(position, block.hash);
        blocks.by_hash.insert(block.hash, block.clone());
        Ok(())
    }
}
