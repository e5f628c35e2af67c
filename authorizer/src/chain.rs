//! Chain validation: a block against its predecessor, then against the
//! whole account chain behind it.

use lattice_crypto::{validate_account_id, verify_account_signature};
use lattice_ledger::{Block, BlockKind, ServiceParams};
use lattice_store::AccountCollection;
use lattice_types::{Clock, NetworkId, NATIVE_TICKER};

use crate::result::ensure;
use crate::{AuthorizerError, ResultCode};

/// Everything a validation step may consult besides the block itself.
pub struct ValidationContext<'a> {
    pub store: &'a dyn AccountCollection,
    pub params: &'a ServiceParams,
    pub clock: &'a dyn Clock,
    pub network: NetworkId,
}

/// The predecessor `block` declares, if it exists on the same account.
pub(crate) fn find_previous(
    store: &dyn AccountCollection,
    block: &Block,
) -> Result<Option<Block>, AuthorizerError> {
    if block.previous_hash.is_zero() {
        return Ok(None);
    }
    Ok(store.find_block_by_account_hash(&block.account_id, &block.previous_hash)?)
}

/// Position, integrity and double-spend checks, first failure wins.
pub(crate) fn verify_block(
    ctx: &ValidationContext<'_>,
    block: &Block,
    previous: Option<&Block>,
) -> Result<ResultCode, AuthorizerError> {
    ensure!(block.network_id == ctx.network, ResultCode::InvalidNetworkId);
    ensure!(block.is_block_valid(previous), ResultCode::BlockValidationFailed);
    ensure!(
        verify_account_signature(&block.hash, &block.account_id, &block.signature),
        ResultCode::BlockSignatureValidationFailed
    );

    // Both guards are read-then-decide; the storage uniqueness constraint
    // settles races at commit.
    ensure!(
        ctx.store
            .find_block_by_index(&block.account_id, block.index)?
            .is_none(),
        ResultCode::BlockWithThisIndexAlreadyExists
    );
    ensure!(
        block.previous_hash.is_zero()
            || ctx
                .store
                .find_block_by_previous_hash(&block.previous_hash)?
                .is_none(),
        ResultCode::BlockWithThisPreviousHashAlreadyExists
    );

    ensure!(block.index > 0, ResultCode::InvalidIndexSequence);
    ensure!(
        block.index == 1 || previous.is_some(),
        ResultCode::CouldNotFindLatestBlock
    );
    ensure!(
        block.index != 1 || previous.is_none(),
        ResultCode::InvalidIndexSequence
    );
    if let Some(prev) = previous {
        ensure!(
            prev.index.checked_add(1) == Some(block.index),
            ResultCode::InvalidIndexSequence
        );
    }

    ensure!(!is_token_expired(ctx, block, previous)?, ResultCode::TokenExpired);
    Ok(ResultCode::Success)
}

/// A positive transfer of a foreign token whose registration has lapsed.
fn is_token_expired(
    ctx: &ValidationContext<'_>,
    block: &Block,
    previous: Option<&Block>,
) -> Result<bool, AuthorizerError> {
    let Some(prev) = previous else {
        return Ok(false);
    };
    let Some(tx) = block.get_transaction(Some(prev)) else {
        return Ok(false);
    };
    if tx.amount <= 0 || tx.token_code == NATIVE_TICKER {
        return Ok(false);
    }
    let genesis = ctx.store.find_token_genesis_block(None, &tx.token_code)?;
    let now = ctx.clock.now();
    Ok(genesis
        .as_ref()
        .and_then(Block::token_genesis)
        .is_some_and(|token| token.is_expired(now)))
}

/// Checks shared by every value-moving kind: account id format, the whole
/// ancestor chain, balance carry-forward and the network fee schedule.
pub(crate) fn verify_transaction_block(
    ctx: &ValidationContext<'_>,
    block: &Block,
    previous: Option<&Block>,
) -> Result<ResultCode, AuthorizerError> {
    ensure!(
        validate_account_id(&block.account_id),
        ResultCode::InvalidAccountId
    );
    if block.previous_hash.is_zero() {
        return Ok(ResultCode::Success);
    }

    let code = walk_account_chain(ctx.store, block)?;
    if !code.is_success() {
        return Ok(code);
    }

    let Some(prev) = previous else {
        return Ok(ResultCode::AccountChainBlockValidationFailed);
    };
    ensure!(
        block.carries_forward_balances(prev),
        ResultCode::AccountChainBalanceValidationFailed
    );

    match &block.kind {
        BlockKind::SendTransfer { .. } => {
            ensure!(
                block.fee == ctx.params.transfer_fee,
                ResultCode::InvalidFeeAmount
            );
        }
        BlockKind::TokenGenesis(_) => {
            ensure!(
                block.fee == ctx.params.token_generation_fee,
                ResultCode::InvalidFeeAmount
            );
        }
        _ => {}
    }
    Ok(ResultCode::Success)
}

/// Validate every ancestor of `block` back to the chain's opening block.
///
/// Each ancestor is checked against its own predecessor and must carry a
/// valid owner signature. Indices must step down by one per link, which
/// also bounds the walk.
pub(crate) fn walk_account_chain(
    store: &dyn AccountCollection,
    block: &Block,
) -> Result<ResultCode, AuthorizerError> {
    let mut depth = 0u64;
    let mut cursor = find_previous(store, block)?;
    let mut child_index = block.index;

    let result = loop {
        let Some(current) = cursor else {
            break ResultCode::AccountChainBlockValidationFailed;
        };
        depth += 1;
        if current.index.checked_add(1) != Some(child_index) {
            break ResultCode::AccountChainBlockValidationFailed;
        }

        let parent = find_previous(store, &current)?;
        if !current.is_block_valid(parent.as_ref()) {
            break ResultCode::AccountChainBlockValidationFailed;
        }
        if !verify_account_signature(&current.hash, &current.account_id, &current.signature) {
            break ResultCode::AccountChainSignatureValidationFailed;
        }
        if current.is_opening() || current.previous_hash.is_zero() {
            break ResultCode::Success;
        }

        child_index = current.index;
        cursor = parent;
    };

    tracing::trace!(
        account = %block.account_id,
        depth,
        code = %result,
        "account chain walked"
    );
    Ok(result)
}
