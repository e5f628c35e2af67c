use lattice_ledger::{Block, BlockKind, ServiceParams};
use lattice_types::NATIVE_TICKER;

use super::{no_fee, private, regular_fee, KindRules};
use crate::chain::ValidationContext;
use crate::result::ensure;
use crate::{AuthorizerError, ResultCode};

/// Locking funds behind an exchange order.
pub struct TradeOrderRules;

impl private::Sealed for TradeOrderRules {}

impl KindRules for TradeOrderRules {
    fn validate_fee(&self, block: &Block, params: &ServiceParams) -> ResultCode {
        regular_fee(block, params.trade_fee)
    }

    fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        block: &Block,
        previous: Option<&Block>,
    ) -> Result<ResultCode, AuthorizerError> {
        let BlockKind::TradeOrder(order) = &block.kind else {
            return Ok(ResultCode::UnsupportedBlockType);
        };
        let Some(prev) = previous else {
            return Ok(ResultCode::CouldNotFindLatestBlock);
        };
        ensure!(order.trade_amount > 0, ResultCode::InvalidTransactionAmount);
        ensure!(
            prev.balance(NATIVE_TICKER) >= block.fee,
            ResultCode::InsufficientFunds
        );

        for code in [&order.sell_token_code, &order.buy_token_code] {
            if code != NATIVE_TICKER {
                ensure!(
                    ctx.store.find_token_genesis_block(None, code)?.is_some(),
                    ResultCode::TokenGenesisBlockNotFound
                );
            }
        }

        let locked = block.get_transaction(Some(prev));
        ensure!(
            locked.is_some_and(|tx| tx.token_code == order.sell_token_code
                && i128::try_from(order.trade_amount).ok() == Some(tx.amount)),
            ResultCode::TransactionAmountDoesNotMatch
        );
        Ok(ResultCode::Success)
    }
}

/// Withdrawing one of this account's orders.
pub struct CancelTradeOrderRules;

impl private::Sealed for CancelTradeOrderRules {}

impl KindRules for CancelTradeOrderRules {
    fn validate_fee(&self, block: &Block, _params: &ServiceParams) -> ResultCode {
        no_fee(block)
    }

    fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        block: &Block,
        previous: Option<&Block>,
    ) -> Result<ResultCode, AuthorizerError> {
        let BlockKind::CancelTradeOrder(cancel) = &block.kind else {
            return Ok(ResultCode::UnsupportedBlockType);
        };
        ensure!(previous.is_some(), ResultCode::CouldNotFindLatestBlock);

        let order = ctx
            .store
            .find_block_by_account_hash(&block.account_id, &cancel.trade_order_id)?;
        let Some(BlockKind::TradeOrder(order)) = order.map(|b| b.kind) else {
            return Ok(ResultCode::TradeOrderNotFound);
        };
        ensure!(
            ctx.store
                .find_cancellation(&cancel.trade_order_id)?
                .is_none(),
            ResultCode::TradeOrderAlreadyCancelled
        );

        // Whatever comes back must be the locked token, and no more of it.
        if let Some(tx) = block.get_transaction(previous) {
            if tx.amount != 0 {
                ensure!(
                    tx.token_code == order.sell_token_code
                        && i128::try_from(order.trade_amount).is_ok_and(|locked| tx.amount <= locked),
                    ResultCode::TransactionAmountDoesNotMatch
                );
            }
        }
        Ok(ResultCode::Success)
    }
}
