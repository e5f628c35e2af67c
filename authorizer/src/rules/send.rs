use lattice_crypto::validate_account_id;
use lattice_ledger::{Block, BlockKind, ServiceParams};
use lattice_types::NATIVE_TICKER;

use super::{private, regular_fee, KindRules};
use crate::chain::ValidationContext;
use crate::non_fungible::validate_non_fungible;
use crate::result::{check, ensure};
use crate::{AuthorizerError, ResultCode};

/// Transfers out of an account.
pub struct SendRules;

impl private::Sealed for SendRules {}

impl KindRules for SendRules {
    fn validate_fee(&self, block: &Block, params: &ServiceParams) -> ResultCode {
        regular_fee(block, params.transfer_fee)
    }

    fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        block: &Block,
        previous: Option<&Block>,
    ) -> Result<ResultCode, AuthorizerError> {
        let BlockKind::SendTransfer {
            destination_account_id,
        } = &block.kind
        else {
            return Ok(ResultCode::UnsupportedBlockType);
        };
        ensure!(
            validate_account_id(destination_account_id)
                && destination_account_id != &block.account_id,
            ResultCode::InvalidDestinationAccountId
        );

        // A send spends from an existing chain.
        let Some(prev) = previous else {
            return Ok(ResultCode::CouldNotFindLatestBlock);
        };
        let Some(tx) = block.get_transaction(Some(prev)) else {
            return Ok(ResultCode::InvalidTransactionAmount);
        };

        ensure!(tx.amount > 0, ResultCode::InvalidTransactionAmount);
        let native_spent = if tx.token_code == NATIVE_TICKER {
            u128::try_from(tx.amount)
                .ok()
                .and_then(|amount| amount.checked_add(block.fee))
        } else {
            Some(block.fee)
        };
        ensure!(
            native_spent.is_some_and(|spent| spent <= prev.balance(NATIVE_TICKER)),
            ResultCode::InsufficientFunds
        );

        check!(validate_non_fungible(ctx.store, block, previous)?);
        Ok(ResultCode::Success)
    }
}
