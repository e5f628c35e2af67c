use lattice_ledger::{Block, BlockKind, ServiceParams};

use super::{no_fee, private, KindRules};
use crate::chain::{find_previous, ValidationContext};
use crate::non_fungible::validate_non_fungible;
use crate::result::{check, ensure};
use crate::{AuthorizerError, ResultCode};

/// Accepting a send, either on an existing chain or as the first block of
/// a new account.
pub struct ReceiveRules {
    pub opening: bool,
}

impl private::Sealed for ReceiveRules {}

impl KindRules for ReceiveRules {
    fn validate_fee(&self, block: &Block, _params: &ServiceParams) -> ResultCode {
        no_fee(block)
    }

    fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        block: &Block,
        previous: Option<&Block>,
    ) -> Result<ResultCode, AuthorizerError> {
        if self.opening {
            ensure!(
                !ctx.store.account_exists(&block.account_id)?,
                ResultCode::AccountAlreadyExists
            );
        } else {
            ensure!(previous.is_some(), ResultCode::CouldNotFindLatestBlock);
        }

        let Some(source_hash) = block.kind.source_hash() else {
            return Ok(ResultCode::UnsupportedBlockType);
        };
        let Some(source) = ctx.store.find_block_by_hash(source_hash)? else {
            return Ok(ResultCode::SourceSendBlockNotFound);
        };
        let BlockKind::SendTransfer {
            destination_account_id,
        } = &source.kind
        else {
            return Ok(ResultCode::SourceSendBlockNotFound);
        };
        ensure!(
            destination_account_id == &block.account_id,
            ResultCode::InvalidDestinationAccountId
        );
        ensure!(
            ctx.store.find_block_by_source_hash(source_hash)?.is_none(),
            ResultCode::SourceSendBlockAlreadyReceived
        );

        let source_previous = find_previous(ctx.store, &source)?;
        let Some(sent) = source.get_transaction(source_previous.as_ref()) else {
            return Ok(ResultCode::SourceSendBlockNotFound);
        };
        let received = block.get_transaction(previous);
        ensure!(
            received.is_some_and(|r| r.token_code == sent.token_code && r.amount == sent.amount),
            ResultCode::TransactionAmountDoesNotMatch
        );

        check!(validate_non_fungible(ctx.store, block, previous)?);
        Ok(ResultCode::Success)
    }
}
