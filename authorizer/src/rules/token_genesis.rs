use lattice_ledger::{Block, ServiceParams};
use lattice_types::{is_valid_ticker, NATIVE_TICKER};

use super::{private, regular_fee, KindRules};
use crate::chain::ValidationContext;
use crate::result::ensure;
use crate::{AuthorizerError, ResultCode};

/// Registration and minting of a new token.
pub struct TokenGenesisRules;

impl private::Sealed for TokenGenesisRules {}

impl KindRules for TokenGenesisRules {
    fn validate_fee(&self, block: &Block, params: &ServiceParams) -> ResultCode {
        regular_fee(block, params.token_generation_fee)
    }

    fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        block: &Block,
        previous: Option<&Block>,
    ) -> Result<ResultCode, AuthorizerError> {
        let Some(token) = block.token_genesis() else {
            return Ok(ResultCode::UnsupportedBlockType);
        };
        // The registration fee is paid from an existing chain.
        let Some(prev) = previous else {
            return Ok(ResultCode::CouldNotFindLatestBlock);
        };
        ensure!(
            prev.balance(NATIVE_TICKER) >= block.fee,
            ResultCode::InsufficientFunds
        );

        let domain_matches = token
            .ticker
            .split_once('/')
            .is_some_and(|(domain, _)| domain == token.domain_name);
        ensure!(
            token.ticker != NATIVE_TICKER && is_valid_ticker(&token.ticker) && domain_matches,
            ResultCode::InvalidTokenTicker
        );
        ensure!(
            ctx.store
                .find_token_genesis_block(None, &token.ticker)?
                .is_none(),
            ResultCode::TokenGenesisBlockAlreadyExists
        );
        ensure!(
            !token.is_non_fungible || token.non_fungible_key.is_some(),
            ResultCode::MissingNonFungibleKey
        );
        // Amounts are signed 128-bit, so no balance may exceed `i128::MAX`.
        ensure!(
            i128::try_from(token.total_supply).is_ok()
                && block.balance(&token.ticker) == token.total_supply,
            ResultCode::InvalidTokenSupply
        );
        Ok(ResultCode::Success)
    }
}
