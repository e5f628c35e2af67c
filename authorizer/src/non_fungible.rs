//! Transfer rules for non-fungible tokens.

use lattice_ledger::Block;
use lattice_store::AccountCollection;
use lattice_types::NATIVE_TICKER;

use crate::result::ensure;
use crate::{AuthorizerError, ResultCode};

/// A transfer of a non-fungible token must carry the item it moves, for
/// exactly the moved amount, signed by the token's issuing key.
pub(crate) fn validate_non_fungible(
    store: &dyn AccountCollection,
    block: &Block,
    previous: Option<&Block>,
) -> Result<ResultCode, AuthorizerError> {
    let Some(tx) = block.get_transaction(previous) else {
        return Ok(ResultCode::Success);
    };
    if tx.token_code == NATIVE_TICKER {
        return Ok(ResultCode::Success);
    }

    let Some(genesis) = store.find_token_genesis_block(None, &tx.token_code)? else {
        return Ok(ResultCode::TokenGenesisBlockNotFound);
    };
    let Some(token) = genesis.token_genesis() else {
        return Ok(ResultCode::TokenGenesisBlockNotFound);
    };
    if !token.is_non_fungible {
        return Ok(ResultCode::Success);
    }

    let Some(nft) = &block.non_fungible_token else {
        return Ok(ResultCode::MissingNonFungibleToken);
    };
    ensure!(
        i128::try_from(nft.denomination).ok() == Some(tx.amount),
        ResultCode::InvalidNonFungibleAmount
    );
    ensure!(
        nft.token_code == tx.token_code,
        ResultCode::InvalidNonFungibleTokenCode
    );
    ensure!(
        token
            .non_fungible_key
            .is_some_and(|key| nft.verify_signature(&key)),
        ResultCode::NonFungibleSignatureVerificationFailed
    );
    Ok(ResultCode::Success)
}
