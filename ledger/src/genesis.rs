//! Bootstrap blocks: the native token genesis and service blocks.
//!
//! A network starts from two chains. The genesis account opens its chain
//! with a [`BlockKind::NativeTokenGenesis`] holding the entire native
//! supply, and the service account publishes the fee schedule that every
//! authorizer enforces.

use crate::block::Block;
use crate::error::LedgerError;
use crate::kind::{BlockKind, ServiceParams, TokenGenesis};
use lattice_crypto::derive_account_id;
use lattice_types::{KeyPair, NetworkId, Timestamp, NATIVE_TICKER};

/// Native supply in raw units: 10 billion tokens at 8 decimal places.
pub const NATIVE_TOTAL_SUPPLY: u128 = 10_000_000_000 * 100_000_000;

/// Configuration for bootstrapping a network.
#[derive(Clone, Debug)]
pub struct GenesisConfig {
    pub network: NetworkId,
    pub total_supply: u128,
    pub timestamp: Timestamp,
    /// Fee schedule published by the first service block.
    pub params: ServiceParams,
}

impl GenesisConfig {
    /// Defaults for `network`, with an empty authorizer list.
    pub fn for_network(network: NetworkId) -> Self {
        Self {
            network,
            total_supply: NATIVE_TOTAL_SUPPLY,
            timestamp: genesis_timestamp(network),
            params: initial_params(network),
        }
    }
}

/// Create the first block of the genesis account, minting the native supply.
pub fn create_native_genesis(config: &GenesisConfig, owner: &KeyPair) -> Result<Block, LedgerError> {
    let account_id = derive_account_id(&owner.public);
    let token = TokenGenesis {
        ticker: NATIVE_TICKER.to_string(),
        domain_name: String::new(),
        description: "native token".to_string(),
        precision: 8,
        total_supply: config.total_supply,
        is_final_supply: true,
        is_non_fungible: false,
        non_fungible_key: None,
        renewal_date: None,
        owner: account_id.to_string(),
        website: String::new(),
    };
    let mut block = Block::new(
        account_id,
        config.network,
        config.timestamp,
        BlockKind::NativeTokenGenesis(token),
    );
    block.chain_after(None);
    block
        .balances
        .insert(NATIVE_TICKER.to_string(), config.total_supply);
    block.seal(&owner.private)?;
    Ok(block)
}

/// Create the next service block, publishing `params`.
///
/// `previous` is the service chain's current head, or `None` for the first.
pub fn create_service_block(
    network: NetworkId,
    owner: &KeyPair,
    params: ServiceParams,
    previous: Option<&Block>,
    timestamp: Timestamp,
) -> Result<Block, LedgerError> {
    if let Some(prev) = previous {
        if prev.service_params().is_none() {
            return Err(LedgerError::InvalidBlock {
                reason: format!("service chain head {} is not a service block", prev.hash),
            });
        }
    }
    let mut block = Block::new(
        derive_account_id(&owner.public),
        network,
        timestamp,
        BlockKind::Service(params),
    );
    block.chain_after(previous);
    block.seal(&owner.private)?;
    Ok(block)
}

/// Fee schedule a network starts with, in raw native units.
pub fn initial_params(network: NetworkId) -> ServiceParams {
    let (transfer_fee, token_generation_fee, trade_fee) = match network {
        NetworkId::Live => (100_000_000, 10_000 * 100_000_000, 10_000_000),
        NetworkId::Test => (100_000_000, 100 * 100_000_000, 10_000_000),
        // Dev keeps fees tiny so hand-written chains stay readable.
        NetworkId::Dev => (1, 10, 1),
    };
    ServiceParams {
        transfer_fee,
        token_generation_fee,
        trade_fee,
        authorizers: Vec::new(),
    }
}

fn genesis_timestamp(network: NetworkId) -> Timestamp {
    match network {
        // 2026-01-01 00:00:00 UTC
        NetworkId::Live => Timestamp::new(1_767_225_600),
        // 2025-06-01 00:00:00 UTC
        NetworkId::Test => Timestamp::new(1_748_736_000),
        NetworkId::Dev => Timestamp::EPOCH,
    }
}
