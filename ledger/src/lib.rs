//! Account-chain block model.
//!
//! Every account owns its own append-only chain of blocks. A block records
//! the account's full balance sheet after the operation, so "what moved"
//! is recovered by diffing a block against its predecessor
//! (see [`Block::get_transaction`]).

pub mod block;
pub mod error;
pub mod genesis;
pub mod kind;
pub mod non_fungible;
pub mod transaction;
pub mod validation;

pub use block::{AuthorizationSignature, Balances, Block, FeeType};
pub use error::LedgerError;
pub use genesis::{
    create_native_genesis, create_service_block, initial_params, GenesisConfig, NATIVE_TOTAL_SUPPLY,
};
pub use kind::{
    BlockKind, BlockType, CancelTradeOrder, Consolidation, ExecuteTradeOrder, ServiceParams,
    TokenGenesis, Trade, TradeOrder, TradeOrderType,
};
pub use non_fungible::NonFungibleToken;
pub use transaction::TransactionInfo;
