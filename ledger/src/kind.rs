//! Block kinds and their payloads.
//!
//! The block hierarchy is a closed tagged union: the common header lives on
//! [`Block`](crate::Block), the per-kind fields live in [`BlockKind`].

use lattice_types::{AccountId, BlockHash, PublicKey, Timestamp};
use serde::{Deserialize, Serialize};

/// Type discriminator, stable across the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    SendTransfer,
    ReceiveTransfer,
    OpenWithReceiveTransfer,
    TokenGenesis,
    NativeTokenGenesis,
    TradeOrder,
    Trade,
    ExecuteTradeOrder,
    CancelTradeOrder,
    Service,
    Consolidation,
    ReceiveFee,
    OpenWithReceiveFee,
    NullTransaction,
}

/// Per-kind payload of a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Move funds out of this account to `destination_account_id`.
    SendTransfer { destination_account_id: AccountId },
    /// Accept the funds of the send block `source_hash`.
    ReceiveTransfer { source_hash: BlockHash },
    /// First block of a new account, accepting a send.
    OpenWithReceiveTransfer { source_hash: BlockHash },
    /// Register and mint a new token.
    TokenGenesis(TokenGenesis),
    /// Mint the network's native token; first block of the genesis account.
    NativeTokenGenesis(TokenGenesis),
    /// Lock funds behind an exchange order.
    TradeOrder(TradeOrder),
    /// Fill (part of) somebody else's order.
    Trade(Trade),
    /// Collect the proceeds of a trade against one of this account's orders.
    ExecuteTradeOrder(ExecuteTradeOrder),
    /// Withdraw an order and take back its locked funds.
    CancelTradeOrder(CancelTradeOrder),
    /// Network-wide fee schedule and authorizer list.
    Service(ServiceParams),
    /// Checkpoint over a batch of committed blocks.
    Consolidation(Consolidation),
    /// Collect authorization fees.
    ReceiveFee { source_hash: BlockHash },
    /// First block of a fee-collecting account.
    OpenWithReceiveFee { source_hash: BlockHash },
    /// Placeholder for a block that failed after being assigned a position.
    NullTransaction { failed_block_hash: BlockHash },
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::SendTransfer { .. } => BlockType::SendTransfer,
            Self::ReceiveTransfer { .. } => BlockType::ReceiveTransfer,
            Self::OpenWithReceiveTransfer { .. } => BlockType::OpenWithReceiveTransfer,
            Self::TokenGenesis(_) => BlockType::TokenGenesis,
            Self::NativeTokenGenesis(_) => BlockType::NativeTokenGenesis,
            Self::TradeOrder(_) => BlockType::TradeOrder,
            Self::Trade(_) => BlockType::Trade,
            Self::ExecuteTradeOrder(_) => BlockType::ExecuteTradeOrder,
            Self::CancelTradeOrder(_) => BlockType::CancelTradeOrder,
            Self::Service(_) => BlockType::Service,
            Self::Consolidation(_) => BlockType::Consolidation,
            Self::ReceiveFee { .. } => BlockType::ReceiveFee,
            Self::OpenWithReceiveFee { .. } => BlockType::OpenWithReceiveFee,
            Self::NullTransaction { .. } => BlockType::NullTransaction,
        }
    }

    /// Kinds that start an account chain. The ancestor walk stops here.
    pub fn is_opening(&self) -> bool {
        matches!(
            self,
            Self::OpenWithReceiveTransfer { .. }
                | Self::OpenWithReceiveFee { .. }
                | Self::NativeTokenGenesis(_)
        )
    }

    /// Kinds whose balances move value, i.e. that have a transaction.
    pub fn has_transaction(&self) -> bool {
        !matches!(
            self,
            Self::Service(_) | Self::Consolidation(_) | Self::NullTransaction { .. }
        )
    }

    /// Kinds whose transaction moves value out of the account.
    pub fn is_send_class(&self) -> bool {
        matches!(
            self,
            Self::SendTransfer { .. } | Self::TradeOrder(_) | Self::Trade(_)
        )
    }

    /// Kinds whose transaction moves value into the account.
    pub fn is_receive_class(&self) -> bool {
        matches!(
            self,
            Self::ReceiveTransfer { .. }
                | Self::OpenWithReceiveTransfer { .. }
                | Self::ReceiveFee { .. }
                | Self::OpenWithReceiveFee { .. }
                | Self::ExecuteTradeOrder(_)
                | Self::CancelTradeOrder(_)
        )
    }

    /// The send block a receive-class block accepts.
    pub fn source_hash(&self) -> Option<&BlockHash> {
        match self {
            Self::ReceiveTransfer { source_hash }
            | Self::OpenWithReceiveTransfer { source_hash }
            | Self::ReceiveFee { source_hash }
            | Self::OpenWithReceiveFee { source_hash } => Some(source_hash),
            _ => None,
        }
    }
}

/// Token registration data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGenesis {
    /// `domain/name`, or the native ticker for the native genesis.
    pub ticker: String,
    pub domain_name: String,
    pub description: String,
    /// Decimal places shown to users; amounts are always raw units.
    pub precision: u8,
    pub total_supply: u128,
    pub is_final_supply: bool,
    pub is_non_fungible: bool,
    /// Key that signs the NFT payloads of this token.
    pub non_fungible_key: Option<PublicKey>,
    /// Transfers of the token are refused after this date.
    pub renewal_date: Option<Timestamp>,
    pub owner: String,
    pub website: String,
}

impl TokenGenesis {
    /// Past its renewal date at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.renewal_date.is_some_and(|date| date.is_before(now))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOrderType {
    Buy,
    Sell,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOrder {
    pub order_type: TradeOrderType,
    pub sell_token_code: String,
    pub buy_token_code: String,
    /// Amount of `sell_token_code` locked by the order.
    pub trade_amount: u128,
    pub min_trade_amount: u128,
    pub max_quantity: u32,
    /// Raw units of the buy token per unit of the sell token.
    pub price: u128,
    /// Restricts the order to a single counterparty.
    pub destination_account_id: Option<AccountId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_order_id: BlockHash,
    pub sell_token_code: String,
    pub buy_token_code: String,
    pub sell_amount: u128,
    pub buy_amount: u128,
    /// Owner of the order being filled.
    pub destination_account_id: AccountId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteTradeOrder {
    pub trade_order_id: BlockHash,
    pub trade_id: BlockHash,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTradeOrder {
    pub trade_order_id: BlockHash,
}

/// The economic parameters every authorizer enforces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceParams {
    pub transfer_fee: u128,
    pub token_generation_fee: u128,
    pub trade_fee: u128,
    /// Nodes currently allowed to endorse blocks.
    pub authorizers: Vec<AccountId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consolidation {
    pub block_hashes: Vec<BlockHash>,
    pub merkle_root: BlockHash,
    pub total_fees: u128,
}
