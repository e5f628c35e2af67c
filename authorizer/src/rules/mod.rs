//! Per-kind authorization rules.
//!
//! Every block kind the authorizer accepts has a rule set implementing
//! [`KindRules`]. The trait is sealed and has no default methods, so a kind
//! cannot be wired up without both its fee rule and its transaction rule.

mod receive;
mod send;
mod token_genesis;
mod trade;

use lattice_ledger::{Block, BlockType, FeeType, ServiceParams};

use crate::chain::ValidationContext;
use crate::{AuthorizerError, ResultCode};

pub use receive::ReceiveRules;
pub use send::SendRules;
pub use token_genesis::TokenGenesisRules;
pub use trade::{CancelTradeOrderRules, TradeOrderRules};

mod private {
    pub trait Sealed {}
}

pub trait KindRules: private::Sealed + Send + Sync {
    /// The declared fee against the current fee schedule.
    fn validate_fee(&self, block: &Block, params: &ServiceParams) -> ResultCode;

    /// Economic rules of the kind, after chain validation passed.
    fn validate_transaction(
        &self,
        ctx: &ValidationContext<'_>,
        block: &Block,
        previous: Option<&Block>,
    ) -> Result<ResultCode, AuthorizerError>;
}

static SEND: SendRules = SendRules;
static RECEIVE: ReceiveRules = ReceiveRules { opening: false };
static OPEN_WITH_RECEIVE: ReceiveRules = ReceiveRules { opening: true };
static TOKEN_GENESIS: TokenGenesisRules = TokenGenesisRules;
static TRADE_ORDER: TradeOrderRules = TradeOrderRules;
static CANCEL_TRADE_ORDER: CancelTradeOrderRules = CancelTradeOrderRules;

/// Rule set for `block_type`, or `None` if this authorizer does not accept it.
pub fn rules_for(block_type: BlockType) -> Option<&'static dyn KindRules> {
    match block_type {
        BlockType::SendTransfer => Some(&SEND),
        BlockType::ReceiveTransfer => Some(&RECEIVE),
        BlockType::OpenWithReceiveTransfer => Some(&OPEN_WITH_RECEIVE),
        BlockType::TokenGenesis => Some(&TOKEN_GENESIS),
        BlockType::TradeOrder => Some(&TRADE_ORDER),
        BlockType::CancelTradeOrder => Some(&CANCEL_TRADE_ORDER),
        BlockType::NativeTokenGenesis
        | BlockType::Trade
        | BlockType::ExecuteTradeOrder
        | BlockType::Service
        | BlockType::Consolidation
        | BlockType::ReceiveFee
        | BlockType::OpenWithReceiveFee
        | BlockType::NullTransaction => None,
    }
}

/// Fee paid in the native token, of exactly `expected`.
fn regular_fee(block: &Block, expected: u128) -> ResultCode {
    if block.fee_type == FeeType::Regular && block.fee == expected {
        ResultCode::Success
    } else {
        ResultCode::InvalidFeeAmount
    }
}

fn no_fee(block: &Block) -> ResultCode {
    if block.fee_type == FeeType::NoFee && block.fee == 0 {
        ResultCode::Success
    } else {
        ResultCode::InvalidFeeAmount
    }
}
