//! Transaction extraction: what a block moved relative to its predecessor.
//!
//! Blocks store balance sheets, not deltas. The moved asset is found by a
//! two-pass scan over the block's own balances: the first non-native token
//! whose balance differs wins; only if none differs is the native token the
//! moved asset. For sends the native amount excludes the fee.

use crate::block::{Balances, Block};
use crate::kind::BlockKind;
use lattice_types::NATIVE_TICKER;
use serde::{Deserialize, Serialize};

/// The economic effect of one block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub token_code: String,
    /// Amount of `token_code` moved, fee excluded. Negative amounts only
    /// come out of malformed blocks.
    pub amount: i128,
    /// Total change of the `token_code` balance, fee included.
    pub total_balance_change: i128,
    pub fee_code: String,
    pub fee_amount: u128,
}

fn signed(value: u128) -> i128 {
    i128::try_from(value).unwrap_or(i128::MAX)
}

fn balance_of(balances: &Balances, token_code: &str) -> u128 {
    balances.get(token_code).copied().unwrap_or(0)
}

/// `to - from`, computed on the raw balances. Saturates only when the
/// difference itself is outside `i128`.
fn difference(from: u128, to: u128) -> i128 {
    if to >= from {
        signed(to - from)
    } else {
        signed(from - to).saturating_neg()
    }
}

/// First non-native token whose balance differs between the two sheets.
fn changed_foreign_token<'a>(current: &'a Balances, previous: &Balances) -> Option<&'a str> {
    current
        .iter()
        .find(|(code, value)| {
            code.as_str() != NATIVE_TICKER && balance_of(previous, code) != **value
        })
        .map(|(code, _)| code.as_str())
}

impl Block {
    /// Compute the transaction this block performs after `previous`.
    ///
    /// `None` when the block kind moves no value, or when a send-class block
    /// has no predecessor to spend from.
    pub fn get_transaction(&self, previous: Option<&Block>) -> Option<TransactionInfo> {
        match &self.kind {
            BlockKind::SendTransfer { .. } | BlockKind::TradeOrder(_) | BlockKind::Trade(_) => {
                previous.map(|prev| self.send_transaction(prev))
            }
            BlockKind::ReceiveTransfer { .. }
            | BlockKind::OpenWithReceiveTransfer { .. }
            | BlockKind::ReceiveFee { .. }
            | BlockKind::OpenWithReceiveFee { .. }
            | BlockKind::ExecuteTradeOrder(_)
            | BlockKind::CancelTradeOrder(_) => Some(self.receive_transaction(previous)),
            BlockKind::TokenGenesis(token) => {
                let prev = previous?;
                let amount = difference(
                    balance_of(&prev.balances, &token.ticker),
                    balance_of(&self.balances, &token.ticker),
                );
                Some(self.info(&token.ticker, amount, amount))
            }
            BlockKind::NativeTokenGenesis(_) => {
                let amount = signed(balance_of(&self.balances, NATIVE_TICKER));
                Some(self.info(NATIVE_TICKER, amount, amount))
            }
            BlockKind::Service(_)
            | BlockKind::Consolidation(_)
            | BlockKind::NullTransaction { .. } => None,
        }
    }

    fn send_transaction(&self, previous: &Block) -> TransactionInfo {
        let spent = |code: &str| {
            difference(
                balance_of(&self.balances, code),
                balance_of(&previous.balances, code),
            )
        };
        match changed_foreign_token(&self.balances, &previous.balances) {
            Some(code) => {
                let amount = spent(code);
                self.info(code, amount, amount)
            }
            None => {
                let total = spent(NATIVE_TICKER);
                let amount = total.saturating_sub(signed(self.fee));
                self.info(NATIVE_TICKER, amount, total)
            }
        }
    }

    fn receive_transaction(&self, previous: Option<&Block>) -> TransactionInfo {
        let empty = Balances::new();
        let prev_balances = previous.map_or(&empty, |prev| &prev.balances);
        let code = changed_foreign_token(&self.balances, prev_balances).unwrap_or(NATIVE_TICKER);
        let amount = difference(balance_of(prev_balances, code), balance_of(&self.balances, code));
        self.info(code, amount, amount)
    }

    fn info(&self, token_code: &str, amount: i128, total_balance_change: i128) -> TransactionInfo {
        TransactionInfo {
            token_code: token_code.to_string(),
            amount,
            total_balance_change,
            fee_code: self.fee_code.clone(),
            fee_amount: self.fee,
        }
    }
}
