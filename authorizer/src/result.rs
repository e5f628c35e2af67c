//! Validation verdicts.
//!
//! [`ResultCode`] is the only data besides the block and the endorsement
//! that crosses the authorize/commit boundary, so its discriminants are
//! stable wire values. New codes are appended; existing ones never move.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ResultCode {
    Success = 0,
    InvalidNetworkId = 1,
    BlockValidationFailed = 2,
    BlockSignatureValidationFailed = 3,
    BlockWithThisIndexAlreadyExists = 4,
    BlockWithThisPreviousHashAlreadyExists = 5,
    InvalidIndexSequence = 6,
    CouldNotFindLatestBlock = 7,
    TokenExpired = 8,
    InvalidAccountId = 9,
    AccountChainBlockValidationFailed = 10,
    AccountChainSignatureValidationFailed = 11,
    AccountChainBalanceValidationFailed = 12,
    InvalidFeeAmount = 13,
    TokenGenesisBlockNotFound = 14,
    MissingNonFungibleToken = 15,
    InvalidNonFungibleAmount = 16,
    InvalidNonFungibleTokenCode = 17,
    NonFungibleSignatureVerificationFailed = 18,
    UnsupportedBlockType = 19,
    InvalidDestinationAccountId = 20,
    InvalidTransactionAmount = 21,
    InsufficientFunds = 22,
    SourceSendBlockNotFound = 23,
    SourceSendBlockAlreadyReceived = 24,
    TransactionAmountDoesNotMatch = 25,
    AccountAlreadyExists = 26,
    InvalidTokenTicker = 27,
    TokenGenesisBlockAlreadyExists = 28,
    MissingNonFungibleKey = 29,
    InvalidTokenSupply = 30,
    TradeOrderNotFound = 31,
    BlockWithThisHashAlreadyExists = 32,
    BlockWithThisUIndexAlreadyExists = 33,
    TradeOrderAlreadyCancelled = 34,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Wire value.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Rejections that come from storage uniqueness constraints at commit.
    /// Resubmitting the same block can never succeed.
    pub fn is_definitive(self) -> bool {
        matches!(
            self,
            Self::BlockWithThisIndexAlreadyExists
                | Self::BlockWithThisHashAlreadyExists
                | Self::BlockWithThisUIndexAlreadyExists
        )
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Return early from a `Result<ResultCode, _>` function when a nested
/// check did not succeed.
macro_rules! check {
    ($verdict:expr) => {{
        let code: $crate::ResultCode = $verdict;
        if !code.is_success() {
            return Ok(code);
        }
    }};
}

/// Return `Ok($code)` unless `$cond` holds.
macro_rules! ensure {
    ($cond:expr, $code:expr) => {
        if !$cond {
            return Ok($code);
        }
    };
}

pub(crate) use check;
pub(crate) use ensure;
