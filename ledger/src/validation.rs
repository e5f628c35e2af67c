//! Structural self-checks of a block against its predecessor.
//!
//! These are the checks a block can answer on its own: hash integrity, the
//! link to the predecessor, and the balance deltas its kind permits. Chain
//! position, signatures, fees and double-spends are the authorizer's job.

use crate::block::Block;
use crate::kind::BlockKind;
use lattice_types::NATIVE_TICKER;

impl Block {
    /// Whether this block is internally consistent and a legal successor of
    /// `previous`. Without a predecessor only the self-contained checks run.
    pub fn is_block_valid(&self, previous: Option<&Block>) -> bool {
        if self.account_id.is_empty() || self.hash.is_zero() {
            return false;
        }
        match self.compute_hash() {
            Ok(hash) if hash == self.hash => {}
            _ => return false,
        }
        if self.fee > 0 && self.fee_code != NATIVE_TICKER {
            return false;
        }
        if let BlockKind::SendTransfer {
            destination_account_id,
        } = &self.kind
        {
            if destination_account_id.is_empty() {
                return false;
            }
        }

        let Some(prev) = previous else {
            return true;
        };
        if prev.hash != self.previous_hash
            || prev.account_id != self.account_id
            || self.timestamp < prev.timestamp
        {
            return false;
        }
        self.has_valid_deltas(prev)
    }

    /// Every token of `previous` is still listed here, even if unchanged.
    pub fn carries_forward_balances(&self, previous: &Block) -> bool {
        previous
            .balances
            .keys()
            .all(|code| self.balances.contains_key(code))
    }

    /// The native balance dropped by exactly the fee. A predecessor that
    /// cannot cover the fee must leave it untouched; the shortfall is
    /// judged by the authorizer as insufficient funds.
    fn pays_fee(&self, prev: &Block) -> bool {
        let before = prev.balance(NATIVE_TICKER);
        self.balance(NATIVE_TICKER) == before.checked_sub(self.fee).unwrap_or(before)
    }

    /// Balance movements the kind allows. Only tokens listed in this block
    /// are compared; dropped tokens are caught by
    /// [`Block::carries_forward_balances`].
    fn has_valid_deltas(&self, prev: &Block) -> bool {
        let changed: Vec<(&str, u128, u128)> = self
            .balances
            .iter()
            .map(|(code, now)| (code.as_str(), prev.balance(code), *now))
            .filter(|(_, before, now)| before != now)
            .collect();

        match &self.kind {
            kind if kind.is_send_class() => {
                if changed.iter().any(|(_, before, now)| now > before) {
                    return false;
                }
                let foreign: Vec<_> = changed
                    .iter()
                    .filter(|(code, _, _)| *code != NATIVE_TICKER)
                    .collect();
                match foreign.len() {
                    0 => true,
                    // A foreign send may only take the fee from the native balance.
                    1 => self.pays_fee(prev),
                    _ => false,
                }
            }
            kind if kind.is_receive_class() => {
                changed.len() <= 1 && changed.iter().all(|(_, before, now)| now > before)
            }
            BlockKind::TokenGenesis(token) => {
                self.pays_fee(prev)
                    && changed.iter().all(|(code, before, _)| {
                        (*code == token.ticker && *before == 0) || *code == NATIVE_TICKER
                    })
            }
            // Opening kind: a predecessor is itself an inconsistency.
            BlockKind::NativeTokenGenesis(_) => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::FeeType;
    use crate::kind::{ServiceParams, TokenGenesis};
    use lattice_crypto::{derive_account_id, keypair_from_seed};
    use lattice_types::{AccountId, BlockHash, KeyPair, NetworkId, Timestamp};

    fn owner() -> KeyPair {
        keypair_from_seed(&[1; 32])
    }

    fn sealed(
        kind: BlockKind,
        previous: Option<&Block>,
        balances: &[(&str, u128)],
        fee: u128,
    ) -> Block {
        let kp = owner();
        let mut block = Block::new(
            derive_account_id(&kp.public),
            NetworkId::Dev,
            Timestamp::new(10),
            kind,
        );
        block.chain_after(previous);
        block.balances = balances.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        block.fee = fee;
        block.fee_type = if fee > 0 { FeeType::Regular } else { FeeType::NoFee };
        block.seal(&kp.private).unwrap();
        block
    }

    fn open(balances: &[(&str, u128)]) -> Block {
        sealed(
            BlockKind::OpenWithReceiveTransfer {
                source_hash: BlockHash::new([7; 32]),
            },
            None,
            balances,
            0,
        )
    }

    fn token(ticker: &str) -> TokenGenesis {
        TokenGenesis {
            ticker: ticker.into(),
            domain_name: "acme".into(),
            description: String::new(),
            precision: 0,
            total_supply: 1_000,
            is_final_supply: true,
            is_non_fungible: false,
            non_fungible_key: None,
            renewal_date: None,
            owner: String::new(),
            website: String::new(),
        }
    }

    fn send_kind() -> BlockKind {
        BlockKind::SendTransfer {
            destination_account_id: derive_account_id(&keypair_from_seed(&[2; 32]).public),
        }
    }

    #[test]
    fn well_formed_send_is_valid() {
        let prev = open(&[("LYR", 100)]);
        let send = sealed(send_kind(), Some(&prev), &[("LYR", 69)], 1);
        assert!(send.is_block_valid(Some(&prev)));
    }

    #[test]
    fn tampered_hash_is_invalid() {
        let prev = open(&[("LYR", 100)]);
        let mut send = sealed(send_kind(), Some(&prev), &[("LYR", 69)], 1);
        send.balances.insert("LYR".into(), 99);
        assert!(!send.is_block_valid(Some(&prev)));
    }

    #[test]
    fn wrong_link_is_invalid() {
        let prev = open(&[("LYR", 100)]);
        let other = open(&[("LYR", 50)]);
        let send = sealed(send_kind(), Some(&prev), &[("LYR", 69)], 1);
        assert!(!send.is_block_valid(Some(&other)));
    }

    #[test]
    fn send_cannot_increase_a_balance() {
        let prev = open(&[("LYR", 100)]);
        let send = sealed(send_kind(), Some(&prev), &[("LYR", 150)], 1);
        assert!(!send.is_block_valid(Some(&prev)));
    }

    #[test]
    fn foreign_send_pays_exactly_the_fee() {
        let prev = open(&[("LYR", 100), ("acme/gold", 50)]);
        let ok = sealed(send_kind(), Some(&prev), &[("LYR", 99), ("acme/gold", 30)], 1);
        assert!(ok.is_block_valid(Some(&prev)));

        let skimmed = sealed(send_kind(), Some(&prev), &[("LYR", 90), ("acme/gold", 30)], 1);
        assert!(!skimmed.is_block_valid(Some(&prev)));
    }

    #[test]
    fn token_genesis_must_pay_its_fee() {
        let prev = open(&[("LYR", 100)]);
        let unpaid = sealed(
            BlockKind::TokenGenesis(token("acme/gold")),
            Some(&prev),
            &[("LYR", 100), ("acme/gold", 1_000)],
            10,
        );
        assert!(!unpaid.is_block_valid(Some(&prev)));
    }

    #[test]
    fn unaffordable_fee_leaves_native_untouched() {
        let prev = open(&[("acme/gold", 50)]);
        let send = sealed(send_kind(), Some(&prev), &[("acme/gold", 30)], 1);
        assert!(send.is_block_valid(Some(&prev)));
    }

    #[test]
    fn send_of_two_foreign_tokens_is_invalid() {
        let prev = open(&[("LYR", 100), ("a/x", 5), ("b/y", 5)]);
        let send = sealed(send_kind(), Some(&prev), &[("LYR", 99), ("a/x", 4), ("b/y", 4)], 1);
        assert!(!send.is_block_valid(Some(&prev)));
    }

    #[test]
    fn receive_cannot_decrease_a_balance() {
        let prev = open(&[("LYR", 100)]);
        let kind = BlockKind::ReceiveTransfer {
            source_hash: BlockHash::new([8; 32]),
        };
        let shrink = sealed(kind.clone(), Some(&prev), &[("LYR", 90)], 0);
        assert!(!shrink.is_block_valid(Some(&prev)));
        let grow = sealed(kind, Some(&prev), &[("LYR", 110)], 0);
        assert!(grow.is_block_valid(Some(&prev)));
    }

    #[test]
    fn dropped_token_is_left_to_carry_forward_check() {
        let prev = open(&[("LYR", 100), ("acme/gold", 50)]);
        let send = sealed(send_kind(), Some(&prev), &[("LYR", 69)], 1);
        assert!(send.is_block_valid(Some(&prev)));
        assert!(!send.carries_forward_balances(&prev));
    }

    #[test]
    fn token_genesis_mints_new_ticker_and_pays_fee() {
        let prev = open(&[("LYR", 100)]);
        let genesis = sealed(
            BlockKind::TokenGenesis(token("acme/gold")),
            Some(&prev),
            &[("LYR", 90), ("acme/gold", 1_000)],
            10,
        );
        assert!(genesis.is_block_valid(Some(&prev)));
    }

    #[test]
    fn fee_must_be_native() {
        let prev = open(&[("LYR", 100)]);
        let kp = owner();
        let mut send = sealed(send_kind(), Some(&prev), &[("LYR", 69)], 1);
        send.fee_code = "acme/gold".into();
        send.seal(&kp.private).unwrap();
        assert!(!send.is_block_valid(Some(&prev)));
    }

    #[test]
    fn service_block_checks_only_integrity() {
        let service = sealed(
            BlockKind::Service(ServiceParams {
                transfer_fee: 1,
                token_generation_fee: 10,
                trade_fee: 1,
                authorizers: vec![AccountId::new("lat_node")],
            }),
            None,
            &[],
            0,
        );
        assert!(service.is_block_valid(None));
    }
}
