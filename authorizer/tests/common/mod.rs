#![allow(dead_code)]

use std::sync::Arc;

use lattice_authorizer::{Authorizer, AuthorizerConfig, ResultCode, ServiceAccount};
use lattice_crypto::{derive_account_id, keypair_from_seed};
use lattice_ledger::{
    create_native_genesis, create_service_block, Block, BlockKind, FeeType, GenesisConfig,
    NonFungibleToken, ServiceParams, TokenGenesis,
};
use lattice_nullables::{NullClock, NullStore};
use lattice_store::AccountCollection;
use lattice_types::{AccountId, KeyPair, NetworkId, PublicKey, Timestamp, NATIVE_TICKER};

pub const TRANSFER_FEE: u128 = 1;
pub const TOKEN_GENERATION_FEE: u128 = 10;
pub const TRADE_FEE: u128 = 2;
pub const GENESIS_SUPPLY: u128 = 1_000_000;
pub const START_TIME: u64 = 1_000;

pub fn keys(seed: u8) -> KeyPair {
    keypair_from_seed(&[seed; 32])
}

pub fn id(kp: &KeyPair) -> AccountId {
    derive_account_id(&kp.public)
}

pub fn params() -> ServiceParams {
    ServiceParams {
        transfer_fee: TRANSFER_FEE,
        token_generation_fee: TOKEN_GENERATION_FEE,
        trade_fee: TRADE_FEE,
        authorizers: vec![id(&keys(201))],
    }
}

/// A dev-network ledger with a committed service block and a genesis
/// account (seed 1) holding the whole native supply.
pub struct Harness {
    pub store: Arc<NullStore>,
    pub clock: Arc<NullClock>,
    pub service: Arc<ServiceAccount>,
    pub authorizer: Authorizer<NullStore>,
    pub service_owner: KeyPair,
    pub genesis_owner: KeyPair,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(NullStore::new());
        let clock = Arc::new(NullClock::new(START_TIME));
        let service_owner = keys(200);
        let genesis_owner = keys(1);

        let mut service_block =
            create_service_block(NetworkId::Dev, &service_owner, params(), None, Timestamp::new(1))
                .unwrap();
        service_block.u_index = 1;
        store.insert_block(&service_block).unwrap();

        let mut config = GenesisConfig::for_network(NetworkId::Dev);
        config.total_supply = GENESIS_SUPPLY;
        let mut genesis = create_native_genesis(&config, &genesis_owner).unwrap();
        genesis.u_index = 2;
        store.insert_block(&genesis).unwrap();

        let service = Arc::new(ServiceAccount::load(keys(201), store.as_ref()).unwrap());
        let authorizer = Authorizer::new(
            AuthorizerConfig::default(),
            service.clone(),
            store.clone(),
            clock.clone(),
        )
        .unwrap();

        Self {
            store,
            clock,
            service,
            authorizer,
            service_owner,
            genesis_owner,
        }
    }

    pub fn head(&self, account: &AccountId) -> Option<Block> {
        self.store.find_latest_block(account).unwrap()
    }

    pub fn next_u_index(&self) -> u64 {
        self.store.newest_u_index().unwrap() + 1
    }

    /// Unsealed successor of the account's head (or its first block).
    pub fn successor(&self, owner: &KeyPair, kind: BlockKind) -> Block {
        let account = id(owner);
        let head = self.head(&account);
        let mut block = Block::new(account, NetworkId::Dev, self.now(), kind);
        block.chain_after(head.as_ref());
        if let Some(head) = &head {
            block.balances = head.balances.clone();
        }
        block
    }

    pub fn now(&self) -> Timestamp {
        use lattice_types::Clock;
        self.clock.now()
    }

    /// A sealed send of `amount` of `token` paying the network transfer fee.
    pub fn send(&self, from: &KeyPair, to: &AccountId, token: &str, amount: u128) -> Block {
        let mut block = self.successor(
            from,
            BlockKind::SendTransfer {
                destination_account_id: to.clone(),
            },
        );
        debit(&mut block, NATIVE_TICKER, TRANSFER_FEE);
        debit(&mut block, token, amount);
        block.fee = TRANSFER_FEE;
        block.fee_type = FeeType::Regular;
        block.seal(&from.private).unwrap();
        block
    }

    /// A sealed receive (or open) accepting everything `source` sent.
    pub fn receive(&self, owner: &KeyPair, source: &Block) -> Block {
        let account = id(owner);
        let kind = if self.head(&account).is_some() {
            BlockKind::ReceiveTransfer {
                source_hash: source.hash,
            }
        } else {
            BlockKind::OpenWithReceiveTransfer {
                source_hash: source.hash,
            }
        };
        let source_prev = self
            .store
            .find_block_by_account_hash(&source.account_id, &source.previous_hash)
            .unwrap();
        let sent = source.get_transaction(source_prev.as_ref()).unwrap();

        let mut block = self.successor(owner, kind);
        credit(&mut block, &sent.token_code, sent.amount as u128);
        block.non_fungible_token = source.non_fungible_token.clone();
        block.seal(&owner.private).unwrap();
        block
    }

    /// Register `ticker` on `owner`'s chain, minting the full supply.
    pub fn token_genesis(
        &self,
        owner: &KeyPair,
        ticker: &str,
        supply: u128,
        non_fungible_key: Option<PublicKey>,
        renewal_date: Option<Timestamp>,
    ) -> Block {
        let (domain, _) = ticker.split_once('/').unwrap();
        let token = TokenGenesis {
            ticker: ticker.to_string(),
            domain_name: domain.to_string(),
            description: "test token".to_string(),
            precision: 0,
            total_supply: supply,
            is_final_supply: true,
            is_non_fungible: non_fungible_key.is_some(),
            non_fungible_key,
            renewal_date,
            owner: id(owner).to_string(),
            website: String::new(),
        };
        let mut block = self.successor(owner, BlockKind::TokenGenesis(token));
        debit(&mut block, NATIVE_TICKER, TOKEN_GENERATION_FEE);
        credit(&mut block, ticker, supply);
        block.fee = TOKEN_GENERATION_FEE;
        block.fee_type = FeeType::Regular;
        block.seal(&owner.private).unwrap();
        block
    }

    /// Authorize, assign the next `u_index` and commit.
    pub fn submit(&self, block: &mut Block) -> ResultCode {
        let outcome = self.authorizer.authorize(block).unwrap();
        if !outcome.is_success() {
            return outcome.code;
        }
        block.u_index = self.next_u_index();
        self.authorizer.commit(block).unwrap()
    }

    /// Give `account` (seed) an open chain holding `amount` native tokens.
    pub fn fund(&self, owner: &KeyPair, amount: u128) {
        let mut send = self.send(&self.genesis_owner, &id(owner), NATIVE_TICKER, amount);
        assert_eq!(self.submit(&mut send), ResultCode::Success);
        let mut receive = self.receive(owner, &send);
        assert_eq!(self.submit(&mut receive), ResultCode::Success);
    }

    /// Register `ticker` on a funded `owner` chain.
    pub fn issue_token(&self, owner: &KeyPair, ticker: &str, supply: u128, nft_key: Option<PublicKey>) {
        let mut genesis = self.token_genesis(owner, ticker, supply, nft_key, None);
        assert_eq!(self.submit(&mut genesis), ResultCode::Success);
    }

    pub fn nft(&self, issuer: &KeyPair, code: &str, denomination: u128) -> NonFungibleToken {
        NonFungibleToken::issue(&issuer.private, code, denomination, "serial-0001")
    }
}

pub fn debit(block: &mut Block, token: &str, amount: u128) {
    let entry = block.balances.entry(token.to_string()).or_insert(0);
    *entry -= amount;
}

pub fn credit(block: &mut Block, token: &str, amount: u128) {
    *block.balances.entry(token.to_string()).or_insert(0) += amount;
}

/// A sealed send from `owner` chained after an explicit `previous` block,
/// ignoring whatever the account's current head is.
pub fn send_after(
    owner: &KeyPair,
    previous: &Block,
    to: &AccountId,
    amount: u128,
    timestamp: Timestamp,
) -> Block {
    let mut block = Block::new(
        id(owner),
        NetworkId::Dev,
        timestamp,
        BlockKind::SendTransfer {
            destination_account_id: to.clone(),
        },
    );
    block.chain_after(Some(previous));
    block.balances = previous.balances.clone();
    debit(&mut block, NATIVE_TICKER, amount + TRANSFER_FEE);
    block.fee = TRANSFER_FEE;
    block.fee_type = FeeType::Regular;
    block.seal(&owner.private).unwrap();
    block
}
