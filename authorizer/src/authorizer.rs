//! Authorization pipeline: validate, endorse, commit.
//!
//! A submitted block moves through `Received → Validated → Signed`, or
//! stops at `Rejected(code)`. Nothing of that is persisted; only `commit`
//! writes, and it does not re-validate.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use lattice_crypto::public_key_of;
use lattice_ledger::{AuthorizationSignature, Block, BlockType};
use lattice_store::{AccountCollection, StoreError, UniqueKey};
use lattice_types::Clock;

use crate::chain::{find_previous, verify_block, verify_transaction_block, ValidationContext};
use crate::result::check;
use crate::rules::rules_for;
use crate::{AuthorizerConfig, AuthorizerError, AuthorizerMetrics, ResultCode, ServiceAccount};

/// Where a block stands in the pipeline. Used as a log field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationStage {
    Received,
    Validated,
    Signed,
    Committed,
    Rejected,
}

impl AuthorizationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Signed => "signed",
            Self::Committed => "committed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AuthorizationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of [`Authorizer::authorize`]. `signature` is present exactly
/// when `code` is `Success`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizeOutcome {
    pub code: ResultCode,
    pub signature: Option<AuthorizationSignature>,
}

impl AuthorizeOutcome {
    fn rejected(code: ResultCode) -> Self {
        Self {
            code,
            signature: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    pub fn into_parts(self) -> (ResultCode, Option<AuthorizationSignature>) {
        (self.code, self.signature)
    }
}

/// Validates and endorses blocks for one network, and hands committed
/// blocks to storage.
///
/// Stateless across calls apart from the shared [`ServiceAccount`] and the
/// store, so one instance can serve concurrent callers.
pub struct Authorizer<S: AccountCollection> {
    config: AuthorizerConfig,
    service_account: Arc<ServiceAccount>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    metrics: AuthorizerMetrics,
}

impl<S: AccountCollection> Authorizer<S> {
    pub fn new(
        config: AuthorizerConfig,
        service_account: Arc<ServiceAccount>,
        store: Arc<S>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthorizerError> {
        config.validate()?;
        Ok(Self {
            config,
            service_account,
            store,
            clock,
            metrics: AuthorizerMetrics::new(),
        })
    }

    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    pub fn service_account(&self) -> &ServiceAccount {
        &self.service_account
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn metrics(&self) -> &AuthorizerMetrics {
        &self.metrics
    }

    /// Validate `block` and, if it passes, endorse it.
    ///
    /// On success `service_hash` is set to the current service block and the
    /// endorsement is appended to `block.authorizations`. A rejected block
    /// is left untouched. `Err` means an infrastructure fault, not a verdict.
    pub fn authorize(&self, block: &mut Block) -> Result<AuthorizeOutcome, AuthorizerError> {
        let started = Instant::now();
        // One snapshot for the whole call, so the endorsement names the fee
        // schedule the block was checked against.
        let service = self.service_account.latest_service_block();
        tracing::debug!(
            account = %block.account_id,
            index = block.index,
            hash = %block.hash,
            kind = ?block.block_type(),
            stage = %AuthorizationStage::Received,
            "authorizing block"
        );

        let code = self.validate_against(block, &service)?;
        self.metrics
            .authorize_time_ms
            .observe(started.elapsed().as_secs_f64() * 1000.0);

        if !code.is_success() {
            self.metrics.blocks_rejected.inc();
            tracing::warn!(
                account = %block.account_id,
                index = block.index,
                hash = %block.hash,
                code = %code,
                stage = %AuthorizationStage::Rejected,
                "block rejected"
            );
            return Ok(AuthorizeOutcome::rejected(code));
        }
        tracing::debug!(
            account = %block.account_id,
            hash = %block.hash,
            stage = %AuthorizationStage::Validated,
            "block validated"
        );

        let signature = self.sign(block, &service);
        block.authorizations.push(signature.clone());
        self.metrics.blocks_authorized.inc();
        tracing::debug!(
            account = %block.account_id,
            hash = %block.hash,
            service_hash = %block.service_hash,
            stage = %AuthorizationStage::Signed,
            "block endorsed"
        );

        Ok(AuthorizeOutcome {
            code: ResultCode::Success,
            signature: Some(signature),
        })
    }

    /// Run every check that applies to the block's kind, first failure wins.
    pub fn validate(&self, block: &Block) -> Result<ResultCode, AuthorizerError> {
        self.validate_against(block, &self.service_account.latest_service_block())
    }

    /// [`validate`](Self::validate) under the fee schedule of `service`.
    fn validate_against(
        &self,
        block: &Block,
        service: &Block,
    ) -> Result<ResultCode, AuthorizerError> {
        let Some(rules) = rules_for(block.block_type()) else {
            return Ok(ResultCode::UnsupportedBlockType);
        };
        let params = service
            .service_params()
            .ok_or(AuthorizerError::NoServiceBlock)?;
        let ctx = ValidationContext {
            store: self.store.as_ref(),
            params,
            clock: self.clock.as_ref(),
            network: self.config.network,
        };
        let previous = find_previous(ctx.store, block)?;

        check!(verify_block(&ctx, block, previous.as_ref())?);
        if block.kind.has_transaction() {
            check!(verify_transaction_block(&ctx, block, previous.as_ref())?);
            check!(rules.validate_fee(block, params));
            check!(rules.validate_transaction(&ctx, block, previous.as_ref())?);
        }
        Ok(ResultCode::Success)
    }

    /// Persist a block that was previously authorized.
    ///
    /// Unset `index`/`u_index` never reach storage. A uniqueness conflict is
    /// a definitive rejection; the caller must not retry under a new index.
    pub fn commit(&self, block: &Block) -> Result<ResultCode, AuthorizerError> {
        if block.index == 0 || block.u_index == 0 {
            self.metrics.blocks_rejected.inc();
            tracing::warn!(
                account = %block.account_id,
                index = block.index,
                u_index = block.u_index,
                stage = %AuthorizationStage::Rejected,
                "commit refused: unset sequence number"
            );
            return Ok(ResultCode::InvalidIndexSequence);
        }

        match self.store.insert_block(block) {
            Ok(()) => {}
            Err(StoreError::Conflict(key)) => {
                let code = match key {
                    UniqueKey::AccountIndex => ResultCode::BlockWithThisIndexAlreadyExists,
                    UniqueKey::Hash => ResultCode::BlockWithThisHashAlreadyExists,
                    UniqueKey::UIndex => ResultCode::BlockWithThisUIndexAlreadyExists,
                };
                self.metrics.commit_conflicts.inc();
                tracing::warn!(
                    account = %block.account_id,
                    index = block.index,
                    u_index = block.u_index,
                    hash = %block.hash,
                    conflict = %key,
                    code = %code,
                    stage = %AuthorizationStage::Rejected,
                    "commit conflict"
                );
                return Ok(code);
            }
            Err(e) => return Err(e.into()),
        }

        self.metrics.blocks_committed.inc();
        if block.block_type() == BlockType::Service
            && self.service_account.replace_service_block(block.clone())
        {
            tracing::info!(hash = %block.hash, "service block replaced");
        }
        tracing::info!(
            account = %block.account_id,
            index = block.index,
            u_index = block.u_index,
            hash = %block.hash,
            stage = %AuthorizationStage::Committed,
            "block committed"
        );
        Ok(ResultCode::Success)
    }

    fn sign(&self, block: &mut Block, service: &Block) -> AuthorizationSignature {
        block.service_hash = service.hash;
        AuthorizationSignature {
            key: self.service_account.account_id().clone(),
            signature: self.service_account.sign(
                &block.account_id,
                &block.hash,
                &block.service_hash,
            ),
        }
    }
}

/// Check an endorsement against the block it claims to cover. The signer's
/// key is recovered from `authorization.key`.
pub fn verify_authorization(block: &Block, authorization: &AuthorizationSignature) -> bool {
    public_key_of(&authorization.key).is_some_and(|key| {
        lattice_crypto::verify_authorization(
            &key,
            &block.account_id,
            &block.hash,
            &block.service_hash,
            &authorization.signature,
        )
    })
}
