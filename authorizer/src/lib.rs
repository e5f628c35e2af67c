//! Block authorization engine.
//!
//! Validates a proposed block against its account chain, the network fee
//! schedule and the non-fungible transfer rules, produces this node's
//! endorsement, and commits authorized blocks through an
//! [`AccountCollection`](lattice_store::AccountCollection).

pub mod authorizer;
mod chain;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
mod non_fungible;
pub mod result;
pub mod rules;
pub mod service_account;

pub use authorizer::{verify_authorization, AuthorizationStage, AuthorizeOutcome, Authorizer};
pub use chain::ValidationContext;
pub use config::AuthorizerConfig;
pub use error::AuthorizerError;
pub use logging::{init_logging, LogFormat};
pub use metrics::AuthorizerMetrics;
pub use result::ResultCode;
pub use service_account::ServiceAccount;
