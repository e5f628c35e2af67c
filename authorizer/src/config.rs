//! Authorizer configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use lattice_types::NetworkId;

use crate::logging::LogFormat;
use crate::AuthorizerError;

/// Configuration for an authorizer node.
///
/// Can be loaded from a TOML file via [`AuthorizerConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizerConfig {
    /// Network whose blocks this node endorses. Blocks for any other
    /// network are rejected with `InvalidNetworkId`.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log filter directive, e.g. `"info"` or `"info,lattice_authorizer=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_network() -> NetworkId {
    NetworkId::Dev
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AuthorizerConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, AuthorizerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AuthorizerError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AuthorizerError> {
        let config: Self = toml::from_str(s).map_err(|e| AuthorizerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, AuthorizerError> {
        toml::to_string_pretty(self).map_err(|e| AuthorizerError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AuthorizerError> {
        self.log_format()?;
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            AuthorizerError::Config(format!("invalid log level {:?}: {e}", self.log_level))
        })?;
        Ok(())
    }

    pub fn log_format(&self) -> Result<LogFormat, AuthorizerError> {
        self.log_format.parse()
    }
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
