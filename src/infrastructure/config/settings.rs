//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration comes from an optional TOML file with environment variable
//! overrides for endpoints and the funder address. The private key is only
//! ever read from `PRIVATE_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use pmctl::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::logging::LoggingConfig;
use super::wallet::WalletConfig;
use crate::adapter::outbound::polymarket::settings::{HttpConfig, NetworkConfig, TradingCredentials};
use crate::error::{ConfigError, Result};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "pmctl.toml";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Service endpoints and chain.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Shared HTTP client timeouts.
    #[serde(default)]
    pub http: HttpConfig,

    /// Account used for trading and balance reads.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Does not consult the environment; see [`Config::apply_env`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or a validation
    /// error for empty URLs or zero timeouts.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration and apply environment overrides.
    ///
    /// With `None`, reads [`DEFAULT_CONFIG_PATH`] if it exists and falls
    /// back to defaults otherwise. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing explicit file, or
    /// any read, parse or validation error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::read(path)?
            }
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::read(default)?
                } else {
                    debug!(path = DEFAULT_CONFIG_PATH, "No config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        debug!(path = %path.display(), "Loaded config file");
        Self::parse_toml(&content)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("PRIVATE_KEY") {
            self.wallet.private_key = Some(key);
        }
        if let Some(funder) = var("FUNDER_ADDRESS") {
            self.wallet.funder_address = Some(funder);
        }
        if let Some(rpc) = var("POLYGON_RPC") {
            self.network.polygon_rpc = rpc;
        }
        if let Some(host) = var("CLOB_HOST") {
            self.network.clob_url = host;
        }
        if let Some(host) = var("GAMMA_API_HOST") {
            self.network.gamma_url = host;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty endpoint URL or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("clob_url", &self.network.clob_url),
            ("gamma_url", &self.network.gamma_url),
            ("polygon_rpc", &self.network.polygon_rpc),
        ];
        for (field, value) in urls {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }

        if self.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self, verbosity: u8) {
        self.logging.init(verbosity);
    }

    /// Credentials for the authenticated trading adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `PRIVATE_KEY` is not set.
    pub fn trading_credentials(&self) -> Result<TradingCredentials> {
        let private_key = self
            .wallet
            .private_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                field: "PRIVATE_KEY",
            })?;

        Ok(TradingCredentials {
            private_key,
            funder_address: self.wallet.funder_address.clone(),
            signature_kind: self.wallet.signature_type,
            chain_id: self.network.chain_id,
            clob_url: self.network.clob_url.clone(),
            polygon_rpc: self.network.polygon_rpc.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::polymarket::settings::SignatureKind;
    use crate::error::Error;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.network, NetworkConfig::default());
        assert_eq!(config.http.timeout_ms, 10_000);
        assert_eq!(config.wallet.signature_type, SignatureKind::GnosisSafe);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn env_overrides_endpoints_and_key() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "PRIVATE_KEY" => Some("0xabc".into()),
            "CLOB_HOST" => Some("http://localhost:8080".into()),
            "FUNDER_ADDRESS" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.network.clob_url, "http://localhost:8080");
        assert_eq!(config.wallet.private_key.as_deref(), Some("0xabc"));
        assert_eq!(config.wallet.funder_address, None);
    }

    #[test]
    fn private_key_in_file_is_ignored() {
        let config = Config::parse_toml("[wallet]\nprivate_key = \"0xdead\"\n").unwrap();
        assert!(config.wallet.private_key.is_none());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::parse_toml("[http]\ntimeout_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn credentials_require_private_key() {
        let config = Config::default();
        assert!(matches!(
            config.trading_credentials(),
            Err(Error::Config(ConfigError::MissingField {
                field: "PRIVATE_KEY"
            }))
        ));
    }
}
