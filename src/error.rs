use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::error::ValidationError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Trading-adapter errors with structured variants.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("invalid token ID '{token_id}': {reason}")]
    InvalidTokenId { token_id: String, reason: String },

    #[error("failed to build order: {0}")]
    OrderBuildFailed(String),

    #[error("failed to sign order: {0}")]
    SigningFailed(String),

    #[error("invalid condition ID '{market}': {reason}")]
    InvalidConditionId { market: String, reason: String },

    #[error("failed to list open orders: {0}")]
    OrderListFailed(String),

    #[error("failed to cancel order {order_id}: {reason}")]
    CancelFailed { order_id: String, reason: String },

    #[error("failed to cancel orders in market {market}: {reason}")]
    CancelMarketFailed { market: String, reason: String },

    #[error("balance query failed: {0}")]
    BalanceQuery(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("no {kind} found for '{query}'")]
    NotFound { kind: &'static str, query: String },

    #[error(
        "insufficient {asset}: available {available}, required {required} (short by {})",
        required - available
    )]
    InsufficientBalance {
        asset: String,
        available: Decimal,
        required: Decimal,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[cfg(feature = "polymarket")]
    #[error("Polymarket SDK error: {0}")]
    Polymarket(#[from] polymarket_client_sdk::error::Error),
}

impl Error {
    /// Short machine-readable category, used for `--json` error lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Execution(_) => "execution",
            Self::NotFound { .. } => "not_found",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::Upstream { .. } | Self::Http(_) | Self::Json(_) | Self::Url(_) => "upstream",
            Self::Io(_) => "io",
            #[cfg(feature = "polymarket")]
            Self::Polymarket(_) => "execution",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
