//! Polymarket endpoint, HTTP and account settings.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Service endpoints and chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// CLOB API base URL (prices, books, order execution).
    #[serde(default = "default_clob_url")]
    pub clob_url: String,
    /// Gamma API base URL (events, markets, tags, search).
    #[serde(default = "default_gamma_url")]
    pub gamma_url: String,
    /// JSON-RPC endpoint for on-chain balance reads.
    #[serde(default = "default_polygon_rpc")]
    pub polygon_rpc: String,
    /// Chain ID used when signing.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
}

fn default_clob_url() -> String {
    "https://clob.polymarket.com".into()
}

fn default_gamma_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

fn default_polygon_rpc() -> String {
    "https://polygon-rpc.com".into()
}

const fn default_chain_id() -> u64 {
    137
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            clob_url: default_clob_url(),
            gamma_url: default_gamma_url(),
            polygon_rpc: default_polygon_rpc(),
            chain_id: default_chain_id(),
        }
    }
}

/// Shared HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
        }
    }
}

/// How orders are signed relative to the funding address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureKind {
    /// The signer key owns the funds directly.
    Eoa,
    /// Funds sit in a Polymarket proxy wallet (email/magic login).
    Proxy,
    /// Funds sit in a Gnosis Safe controlled by the signer.
    #[default]
    GnosisSafe,
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eoa => write!(f, "eoa"),
            Self::Proxy => write!(f, "proxy"),
            Self::GnosisSafe => write!(f, "gnosis-safe"),
        }
    }
}

impl FromStr for SignatureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eoa" | "0" => Ok(Self::Eoa),
            "proxy" | "poly-proxy" | "1" => Ok(Self::Proxy),
            "gnosis-safe" | "safe" | "2" => Ok(Self::GnosisSafe),
            other => Err(format!(
                "unknown signature type '{other}' (expected eoa, proxy or gnosis-safe)"
            )),
        }
    }
}

/// Everything the authenticated trading adapters need.
///
/// Assembled at startup from config plus `PRIVATE_KEY`; never deserialized.
#[derive(Clone)]
pub struct TradingCredentials {
    pub private_key: String,
    pub funder_address: Option<String>,
    pub signature_kind: SignatureKind,
    pub chain_id: u64,
    pub clob_url: String,
    pub polygon_rpc: String,
}

impl fmt::Debug for TradingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingCredentials")
            .field("private_key", &"<redacted>")
            .field("funder_address", &self.funder_address)
            .field("signature_kind", &self.signature_kind)
            .field("chain_id", &self.chain_id)
            .field("clob_url", &self.clob_url)
            .field("polygon_rpc", &self.polygon_rpc)
            .finish()
    }
}
