//! Account configuration for signing orders and reading balances.

use serde::Deserialize;

use crate::adapter::outbound::polymarket::settings::SignatureKind;

/// Account configuration.
/// Private key is loaded from `PRIVATE_KEY` env var at runtime (never from config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Address holding the funds (proxy wallet or Safe). Falls back to the
    /// signer address when unset.
    #[serde(default)]
    pub funder_address: Option<String>,
    #[serde(default)]
    pub signature_type: SignatureKind,
    /// Private key loaded from `PRIVATE_KEY` env var at runtime
    #[serde(skip)]
    pub private_key: Option<String>,
}
