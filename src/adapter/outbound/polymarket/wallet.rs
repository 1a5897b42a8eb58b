//! On-chain balances for the trading account.
//!
//! Collateral is USDC.e (ERC-20); outcome-token positions are ERC-1155
//! balances on the Conditional Tokens contract. Both use 6 decimals.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_provider::ProviderBuilder;
use alloy_sol_types::sol;
use async_trait::async_trait;
use polymarket_client_sdk::auth::Signer as _;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::executor::signer_from_credentials;
use super::settings::TradingCredentials;
use crate::domain::id::TokenId;
use crate::error::{ConfigError, Error, ExecutionError, Result};
use crate::port::outbound::wallet::BalanceSource;

/// Bridged USDC (USDC.e) on Polygon, the exchange's collateral.
const USDC_E: &str = "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174";

/// Conditional Tokens Framework contract holding outcome shares.
const CONDITIONAL_TOKENS: &str = "0x4D97DCd97eC945f40cF65F87097ACe5EA0476045";

/// Decimals for both collateral and outcome tokens.
const TOKEN_DECIMALS: u32 = 6;

sol! {
    #[sol(rpc)]
    contract IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }

    #[sol(rpc)]
    contract IERC1155 {
        function balanceOf(address account, uint256 id) external view returns (uint256);
    }
}

/// Balance reader for the funder (or signer) address.
pub struct ChainWallet {
    rpc_url: url::Url,
    owner: Address,
}

fn parse_address(field: &'static str, raw: &str) -> Result<Address> {
    Address::from_str(raw.trim()).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Raw 6-decimal token units as a decimal balance.
fn from_units(units: U256) -> Result<Decimal> {
    let out_of_range = || ExecutionError::BalanceQuery(format!("balance {units} out of range"));
    let raw = i128::try_from(units).map_err(|_| out_of_range())?;
    Decimal::try_from_i128_with_scale(raw, TOKEN_DECIMALS).map_err(|_| out_of_range().into())
}

impl ChainWallet {
    /// Resolve the owner address: `FUNDER_ADDRESS` when set, else the signer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a bad RPC URL, funder address or key.
    pub fn new(credentials: &TradingCredentials) -> Result<Self> {
        let rpc_url: url::Url = credentials
            .polygon_rpc
            .parse()
            .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                field: "polygon_rpc",
                reason: e.to_string(),
            })?;

        let owner = match credentials.funder_address.as_deref() {
            Some(funder) if !funder.trim().is_empty() => parse_address("FUNDER_ADDRESS", funder)?,
            _ => signer_from_credentials(credentials)?.address(),
        };

        info!(owner = %owner, "Balance owner resolved");
        Ok(Self { rpc_url, owner })
    }

    /// Address whose balances are read.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }
}

#[async_trait]
impl BalanceSource for ChainWallet {
    async fn collateral(&self) -> std::result::Result<Decimal, Error> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let usdc = IERC20::new(parse_address("usdc_address", USDC_E)?, &provider);

        let balance: U256 = usdc.balanceOf(self.owner).call().await.map_err(|e| {
            ExecutionError::BalanceQuery(format!("Failed to get collateral balance: {e}"))
        })?;

        let balance = from_units(balance)?;
        debug!(owner = %self.owner, %balance, "Collateral balance");
        Ok(balance)
    }

    async fn position(&self, token_id: &TokenId) -> std::result::Result<Decimal, Error> {
        let id = U256::from_str(token_id.as_str()).map_err(|e| ExecutionError::InvalidTokenId {
            token_id: token_id.to_string(),
            reason: e.to_string(),
        })?;

        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let ctf = IERC1155::new(parse_address("ctf_address", CONDITIONAL_TOKENS)?, &provider);

        let balance: U256 = ctf.balanceOf(self.owner, id).call().await.map_err(|e| {
            ExecutionError::BalanceQuery(format!("Failed to get position balance: {e}"))
        })?;

        let balance = from_units(balance)?;
        debug!(owner = %self.owner, token_id = %token_id, %balance, "Position balance");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn units_scale_by_six_decimals() {
        assert_eq!(from_units(U256::from(12_345_678u64)).unwrap(), dec!(12.345678));
        assert_eq!(from_units(U256::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn oversized_balance_is_an_error() {
        assert!(matches!(
            from_units(U256::MAX),
            Err(Error::Execution(ExecutionError::BalanceQuery(_)))
        ));
        assert!(from_units(U256::from(u128::MAX)).is_err());
    }

    #[test]
    fn contract_addresses_parse() {
        assert!(parse_address("usdc_address", USDC_E).is_ok());
        assert!(parse_address("ctf_address", CONDITIONAL_TOKENS).is_ok());
        assert!(parse_address("funder", "not-an-address").is_err());
    }
}
