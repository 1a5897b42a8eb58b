//! Balance port.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::id::TokenId;
use crate::error::Error;

/// Spendable balances of the trading account.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Dollar collateral available for BUY orders.
    async fn collateral(&self) -> Result<Decimal, Error>;

    /// Outcome-token shares held for `token_id`.
    async fn position(&self, token_id: &TokenId) -> Result<Decimal, Error>;
}
