//! Exchange price and book port.

use async_trait::async_trait;

use crate::domain::{
    book::Book,
    id::TokenId,
    money::Price,
    order::Side,
    price::{HistoryQuery, PricePoint},
};
use crate::error::Error;

/// Public, unauthenticated price data for tokens.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Instant price to trade on `side`.
    ///
    /// `Side::Buy` returns the best bid, `Side::Sell` the best ask: the side
    /// names the resting orders the price is read from.
    async fn price(&self, token_id: &TokenId, side: Side) -> Result<Price, Error>;

    /// Midpoint of best bid and best ask.
    async fn midpoint(&self, token_id: &TokenId) -> Result<Price, Error>;

    /// Historical series, oldest first.
    async fn history(&self, query: &HistoryQuery) -> Result<Vec<PricePoint>, Error>;

    /// Raw order book snapshot. No ordering is promised.
    async fn order_book(&self, token_id: &TokenId) -> Result<Book, Error>;
}
