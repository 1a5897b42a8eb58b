//! Open-order inspection across one or many tokens.

use futures_util::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use crate::domain::{
    id::TokenId,
    order::{OpenOrder, OrderFilter},
};
use crate::error::Result;
use crate::port::outbound::trading::TradingClient;

/// Open orders for each token, queried concurrently.
///
/// Results are concatenated in the order of `tokens`, regardless of which
/// request finishes first.
///
/// # Errors
///
/// Fails if any single query fails.
pub async fn open_orders_for_tokens(
    trader: &dyn TradingClient,
    tokens: &[TokenId],
) -> Result<Vec<OpenOrder>> {
    let filters: Vec<OrderFilter> = tokens.iter().cloned().map(OrderFilter::asset).collect();
    let pages = try_join_all(filters.iter().map(|filter| trader.open_orders(filter))).await?;

    let orders: Vec<OpenOrder> = pages.into_iter().flatten().collect();
    debug!(tokens = tokens.len(), orders = orders.len(), "Fetched open orders");
    Ok(orders)
}

/// BUY/SELL counts of a set of orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub total: usize,
    pub buy: usize,
    pub sell: usize,
}

#[must_use]
pub fn summarize(orders: &[OpenOrder]) -> OrderSummary {
    OrderSummary {
        total: orders.len(),
        buy: orders.iter().filter(|o| o.is_buy()).count(),
        sell: orders.iter().filter(|o| o.is_sell()).count(),
    }
}
