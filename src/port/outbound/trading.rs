//! Authenticated trading port.
//!
//! Credential derivation happens when the adapter is built. Anything that
//! holds a `TradingClient` already has a usable session.

use async_trait::async_trait;

use crate::domain::{
    id::{ConditionId, OrderId},
    order::{CancelReport, OpenOrder, OrderFilter, OrderPayload, SubmitResponse},
};
use crate::error::Error;

/// Order submission, listing and cancellation.
#[async_trait]
pub trait TradingClient: Send + Sync {
    /// Sign and post an order. Exchange-side rejections come back in the
    /// response, not as `Err`.
    async fn submit(&self, order: &OrderPayload) -> Result<SubmitResponse, Error>;

    /// Resting orders matching `filter`.
    async fn open_orders(&self, filter: &OrderFilter) -> Result<Vec<OpenOrder>, Error>;

    /// Cancel one order.
    async fn cancel_order(&self, order_id: &OrderId) -> Result<CancelReport, Error>;

    /// Cancel every resting order in a market (condition).
    async fn cancel_market_orders(&self, market: &ConditionId) -> Result<CancelReport, Error>;
}
