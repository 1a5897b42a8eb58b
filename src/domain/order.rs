//! Order requests, exchange payloads, open orders and cancellation reports.
//!
//! An [`OrderRequest`] moves through `Preflight -> Constructed -> Submitted`
//! and ends either confirmed or rejected. The size semantics depend on the
//! order type: MARKET orders are sized in dollars, LIMIT orders in shares,
//! and [`OrderKind`] carries the right type for each.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ValidationError;
use super::id::{ConditionId, OrderId, TokenId};
use super::money::{DollarAmount, Price, ShareCount};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Immediate execution, sized in dollars.
    Market,
    /// Resting order at a price, sized in shares.
    Limit,
}

/// How long an order may live on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeInForce {
    /// Fill in full immediately or cancel in full.
    #[serde(rename = "FOK")]
    FillOrKill,
    /// Rest until filled or cancelled.
    #[serde(rename = "GTC")]
    GoodTillCancelled,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FillOrKill => f.write_str("FOK"),
            Self::GoodTillCancelled => f.write_str("GTC"),
        }
    }
}

/// Minimum price increment accepted by a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TickSize {
    #[serde(rename = "0.1")]
    Tenth,
    #[default]
    #[serde(rename = "0.01")]
    Hundredth,
    #[serde(rename = "0.001")]
    Thousandth,
    #[serde(rename = "0.0001")]
    TenThousandth,
}

impl TickSize {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tenth => "0.1",
            Self::Hundredth => "0.01",
            Self::Thousandth => "0.001",
            Self::TenThousandth => "0.0001",
        }
    }

    /// Tick size as a decimal.
    #[must_use]
    pub fn value(self) -> Decimal {
        match self {
            Self::Tenth => Decimal::new(1, 1),
            Self::Hundredth => Decimal::new(1, 2),
            Self::Thousandth => Decimal::new(1, 3),
            Self::TenThousandth => Decimal::new(1, 4),
        }
    }

    /// Map a decimal tick size (as reported by the metadata service).
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value.normalize().to_string().parse().ok()
    }

    /// Check that `price` sits on the tick grid within `[tick, 1 - tick]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PriceOffTick`] otherwise.
    pub fn check(self, price: Price) -> Result<(), ValidationError> {
        let tick = self.value();
        let on_grid = (price % tick).is_zero();
        if !on_grid || price < tick || price > Decimal::ONE - tick {
            return Err(ValidationError::PriceOffTick { price, tick });
        }
        Ok(())
    }
}

impl FromStr for TickSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0.1" => Ok(Self::Tenth),
            "0.01" => Ok(Self::Hundredth),
            "0.001" => Ok(Self::Thousandth),
            "0.0001" => Ok(Self::TenThousandth),
            other => Err(ValidationError::UnsupportedTickSize {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TickSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-dependent sizing of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Spend (BUY) or receive (SELL) this many dollars, fill-or-kill.
    Market { amount: DollarAmount },
    /// Rest `shares` on the book at the request price, good-till-cancelled.
    Limit {
        shares: ShareCount,
        tick_size: TickSize,
        neg_risk: bool,
    },
}

/// Which balance an order draws on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BalanceAsset {
    /// Dollar collateral (BUY orders).
    Collateral,
    /// Outcome-token shares held for a token (SELL orders).
    Position(TokenId),
}

impl fmt::Display for BalanceAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collateral => f.write_str("collateral"),
            Self::Position(token) => write!(f, "position in {token}"),
        }
    }
}

/// Funds an order needs before it may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub asset: BalanceAsset,
    pub amount: Decimal,
}

/// A validated order, ready for preflight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    token_id: TokenId,
    side: Side,
    price: Price,
    kind: OrderKind,
}

impl OrderRequest {
    /// Build a request from raw command-line values.
    ///
    /// This is the one place a bare `size` is given meaning: dollars for
    /// [`OrderType::Market`], shares for [`OrderType::Limit`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the price is outside (0, 1), the
    /// size is not positive, or a limit price is off the tick grid.
    pub fn new(
        token_id: TokenId,
        side: Side,
        price: Price,
        order_type: OrderType,
        size: Decimal,
        tick_size: TickSize,
        neg_risk: bool,
    ) -> Result<Self, ValidationError> {
        if price <= Decimal::ZERO || price >= Decimal::ONE {
            return Err(ValidationError::PriceOutOfRange { price });
        }

        let kind = match order_type {
            OrderType::Market => OrderKind::Market {
                amount: DollarAmount::try_new(size)?,
            },
            OrderType::Limit => {
                tick_size.check(price)?;
                OrderKind::Limit {
                    shares: ShareCount::try_new(size)?,
                    tick_size,
                    neg_risk,
                }
            }
        };

        Ok(Self {
            token_id,
            side,
            price,
            kind,
        })
    }

    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn kind(&self) -> &OrderKind {
        &self.kind
    }

    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        match self.kind {
            OrderKind::Market { .. } => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
        }
    }

    /// Dollar value of the order: the amount for MARKET, `price * shares` for LIMIT.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        match self.kind {
            OrderKind::Market { amount } => amount.value(),
            OrderKind::Limit { shares, .. } => shares.notional_at(self.price),
        }
    }

    /// Balance this order must be covered by.
    ///
    /// BUY orders draw collateral equal to [`Self::notional`]. SELL orders
    /// draw outcome shares: the share count for LIMIT, `amount / price`
    /// truncated to two decimals for MARKET (the quantity actually sold).
    #[must_use]
    pub fn requirement(&self) -> Requirement {
        match self.side {
            Side::Buy => Requirement {
                asset: BalanceAsset::Collateral,
                amount: self.notional(),
            },
            Side::Sell => Requirement {
                asset: BalanceAsset::Position(self.token_id.clone()),
                amount: self.shares_to_sell(),
            },
        }
    }

    fn shares_to_sell(&self) -> Decimal {
        match self.kind {
            OrderKind::Market { amount } => amount
                .shares_at(self.price)
                .map_or(Decimal::ZERO, ShareCount::value),
            OrderKind::Limit { shares, .. } => shares.value(),
        }
    }

    /// Build the exchange payload.
    #[must_use]
    pub fn payload(&self) -> OrderPayload {
        match self.kind {
            OrderKind::Market { amount } => OrderPayload::Market {
                side: self.side,
                token_id: self.token_id.clone(),
                amount,
                price: self.price,
            },
            OrderKind::Limit {
                shares,
                tick_size,
                neg_risk,
            } => OrderPayload::Limit {
                token_id: self.token_id.clone(),
                price: self.price,
                shares,
                side: self.side,
                tick_size,
                neg_risk,
            },
        }
    }
}

/// Order as handed to the trading client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OrderPayload {
    /// Fill-or-kill order for a dollar amount.
    Market {
        side: Side,
        token_id: TokenId,
        amount: DollarAmount,
        /// Reference price the amount was sized against.
        price: Price,
    },
    /// Good-till-cancelled order for a share count.
    Limit {
        token_id: TokenId,
        price: Price,
        shares: ShareCount,
        side: Side,
        tick_size: TickSize,
        neg_risk: bool,
    },
}

impl OrderPayload {
    #[must_use]
    pub const fn time_in_force(&self) -> TimeInForce {
        match self {
            Self::Market { .. } => TimeInForce::FillOrKill,
            Self::Limit { .. } => TimeInForce::GoodTillCancelled,
        }
    }

    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        match self {
            Self::Market { token_id, .. } | Self::Limit { token_id, .. } => token_id,
        }
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        match self {
            Self::Market { side, .. } | Self::Limit { side, .. } => *side,
        }
    }
}

/// Raw reply from the exchange to an order submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitResponse {
    pub order_id: Option<OrderId>,
    pub status: Option<String>,
    pub error_msg: Option<String>,
}

/// Final state of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum DispatchOutcome {
    /// Accepted by the exchange.
    Confirmed {
        order_id: OrderId,
        status: Option<String>,
    },
    /// Refused by the exchange; the reason is reported verbatim.
    Rejected {
        reason: String,
        status: Option<String>,
    },
}

impl From<SubmitResponse> for DispatchOutcome {
    fn from(response: SubmitResponse) -> Self {
        let error = response.error_msg.filter(|msg| !msg.trim().is_empty());
        match (response.order_id, error) {
            (Some(order_id), None) if !order_id.as_str().is_empty() => Self::Confirmed {
                order_id,
                status: response.status,
            },
            (_, Some(reason)) => Self::Rejected {
                reason,
                status: response.status,
            },
            _ => Self::Rejected {
                reason: "exchange returned no order id".to_string(),
                status: response.status,
            },
        }
    }
}

/// A resting order as listed by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenOrder {
    pub id: OrderId,
    /// Side as reported (`BUY` / `SELL`).
    pub side: String,
    pub order_type: Option<String>,
    pub price: Decimal,
    pub original_size: Decimal,
    pub size_matched: Decimal,
    pub asset_id: TokenId,
    /// Condition ID of the market.
    pub market: String,
    pub status: String,
    /// Unix seconds.
    pub created_at: Option<i64>,
}

impl OpenOrder {
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side.eq_ignore_ascii_case("buy")
    }

    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.side.eq_ignore_ascii_case("sell")
    }
}

/// Filter for open-order listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub asset_id: Option<TokenId>,
    pub market: Option<ConditionId>,
}

impl OrderFilter {
    #[must_use]
    pub fn asset(token_id: TokenId) -> Self {
        Self {
            asset_id: Some(token_id),
            market: None,
        }
    }

    #[must_use]
    pub fn market(market: ConditionId) -> Self {
        Self {
            asset_id: None,
            market: Some(market),
        }
    }

    #[must_use]
    pub fn matches(&self, order: &OpenOrder) -> bool {
        let asset_ok = self
            .asset_id
            .as_ref()
            .map_or(true, |asset| *asset == order.asset_id);
        let market_ok = self
            .market
            .as_ref()
            .map_or(true, |market| market.as_str().eq_ignore_ascii_case(&order.market));
        asset_ok && market_ok
    }
}

/// An order the exchange refused to cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotCanceled {
    pub order_id: OrderId,
    pub reason: String,
}

/// A market whose cancel request failed outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketCancelFailure {
    pub market: ConditionId,
    pub reason: String,
}

/// Outcome of a cancellation request.
///
/// A non-empty `not_canceled` or `failed_markets` set is a partial success,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CancelReport {
    pub canceled: Vec<OrderId>,
    pub not_canceled: Vec<NotCanceled>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_markets: Vec<MarketCancelFailure>,
}

impl CancelReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.canceled.extend(other.canceled);
        self.not_canceled.extend(other.not_canceled);
        self.failed_markets.extend(other.failed_markets);
    }

    /// True when nothing was cancelled and nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canceled.is_empty() && self.not_canceled.is_empty() && self.failed_markets.is_empty()
    }

    /// True when at least one order or market could not be cancelled.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.not_canceled.is_empty() || !self.failed_markets.is_empty()
    }
}
