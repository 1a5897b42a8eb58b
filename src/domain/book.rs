//! Order book types for market depth representation.
//!
//! This module provides types for representing order book state:
//!
//! - [`PriceLevel`] - A single price level with size
//! - [`Book`] - Raw order book for a single token, as delivered upstream
//! - [`BookAnalysis`] - Sorted sides plus best prices, spread and midpoint
//!
//! # Order Book Structure
//!
//! An order book has two sides:
//! - **Bids**: Buy orders, best (highest) first once sorted
//! - **Asks**: Sell orders, best (lowest) first once sorted
//!
//! The upstream feed makes no ordering promise, so a [`Book`] must go
//! through [`crate::application::book::analyze`] before any best price is
//! read from it.

use rust_decimal::Decimal;
use serde::Serialize;

use super::id::TokenId;
use super::money::{Price, Volume};

/// A single price level in an order book.
///
/// Represents aggregated orders at a specific price point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLevel {
    /// The price at this level.
    price: Price,
    /// Total volume available at this price.
    size: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the total volume available at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }
}

/// Unsorted order book for a single tradeable token.
#[derive(Debug, Clone)]
pub struct Book {
    /// Token ID this book represents.
    token_id: TokenId,
    /// Market (condition) the token belongs to, when reported.
    market: Option<String>,
    /// Bid (buy) levels in upstream order.
    bids: Vec<PriceLevel>,
    /// Ask (sell) levels in upstream order.
    asks: Vec<PriceLevel>,
}

impl Book {
    /// Creates a book from raw levels.
    #[must_use]
    pub const fn with_levels(
        token_id: TokenId,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
    ) -> Self {
        Self {
            token_id,
            market: None,
            bids,
            asks,
        }
    }

    /// Attach the market (condition) identifier.
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Returns the token ID for this book.
    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    /// Returns the market identifier, if reported.
    #[must_use]
    pub fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    /// Returns bid levels in upstream order.
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    /// Returns ask levels in upstream order.
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }
}

/// Sorted book with derived statistics.
///
/// `spread` and `midpoint` are present only when both sides are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookAnalysis {
    /// Bids sorted by price descending.
    pub sorted_bids: Vec<PriceLevel>,
    /// Asks sorted by price ascending.
    pub sorted_asks: Vec<PriceLevel>,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// `best_ask - best_bid`; negative when the book is crossed.
    pub spread: Option<Decimal>,
    pub midpoint: Option<Price>,
    /// Sum of bid sizes.
    pub bid_depth: Volume,
    /// Sum of ask sizes.
    pub ask_depth: Volume,
}

impl BookAnalysis {
    /// True when the best bid exceeds the best ask.
    ///
    /// Values are reported as-is; a crossed book is usually transient.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid, self.best_ask), (Some(bid), Some(ask)) if bid > ask)
    }
}
