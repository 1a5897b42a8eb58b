//! Point-in-time quotes and historical price series.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::id::TokenId;
use super::money::Price;

/// One sample of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in seconds.
    pub t: i64,
    /// Price as a probability in [0, 1].
    pub p: Price,
}

impl PricePoint {
    #[must_use]
    pub const fn new(t: i64, p: Price) -> Self {
        Self { t, p }
    }
}

/// Instant best ask, best bid and midpoint for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Price to buy immediately.
    pub ask: Price,
    /// Price to sell immediately.
    pub bid: Price,
    pub midpoint: Price,
}

impl Quote {
    /// `ask - bid`.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// Time window for a history request.
///
/// A relative interval and an explicit range are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Relative window such as `1h`, `6h`, `1d`, `1w`, `max`.
    Interval(String),
    /// Explicit `[start, end)` range in unix seconds.
    Range { start: i64, end: i64 },
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::Interval("1d".to_string())
    }
}

impl HistoryWindow {
    /// Build a window from optional CLI inputs.
    ///
    /// No input defaults to a one-day interval.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when only one range bound is given,
    /// when an interval is combined with a range, or when `end <= start`.
    pub fn from_parts(
        interval: Option<String>,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<Self, ValidationError> {
        match (interval, start, end) {
            (Some(_), Some(_), _) => Err(ValidationError::ConflictingArguments {
                first: "interval",
                second: "start",
            }),
            (Some(_), None, Some(_)) => Err(ValidationError::ConflictingArguments {
                first: "interval",
                second: "end",
            }),
            (Some(interval), None, None) => Ok(Self::Interval(interval)),
            (None, Some(start), Some(end)) => {
                if end <= start {
                    return Err(ValidationError::InvalidArgument {
                        name: "end",
                        reason: format!("must be after --start ({start})"),
                    });
                }
                Ok(Self::Range { start, end })
            }
            (None, Some(_), None) => Err(ValidationError::MissingArgument { name: "end" }),
            (None, None, Some(_)) => Err(ValidationError::MissingArgument { name: "start" }),
            (None, None, None) => Ok(Self::default()),
        }
    }
}

/// Parameters for a price-history fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub token_id: TokenId,
    pub window: HistoryWindow,
    /// Sampling granularity in minutes.
    pub fidelity: Option<u32>,
}

/// Open/close/high/low summary of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub points: usize,
    pub first_ts: i64,
    pub last_ts: i64,
    pub open: Price,
    pub close: Price,
    pub high: Price,
    pub low: Price,
    /// `close - open`.
    pub change: Decimal,
    /// `change / open * 100`; absent when `open` is zero.
    pub change_pct: Option<Decimal>,
}
