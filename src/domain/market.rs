//! Events, markets and outcome tokens as read from the metadata service.
//!
//! These are read-only views built fresh per invocation. Optional fields
//! stay optional: absent data is common upstream and must never be
//! defaulted to a value a trader could mistake for the real one.

use rust_decimal::Decimal;
use serde::Serialize;

use super::id::{ConditionId, MarketId, TokenId};

/// One tradable outcome of a market (typically YES or NO).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Outcome label, e.g. "Yes".
    pub outcome: String,
    /// Tradable asset identifier.
    pub token_id: TokenId,
    /// Last known outcome price, when the metadata service reports one.
    pub price: Option<Decimal>,
}

impl Token {
    #[must_use]
    pub fn new(outcome: impl Into<String>, token_id: impl Into<TokenId>) -> Self {
        Self {
            outcome: outcome.into(),
            token_id: token_id.into(),
            price: None,
        }
    }
}

/// Summary of the event a market belongs to (back-reference only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventRef {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub resolution_source: Option<String>,
    pub neg_risk: Option<bool>,
}

/// A binary (or multi-outcome) market inside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Market {
    pub id: MarketId,
    pub condition_id: ConditionId,
    pub question: String,
    pub slug: Option<String>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub accepting_orders: Option<bool>,
    /// Minimum price increment.
    pub tick_size: Option<Decimal>,
    pub min_order_size: Option<Decimal>,
    pub spread: Option<Decimal>,
    pub neg_risk: Option<bool>,
    pub tokens: Vec<Token>,
    pub description: Option<String>,
    pub end_date: Option<String>,
    pub volume: Option<Decimal>,
    pub volume_24hr: Option<Decimal>,
    pub liquidity: Option<Decimal>,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub events: Vec<EventRef>,
}

impl Market {
    /// Create a market with only identity fields set.
    #[must_use]
    pub fn new(
        id: impl Into<MarketId>,
        condition_id: impl Into<ConditionId>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            condition_id: condition_id.into(),
            question: question.into(),
            slug: None,
            active: None,
            closed: None,
            accepting_orders: None,
            tick_size: None,
            min_order_size: None,
            spread: None,
            neg_risk: None,
            tokens: Vec::new(),
            description: None,
            end_date: None,
            volume: None,
            volume_24hr: None,
            liquidity: None,
            best_bid: None,
            best_ask: None,
            events: Vec::new(),
        }
    }

    /// Whether the market can currently take orders.
    ///
    /// Excluded when `closed` is true, or `active` / `accepting_orders` is
    /// explicitly false. Missing flags do not exclude.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.closed != Some(true)
            && self.active != Some(false)
            && self.accepting_orders != Some(false)
    }

    /// Token IDs of this market in outcome order.
    #[must_use]
    pub fn token_ids(&self) -> Vec<TokenId> {
        self.tokens.iter().map(|t| t.token_id.clone()).collect()
    }

    /// String-normalized value of a trading parameter, if present.
    #[must_use]
    pub fn field(&self, field: MarketField) -> Option<String> {
        match field {
            MarketField::TickSize => self.tick_size.map(normalized),
            MarketField::NegRisk => self.neg_risk.map(|v| v.to_string()),
            MarketField::MinOrderSize => self.min_order_size.map(normalized),
            MarketField::Spread => self.spread.map(normalized),
        }
    }
}

fn normalized(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Trading parameters that may be shared across an event's markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketField {
    TickSize,
    NegRisk,
    MinOrderSize,
    Spread,
}

impl MarketField {
    /// All fields, in display order.
    pub const ALL: [Self; 4] = [
        Self::TickSize,
        Self::NegRisk,
        Self::MinOrderSize,
        Self::Spread,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TickSize => "Tick Size",
            Self::NegRisk => "Neg Risk",
            Self::MinOrderSize => "Min Order Size",
            Self::Spread => "Spread",
        }
    }
}

/// An event bundling one or more markets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub neg_risk: Option<bool>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub volume: Option<Decimal>,
    pub markets: Vec<Market>,
}

impl Event {
    #[must_use]
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            neg_risk: None,
            active: None,
            closed: None,
            volume: None,
            markets: Vec::new(),
        }
    }

    /// Lifecycle label used in listings.
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.closed == Some(true) {
            "closed"
        } else if self.active == Some(true) {
            "active"
        } else {
            "inactive"
        }
    }
}

/// A discovery tag (category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: String,
    pub label: Option<String>,
    pub slug: Option<String>,
    pub event_count: Option<u64>,
}

/// Results of a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub events: Vec<Event>,
    pub tags: Vec<Tag>,
}
