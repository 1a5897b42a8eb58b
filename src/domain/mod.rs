//! Exchange-agnostic domain types.
//!
//! Everything here is plain data plus invariants. No I/O.

pub mod book;
pub mod error;
pub mod id;
pub mod market;
pub mod money;
pub mod order;
pub mod price;

// Core domain types
pub use book::{Book, BookAnalysis, PriceLevel};
pub use error::ValidationError;
pub use id::{ConditionId, MarketId, OrderId, TokenId};
pub use market::{Event, EventRef, Market, MarketField, SearchResults, Tag, Token};
pub use money::{DollarAmount, Price, ShareCount, Volume};

// Orders
pub use order::{
    BalanceAsset, CancelReport, DispatchOutcome, MarketCancelFailure, NotCanceled, OpenOrder,
    OrderFilter, OrderKind, OrderPayload, OrderRequest, OrderType, Requirement, Side,
    SubmitResponse, TickSize, TimeInForce,
};

// Prices
pub use price::{HistoryQuery, HistorySummary, HistoryWindow, PricePoint, Quote};
