//! In-memory port implementations.
//!
//! Each fake records the calls it receives so tests can assert that a
//! code path did (or did not) reach the outside world.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{
    book::Book,
    id::{ConditionId, MarketId, OrderId, TokenId},
    market::{Event, Market, SearchResults, Tag},
    money::Price,
    order::{
        CancelReport, NotCanceled, OpenOrder, OrderFilter, OrderPayload, Side, SubmitResponse,
    },
    price::{HistoryQuery, PricePoint},
};
use crate::error::Error;
use crate::port::outbound::{
    catalog::{EventQuery, MarketCatalog},
    pricing::PriceFeed,
    trading::TradingClient,
    wallet::BalanceSource,
};

fn not_found(service: &'static str, what: impl Into<String>) -> Error {
    Error::Upstream {
        service,
        status: 404,
        body: what.into(),
    }
}

/// Catalog backed by a fixed set of events.
#[derive(Default)]
pub struct FakeCatalog {
    events: Vec<Event>,
    tags: Vec<Tag>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Every call received, as `method:arg`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl MarketCatalog for FakeCatalog {
    async fn events_by_slug(&self, slug: &str) -> Result<Vec<Event>, Error> {
        self.record(format!("events_by_slug:{slug}"));
        Ok(self
            .events
            .iter()
            .filter(|e| e.slug == slug)
            .cloned()
            .collect())
    }

    async fn market(&self, id: &MarketId) -> Result<Market, Error> {
        self.record(format!("market:{id}"));
        self.events
            .iter()
            .flat_map(|e| e.markets.iter())
            .find(|m| m.id == *id)
            .cloned()
            .ok_or_else(|| not_found("gamma", format!("market {id} not found")))
    }

    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error> {
        self.record(format!("list_events:{}", query.limit));
        Ok(self
            .events
            .iter()
            .filter(|e| query.closed.map_or(true, |closed| e.closed.unwrap_or(false) == closed))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn tags(&self, limit: u32) -> Result<Vec<Tag>, Error> {
        self.record(format!("tags:{limit}"));
        Ok(self.tags.iter().take(limit as usize).cloned().collect())
    }

    async fn search(&self, query: &str, limit: u32) -> Result<SearchResults, Error> {
        self.record(format!("search:{query}"));
        let needle = query.to_lowercase();
        Ok(SearchResults {
            events: self
                .events
                .iter()
                .filter(|e| e.title.to_lowercase().contains(&needle))
                .take(limit as usize)
                .cloned()
                .collect(),
            tags: self
                .tags
                .iter()
                .filter(|t| {
                    t.label
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(&needle))
                })
                .take(limit as usize)
                .cloned()
                .collect(),
        })
    }
}

/// Price feed with per-token quotes, histories and books.
#[derive(Default)]
pub struct FakePriceFeed {
    prices: HashMap<(TokenId, Side), Price>,
    midpoints: HashMap<TokenId, Price>,
    histories: HashMap<TokenId, Vec<PricePoint>>,
    books: HashMap<TokenId, Book>,
    history_queries: Mutex<Vec<HistoryQuery>>,
}

impl FakePriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ask (SELL side), bid (BUY side) and midpoint for a token.
    #[must_use]
    pub fn with_quote(mut self, token_id: &str, ask: Price, bid: Price, midpoint: Price) -> Self {
        let token = TokenId::from(token_id);
        self.prices.insert((token.clone(), Side::Sell), ask);
        self.prices.insert((token.clone(), Side::Buy), bid);
        self.midpoints.insert(token, midpoint);
        self
    }

    /// Set ask and bid only, leaving the midpoint endpoint failing.
    #[must_use]
    pub fn without_midpoint(mut self, token_id: &str) -> Self {
        self.midpoints.remove(&TokenId::from(token_id));
        self
    }

    #[must_use]
    pub fn with_history(mut self, token_id: &str, points: Vec<PricePoint>) -> Self {
        self.histories.insert(TokenId::from(token_id), points);
        self
    }

    #[must_use]
    pub fn with_book(mut self, book: Book) -> Self {
        self.books.insert(book.token_id().clone(), book);
        self
    }

    /// History queries received, in order.
    pub fn history_queries(&self) -> Vec<HistoryQuery> {
        self.history_queries.lock().clone()
    }
}

#[async_trait]
impl PriceFeed for FakePriceFeed {
    async fn price(&self, token_id: &TokenId, side: Side) -> Result<Price, Error> {
        self.prices
            .get(&(token_id.clone(), side))
            .copied()
            .ok_or_else(|| not_found("clob", format!("no {side} price for {token_id}")))
    }

    async fn midpoint(&self, token_id: &TokenId) -> Result<Price, Error> {
        self.midpoints
            .get(token_id)
            .copied()
            .ok_or_else(|| not_found("clob", format!("no midpoint for {token_id}")))
    }

    async fn history(&self, query: &HistoryQuery) -> Result<Vec<PricePoint>, Error> {
        self.history_queries.lock().push(query.clone());
        Ok(self
            .histories
            .get(&query.token_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn order_book(&self, token_id: &TokenId) -> Result<Book, Error> {
        self.books
            .get(token_id)
            .cloned()
            .ok_or_else(|| not_found("clob", format!("no orderbook exists for {token_id}")))
    }
}

/// Trading client that records submissions and serves a fixed order list.
pub struct FakeTrader {
    response: SubmitResponse,
    orders: Mutex<Vec<OpenOrder>>,
    refuse_cancel: Vec<OrderId>,
    fail_cancel_call: Option<usize>,
    cancel_calls: Mutex<usize>,
    submitted: Mutex<Vec<OrderPayload>>,
}

impl Default for FakeTrader {
    fn default() -> Self {
        Self {
            response: SubmitResponse {
                order_id: Some(OrderId::from("0xfake-order")),
                status: Some("live".to_string()),
                error_msg: None,
            },
            orders: Mutex::new(Vec::new()),
            refuse_cancel: Vec::new(),
            fail_cancel_call: None,
            cancel_calls: Mutex::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

impl FakeTrader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every submission with `response`.
    #[must_use]
    pub fn with_response(mut self, response: SubmitResponse) -> Self {
        self.response = response;
        self
    }

    #[must_use]
    pub fn with_orders(self, orders: Vec<OpenOrder>) -> Self {
        *self.orders.lock() = orders;
        self
    }

    /// Refuse to cancel this order.
    #[must_use]
    pub fn refusing_cancel(mut self, order_id: &str) -> Self {
        self.refuse_cancel.push(OrderId::from(order_id));
        self
    }

    /// Fail the `n`th cancel request (1-based) with a transport error.
    #[must_use]
    pub fn failing_cancel_call(mut self, n: usize) -> Self {
        self.fail_cancel_call = Some(n);
        self
    }

    /// Number of cancel requests received.
    pub fn cancel_calls(&self) -> usize {
        *self.cancel_calls.lock()
    }

    /// Payloads submitted so far.
    pub fn submitted(&self) -> Vec<OrderPayload> {
        self.submitted.lock().clone()
    }

    /// Orders still resting.
    pub fn resting(&self) -> Vec<OpenOrder> {
        self.orders.lock().clone()
    }

    fn count_cancel_call(&self) -> Result<(), Error> {
        let mut calls = self.cancel_calls.lock();
        *calls += 1;
        if self.fail_cancel_call == Some(*calls) {
            return Err(Error::Upstream {
                service: "clob",
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn cancel_ids(&self, ids: Vec<OrderId>) -> CancelReport {
        let mut report = CancelReport::default();
        let mut orders = self.orders.lock();
        for id in ids {
            if self.refuse_cancel.contains(&id) {
                report.not_canceled.push(NotCanceled {
                    order_id: id,
                    reason: "order can't be canceled".to_string(),
                });
            } else if let Some(pos) = orders.iter().position(|o| o.id == id) {
                orders.remove(pos);
                report.canceled.push(id);
            } else {
                report.not_canceled.push(NotCanceled {
                    order_id: id,
                    reason: "order not found".to_string(),
                });
            }
        }
        report
    }
}

#[async_trait]
impl TradingClient for FakeTrader {
    async fn submit(&self, order: &OrderPayload) -> Result<SubmitResponse, Error> {
        self.submitted.lock().push(order.clone());
        Ok(self.response.clone())
    }

    async fn open_orders(&self, filter: &OrderFilter) -> Result<Vec<OpenOrder>, Error> {
        Ok(self
            .orders
            .lock()
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn cancel_order(&self, order_id: &OrderId) -> Result<CancelReport, Error> {
        self.count_cancel_call()?;
        Ok(self.cancel_ids(vec![order_id.clone()]))
    }

    async fn cancel_market_orders(&self, market: &ConditionId) -> Result<CancelReport, Error> {
        self.count_cancel_call()?;
        let filter = OrderFilter::market(market.clone());
        let ids: Vec<OrderId> = self
            .orders
            .lock()
            .iter()
            .filter(|o| filter.matches(o))
            .map(|o| o.id.clone())
            .collect();
        Ok(self.cancel_ids(ids))
    }
}

/// Fixed balances.
#[derive(Default)]
pub struct FakeWallet {
    collateral: Decimal,
    positions: HashMap<TokenId, Decimal>,
}

impl FakeWallet {
    pub fn with_collateral(collateral: Decimal) -> Self {
        Self {
            collateral,
            positions: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_position(mut self, token_id: &str, shares: Decimal) -> Self {
        self.positions.insert(TokenId::from(token_id), shares);
        self
    }
}

#[async_trait]
impl BalanceSource for FakeWallet {
    async fn collateral(&self) -> Result<Decimal, Error> {
        Ok(self.collateral)
    }

    async fn position(&self, token_id: &TokenId) -> Result<Decimal, Error> {
        Ok(self.positions.get(token_id).copied().unwrap_or_default())
    }
}
