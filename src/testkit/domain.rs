//! Builders for domain primitives used across tests.
//!
//! Concise factory functions so tests focus on assertions rather than
//! construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::{
    book::{Book, PriceLevel},
    id::{OrderId, TokenId},
    market::{Event, Market, Token},
    order::OpenOrder,
};

/// Generate `n` token IDs named `t0`, `t1`, ..., `t{n-1}`.
pub fn make_tokens(n: usize) -> Vec<TokenId> {
    (0..n).map(|i| TokenId::from(format!("t{i}"))).collect()
}

/// Create a [`TokenId`] from a string.
pub fn token(id: &str) -> TokenId {
    TokenId::from(id)
}

/// Binary market with YES/NO tokens `{id}-yes` / `{id}-no` and condition `0x{id}`.
pub fn binary_market(id: &str, question: &str) -> Market {
    let mut market = Market::new(id, format!("0x{id}"), question);
    market.tokens = vec![
        Token::new("Yes", format!("{id}-yes")),
        Token::new("No", format!("{id}-no")),
    ];
    market
}

/// Binary market with the given tick size.
pub fn market_with_tick(id: &str, tick: Decimal) -> Market {
    let mut market = binary_market(id, &format!("Market {id}?"));
    market.tick_size = Some(tick);
    market
}

/// Event with the given markets.
pub fn event(slug: &str, title: &str, markets: Vec<Market>) -> Event {
    let mut event = Event::new(format!("ev-{slug}"), slug, title);
    event.active = Some(true);
    event.closed = Some(false);
    event.markets = markets;
    event
}

/// Book from `(price, size)` tuples, in the order given.
pub fn make_book(token_id: &str, bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> Book {
    let levels = |side: &[(Decimal, Decimal)]| {
        side.iter()
            .map(|(p, s)| PriceLevel::new(*p, *s))
            .collect::<Vec<_>>()
    };
    Book::with_levels(TokenId::from(token_id), levels(bids), levels(asks))
}

/// Resting order on `token_id` in market `market`.
pub fn open_order(id: &str, token_id: &str, market: &str, side: &str) -> OpenOrder {
    OpenOrder {
        id: OrderId::from(id),
        side: side.to_string(),
        order_type: Some("GTC".to_string()),
        price: Decimal::new(50, 2),
        original_size: Decimal::from(10),
        size_matched: Decimal::ZERO,
        asset_id: TokenId::from(token_id),
        market: market.to_string(),
        status: "LIVE".to_string(),
        created_at: None,
    }
}
