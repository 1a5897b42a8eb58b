//! Order fixtures for dispatch tests.

use pmctl::domain::id::TokenId;
use pmctl::domain::order::{OrderRequest, OrderType, Side, TickSize};
use rust_decimal::Decimal;

pub const TOKEN: &str = "71321045679252212594626385532706912750332728571942532289631379312455583992563";

/// Limit order on [`TOKEN`] at the default 0.01 tick.
pub fn limit(side: Side, price: Decimal, shares: Decimal) -> OrderRequest {
    OrderRequest::new(
        TokenId::from(TOKEN),
        side,
        price,
        OrderType::Limit,
        shares,
        TickSize::Hundredth,
        false,
    )
    .expect("valid limit order")
}

/// Market order on [`TOKEN`] sized in dollars.
pub fn market(side: Side, price: Decimal, dollars: Decimal) -> OrderRequest {
    OrderRequest::new(
        TokenId::from(TOKEN),
        side,
        price,
        OrderType::Market,
        dollars,
        TickSize::Hundredth,
        false,
    )
    .expect("valid market order")
}
