//! Public CLOB API types.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::{decimal, non_empty_string};
use crate::domain::{
    book::{Book, PriceLevel},
    id::TokenId,
    price::PricePoint,
};

/// `GET /price` response.
#[derive(Debug, Deserialize)]
pub struct PriceResponse {
    #[serde(deserialize_with = "decimal")]
    pub price: Decimal,
}

/// `GET /midpoint` response.
#[derive(Debug, Deserialize)]
pub struct MidpointResponse {
    #[serde(deserialize_with = "decimal")]
    pub mid: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct HistoryPoint {
    pub t: i64,
    #[serde(deserialize_with = "decimal")]
    pub p: Decimal,
}

/// `GET /prices-history` response.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Option<Vec<HistoryPoint>>,
}

impl HistoryResponse {
    #[must_use]
    pub fn into_points(self) -> Vec<PricePoint> {
        self.history
            .unwrap_or_default()
            .into_iter()
            .map(|pt| PricePoint::new(pt.t, pt.p))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct BookLevel {
    #[serde(deserialize_with = "decimal")]
    pub price: Decimal,
    #[serde(deserialize_with = "decimal")]
    pub size: Decimal,
}

/// `GET /book` response.
#[derive(Debug, Deserialize)]
pub struct BookResponse {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub market: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub bids: Option<Vec<BookLevel>>,
    #[serde(default)]
    pub asks: Option<Vec<BookLevel>>,
}

impl BookResponse {
    /// Convert into a domain book for `token_id`, keeping upstream order.
    #[must_use]
    pub fn into_book(self, token_id: &TokenId) -> Book {
        let levels = |side: Option<Vec<BookLevel>>| {
            side.unwrap_or_default()
                .into_iter()
                .map(|l| PriceLevel::new(l.price, l.size))
                .collect::<Vec<_>>()
        };
        let token = self
            .asset_id
            .filter(|id| !id.is_empty())
            .map_or_else(|| token_id.clone(), TokenId::from);
        let book = Book::with_levels(token, levels(self.bids), levels(self.asks));
        match self.market {
            Some(market) => book.with_market(market),
            None => book,
        }
    }
}
