//! Public CLOB endpoints implementing [`PriceFeed`].

use async_trait::async_trait;
use tracing::{debug, info};

use super::client::RestClient;
use super::dto::clob::{BookResponse, HistoryResponse, MidpointResponse, PriceResponse};
use crate::domain::{
    book::Book,
    id::TokenId,
    money::Price,
    order::Side,
    price::{HistoryQuery, HistoryWindow, PricePoint},
};
use crate::error::Error;
use crate::port::outbound::pricing::PriceFeed;

const SERVICE: &str = "clob";

/// Unauthenticated price and book reads from `clob.polymarket.com`.
pub struct ClobPriceFeed {
    rest: RestClient,
    base_url: String,
}

impl ClobPriceFeed {
    #[must_use]
    pub fn new(rest: RestClient, base_url: impl Into<String>) -> Self {
        Self {
            rest,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn history_params(query: &HistoryQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("market", query.token_id.to_string())];
    match &query.window {
        HistoryWindow::Interval(interval) => params.push(("interval", interval.clone())),
        HistoryWindow::Range { start, end } => {
            params.push(("startTs", start.to_string()));
            params.push(("endTs", end.to_string()));
        }
    }
    if let Some(fidelity) = query.fidelity {
        params.push(("fidelity", fidelity.to_string()));
    }
    params
}

#[async_trait]
impl PriceFeed for ClobPriceFeed {
    async fn price(&self, token_id: &TokenId, side: Side) -> Result<Price, Error> {
        let url = self.url("/price");
        let raw: PriceResponse = self
            .rest
            .get_json(
                SERVICE,
                &url,
                &[
                    ("token_id", token_id.to_string()),
                    ("side", side.as_str().to_string()),
                ],
            )
            .await?;

        debug!(token_id = %token_id, %side, price = %raw.price, "Price fetched");
        Ok(raw.price)
    }

    async fn midpoint(&self, token_id: &TokenId) -> Result<Price, Error> {
        let url = self.url("/midpoint");
        let raw: MidpointResponse = self
            .rest
            .get_json(SERVICE, &url, &[("token_id", token_id.to_string())])
            .await?;
        Ok(raw.mid)
    }

    async fn history(&self, query: &HistoryQuery) -> Result<Vec<PricePoint>, Error> {
        let url = self.url("/prices-history");
        info!(token_id = %query.token_id, window = ?query.window, "Fetching price history");

        let raw: HistoryResponse = self
            .rest
            .get_json(SERVICE, &url, &history_params(query))
            .await?;
        Ok(raw.into_points())
    }

    async fn order_book(&self, token_id: &TokenId) -> Result<Book, Error> {
        let url = self.url("/book");
        info!(token_id = %token_id, "Fetching order book");

        let raw: BookResponse = self
            .rest
            .get_json(SERVICE, &url, &[("token_id", token_id.to_string())])
            .await?;

        let book = raw.into_book(token_id);
        debug!(
            bids = book.bids().len(),
            asks = book.asks().len(),
            "Order book fetched"
        );
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_history_params() {
        let query = HistoryQuery {
            token_id: TokenId::from("42"),
            window: HistoryWindow::default(),
            fidelity: Some(60),
        };
        assert_eq!(
            history_params(&query),
            vec![
                ("market", "42".to_string()),
                ("interval", "1d".to_string()),
                ("fidelity", "60".to_string()),
            ]
        );
    }

    #[test]
    fn range_history_params() {
        let query = HistoryQuery {
            token_id: TokenId::from("42"),
            window: HistoryWindow::Range { start: 10, end: 20 },
            fidelity: None,
        };
        let params = history_params(&query);
        assert!(params.contains(&("startTs", "10".to_string())));
        assert!(params.contains(&("endTs", "20".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "interval"));
    }
}
