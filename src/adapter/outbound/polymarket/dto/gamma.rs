//! Gamma (market metadata) API types.
//!
//! Response format: flat JSON arrays for `/events` and `/tags`, a single
//! object for `/markets/{id}`, and `{events, tags}` for `/public-search`.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::{id_string, lenient_bool, lenient_decimal, non_empty_string, string_list};
use crate::domain::market::{Event, EventRef, Market, SearchResults, Tag, Token};

/// Outcome token as embedded in some market payloads.
#[derive(Debug, Deserialize)]
pub struct GammaToken {
    #[serde(default, deserialize_with = "id_string")]
    pub token_id: String,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
}

/// Parent event summary embedded in a market.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaEventRef {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub resolution_source: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub neg_risk: Option<bool>,
}

/// Market record from the Gamma API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub closed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub accepting_orders: Option<bool>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub order_price_min_tick_size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub order_min_size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub spread: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub neg_risk: Option<bool>,
    /// Embedded tokens; absent on most Gamma payloads.
    #[serde(default)]
    pub tokens: Option<Vec<GammaToken>>,
    /// JSON-encoded outcome names (e.g., `["Yes", "No"]`).
    #[serde(default, deserialize_with = "string_list")]
    pub outcomes: Vec<String>,
    /// JSON-encoded outcome prices (e.g., `["0.65", "0.35"]`).
    #[serde(default, deserialize_with = "string_list")]
    pub outcome_prices: Vec<String>,
    /// JSON-encoded CLOB token IDs.
    #[serde(default, deserialize_with = "string_list")]
    pub clob_token_ids: Vec<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume_24hr: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub liquidity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub best_bid: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub best_ask: Option<Decimal>,
    #[serde(default)]
    pub events: Option<Vec<GammaEventRef>>,
}

impl GammaMarket {
    /// Tokens from the embedded array, else from `clobTokenIds` zipped
    /// with `outcomes` and `outcomePrices`.
    fn tokens(&self) -> Vec<Token> {
        if let Some(tokens) = self.tokens.as_ref().filter(|t| !t.is_empty()) {
            return tokens
                .iter()
                .map(|t| Token {
                    outcome: t.outcome.clone().unwrap_or_default(),
                    token_id: t.token_id.clone().into(),
                    price: t.price,
                })
                .collect();
        }

        self.clob_token_ids
            .iter()
            .enumerate()
            .map(|(i, id)| Token {
                outcome: self
                    .outcomes
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("[{i}]")),
                token_id: id.clone().into(),
                price: self
                    .outcome_prices
                    .get(i)
                    .and_then(|p| p.trim().parse().ok()),
            })
            .collect()
    }
}

impl From<GammaMarket> for Market {
    fn from(raw: GammaMarket) -> Self {
        let tokens = raw.tokens();
        let mut market = Market::new(
            raw.id,
            raw.condition_id.unwrap_or_default(),
            raw.question.unwrap_or_default(),
        );
        market.slug = raw.slug;
        market.active = raw.active;
        market.closed = raw.closed;
        market.accepting_orders = raw.accepting_orders;
        market.tick_size = raw.order_price_min_tick_size;
        market.min_order_size = raw.order_min_size;
        market.spread = raw.spread;
        market.neg_risk = raw.neg_risk;
        market.tokens = tokens;
        market.description = raw.description;
        market.end_date = raw.end_date;
        market.volume = raw.volume;
        market.volume_24hr = raw.volume_24hr;
        market.liquidity = raw.liquidity;
        market.best_bid = raw.best_bid;
        market.best_ask = raw.best_ask;
        market.events = raw
            .events
            .unwrap_or_default()
            .into_iter()
            .map(|e| EventRef {
                id: e.id,
                title: e.title.unwrap_or_default(),
                slug: e.slug,
                subtitle: e.subtitle,
                description: e.description,
                resolution_source: e.resolution_source,
                neg_risk: e.neg_risk,
            })
            .collect();
        market
    }
}

/// Event record from the Gamma API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaEvent {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub neg_risk: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub closed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub markets: Option<Vec<GammaMarket>>,
}

impl From<GammaEvent> for Event {
    fn from(raw: GammaEvent) -> Self {
        let mut event = Event::new(
            raw.id,
            raw.slug.unwrap_or_default(),
            raw.title.unwrap_or_default(),
        );
        event.neg_risk = raw.neg_risk;
        event.active = raw.active;
        event.closed = raw.closed;
        event.volume = raw.volume;
        event.markets = raw
            .markets
            .unwrap_or_default()
            .into_iter()
            .map(Market::from)
            .collect();
        event
    }
}

/// Tag record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaTag {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub slug: Option<String>,
    #[serde(default)]
    pub event_count: Option<u64>,
}

impl From<GammaTag> for Tag {
    fn from(raw: GammaTag) -> Self {
        Self {
            id: raw.id,
            label: raw.label,
            slug: raw.slug,
            event_count: raw.event_count,
        }
    }
}

/// `/public-search` response.
#[derive(Debug, Default, Deserialize)]
pub struct GammaSearch {
    #[serde(default)]
    pub events: Option<Vec<GammaEvent>>,
    #[serde(default)]
    pub tags: Option<Vec<GammaTag>>,
}

impl From<GammaSearch> for SearchResults {
    fn from(raw: GammaSearch) -> Self {
        Self {
            events: raw
                .events
                .unwrap_or_default()
                .into_iter()
                .map(Event::from)
                .collect(),
            tags: raw
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(Tag::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EVENT_JSON: &str = r#"[{
        "id": "16167",
        "slug": "bitcoin-up-or-down",
        "title": "Bitcoin Up or Down",
        "negRisk": false,
        "active": true,
        "closed": false,
        "volume": "12345.67",
        "markets": [{
            "id": "512345",
            "question": "Bitcoin up today?",
            "conditionId": "0xabc",
            "active": true,
            "closed": false,
            "acceptingOrders": true,
            "orderPriceMinTickSize": 0.01,
            "orderMinSize": 5,
            "spread": "0.02",
            "negRisk": false,
            "outcomes": "[\"Up\", \"Down\"]",
            "outcomePrices": "[\"0.55\", \"0.45\"]",
            "clobTokenIds": "[\"111\", \"222\"]",
            "volume24hr": 1500.5,
            "bestBid": null
        }]
    }]"#;

    #[test]
    fn event_with_encoded_lists_converts() {
        let raw: Vec<GammaEvent> = serde_json::from_str(EVENT_JSON).unwrap();
        let event = Event::from(raw.into_iter().next().unwrap());

        assert_eq!(event.slug, "bitcoin-up-or-down");
        assert_eq!(event.volume, Some(dec!(12345.67)));

        let market = &event.markets[0];
        assert_eq!(market.condition_id.as_str(), "0xabc");
        assert_eq!(market.tick_size, Some(dec!(0.01)));
        assert_eq!(market.min_order_size, Some(dec!(5)));
        assert_eq!(market.spread, Some(dec!(0.02)));
        assert_eq!(market.volume_24hr, Some(dec!(1500.5)));
        assert_eq!(market.best_bid, None);
        assert_eq!(market.tokens.len(), 2);
        assert_eq!(market.tokens[0].outcome, "Up");
        assert_eq!(market.tokens[0].token_id.as_str(), "111");
        assert_eq!(market.tokens[1].price, Some(dec!(0.45)));
    }

    #[test]
    fn embedded_tokens_take_precedence() {
        let raw: GammaMarket = serde_json::from_str(
            r#"{"id": 7, "tokens": [{"token_id": "9", "outcome": "Yes"}], "clobTokenIds": "[\"1\"]"}"#,
        )
        .unwrap();
        let market = Market::from(raw);

        assert_eq!(market.id.as_str(), "7");
        assert_eq!(market.tokens.len(), 1);
        assert_eq!(market.tokens[0].token_id.as_str(), "9");
    }

    #[test]
    fn missing_outcome_labels_fall_back_to_index() {
        let raw: GammaMarket =
            serde_json::from_str(r#"{"id": "1", "clobTokenIds": "5,6"}"#).unwrap();
        let market = Market::from(raw);

        assert_eq!(market.tokens[1].outcome, "[1]");
        assert_eq!(market.tokens[1].token_id.as_str(), "6");
    }
}
