//! Gamma API adapter implementing [`MarketCatalog`].

use async_trait::async_trait;
use tracing::{debug, info};

use super::client::RestClient;
use super::dto::gamma::{GammaEvent, GammaMarket, GammaSearch, GammaTag};
use crate::domain::{
    id::MarketId,
    market::{Event, Market, SearchResults, Tag},
};
use crate::error::Error;
use crate::port::outbound::catalog::{EventQuery, MarketCatalog};

const SERVICE: &str = "gamma";

/// Market metadata from `gamma-api.polymarket.com`.
pub struct GammaCatalog {
    rest: RestClient,
    base_url: String,
}

impl GammaCatalog {
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

fn event_query_params(query: &EventQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", query.limit.to_string()),
        ("offset", query.offset.to_string()),
    ];
    if let Some(order) = &query.order {
        params.push(("order", order.clone()));
    }
    if let Some(ascending) = query.ascending {
        params.push(("ascending", ascending.to_string()));
    }
    if let Some(tag_slug) = &query.tag_slug {
        params.push(("tag_slug", tag_slug.clone()));
    }
    if let Some(tag_id) = &query.tag_id {
        params.push(("tag_id", tag_id.clone()));
    }
    if let Some(closed) = query.closed {
        params.push(("closed", closed.to_string()));
    }
    if let Some(featured) = query.featured {
        params.push(("featured", featured.to_string()));
    }
    params
}

#[async_trait]
impl MarketCatalog for GammaCatalog {
    async fn events_by_slug(&self, slug: &str) -> Result<Vec<Event>, Error> {
        let url = self.url("/events");
        info!(slug = %slug, "Fetching events by slug");

        let raw: Vec<GammaEvent> = self
            .rest
            .get_json(SERVICE, &url, &[("slug", slug.to_string())])
            .await?;

        debug!(count = raw.len(), "Fetched events");
        Ok(raw.into_iter().map(Event::from).collect())
    }

    async fn market(&self, id: &MarketId) -> Result<Market, Error> {
        let url = self.url(&format!("/markets/{id}"));
        info!(market_id = %id, "Fetching market detail");

        let raw: GammaMarket = self.rest.get_json(SERVICE, &url, &[]).await?;
        Ok(Market::from(raw))
    }

    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error> {
        let url = self.url("/events");
        let params = event_query_params(query);
        info!(limit = query.limit, offset = query.offset, "Listing events");

        let raw: Vec<GammaEvent> = self.rest.get_json(SERVICE, &url, &params).await?;

        debug!(count = raw.len(), "Fetched event page");
        Ok(raw.into_iter().map(Event::from).collect())
    }

    async fn tags(&self, limit: u32) -> Result<Vec<Tag>, Error> {
        let url = self.url("/tags");
        let raw: Vec<GammaTag> = self
            .rest
            .get_json(SERVICE, &url, &[("limit", limit.to_string())])
            .await?;

        debug!(count = raw.len(), "Fetched tags");
        Ok(raw.into_iter().map(Tag::from).collect())
    }

    async fn search(&self, query: &str, limit: u32) -> Result<SearchResults, Error> {
        let url = self.url("/public-search");
        info!(query = %query, "Searching");

        let raw: GammaSearch = self
            .rest
            .get_json(
                SERVICE,
                &url,
                &[
                    ("q", query.to_string()),
                    ("limit_per_type", limit.to_string()),
                    ("events_status", "active".to_string()),
                ],
            )
            .await?;

        Ok(SearchResults::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_hides_closed_events() {
        let params = event_query_params(&EventQuery::default());
        assert!(params.contains(&("closed", "false".to_string())));
        assert!(params.contains(&("limit", "10".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "order"));
    }

    #[test]
    fn all_events_omit_closed_filter() {
        let query = EventQuery {
            closed: None,
            order: Some("volume".into()),
            ascending: Some(false),
            tag_slug: Some("crypto".into()),
            ..EventQuery::default()
        };
        let params = event_query_params(&query);
        assert!(!params.iter().any(|(k, _)| *k == "closed"));
        assert!(params.contains(&("order", "volume".to_string())));
        assert!(params.contains(&("ascending", "false".to_string())));
        assert!(params.contains(&("tag_slug", "crypto".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let catalog = GammaCatalog::new(
            RestClient::from_config(&Default::default()),
            "https://gamma-api.polymarket.com/",
        );
        assert_eq!(catalog.url("/tags"), "https://gamma-api.polymarket.com/tags");
    }
}
