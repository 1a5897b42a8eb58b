//! Market-metadata port.
//!
//! Read-only discovery of events, markets, tags and search results.

use async_trait::async_trait;

use crate::domain::{
    id::MarketId,
    market::{Event, Market, SearchResults, Tag},
};
use crate::error::Error;

/// Listing parameters for [`MarketCatalog::list_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub limit: u32,
    pub offset: u32,
    /// Sort field, e.g. `volume` or `startDate`.
    pub order: Option<String>,
    pub ascending: Option<bool>,
    pub tag_slug: Option<String>,
    pub tag_id: Option<String>,
    /// `Some(false)` hides closed events; `None` lists everything.
    pub closed: Option<bool>,
    pub featured: Option<bool>,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            order: None,
            ascending: None,
            tag_slug: None,
            tag_id: None,
            closed: Some(false),
            featured: None,
        }
    }
}

/// Source of event and market metadata.
#[async_trait]
pub trait MarketCatalog: Send + Sync {
    /// Events whose slug matches exactly. Zero results is not an error here.
    async fn events_by_slug(&self, slug: &str) -> Result<Vec<Event>, Error>;

    /// Full detail for one market.
    async fn market(&self, id: &MarketId) -> Result<Market, Error>;

    /// Page through events.
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error>;

    /// Discovery tags.
    async fn tags(&self, limit: u32) -> Result<Vec<Tag>, Error>;

    /// Free-text search over active events and tags.
    async fn search(&self, query: &str, limit: u32) -> Result<SearchResults, Error>;
}
