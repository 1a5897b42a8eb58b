//! Identifier resolution.
//!
//! Turns a loose, human-supplied identifier (raw token/condition ID, event
//! slug, or event URL) into the token IDs it stands for. Only slugs and URLs
//! touch the network; raw IDs pass straight through.

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::domain::{
    error::ValidationError,
    id::{ConditionId, MarketId, TokenId},
    market::{Event, Market},
};
use crate::error::{Error, Result};
use crate::port::outbound::catalog::MarketCatalog;

/// What kind of identifier a user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Token ID, condition ID or market ID used as-is.
    Raw,
    /// Event slug, e.g. `bitcoin-up-or-down`.
    Slug,
    /// Event page URL whose last path segment is the slug.
    Url,
}

/// Classify an identifier.
///
/// Rules are checked in order: a URI scheme makes it a URL; a `0x`-prefixed
/// hex string or a run of ten or more digits is raw; a string of letters,
/// digits, hyphens and underscores with at least one letter is a slug;
/// anything else is raw. Long digit runs are checked before slugs because
/// token IDs are decimal strings.
#[must_use]
pub fn classify(input: &str) -> IdentifierKind {
    let input = input.trim();

    if has_scheme(input) {
        return IdentifierKind::Url;
    }

    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return IdentifierKind::Raw;
        }
    }

    if input.len() >= 10 && input.chars().all(|c| c.is_ascii_digit()) {
        return IdentifierKind::Raw;
    }

    let slug_chars = input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if slug_chars && input.chars().any(|c| c.is_ascii_alphabetic()) {
        return IdentifierKind::Slug;
    }

    IdentifierKind::Raw
}

fn has_scheme(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Take the event slug out of a URL: the last non-empty path segment.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the URL does not parse or has no
/// path segment.
pub fn extract_slug(input: &str) -> std::result::Result<String, ValidationError> {
    let url = Url::parse(input.trim()).map_err(|e| ValidationError::InvalidArgument {
        name: "url",
        reason: e.to_string(),
    })?;

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::MissingSlug {
            url: input.trim().to_string(),
        })
}

/// One market of a resolved event, with the IDs needed to act on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketGroup {
    pub question: String,
    pub market_id: MarketId,
    pub condition_id: ConditionId,
    pub token_ids: Vec<TokenId>,
    pub active: bool,
}

/// An event expanded into its markets and tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEvent {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// All token IDs across every market, in market then outcome order.
    pub token_ids: Vec<TokenId>,
    /// Per-market grouping of `token_ids`.
    pub groups: Vec<MarketGroup>,
    /// Full market records, for parameter reconciliation and display.
    #[serde(skip)]
    pub markets: Vec<Market>,
}

impl ResolvedEvent {
    /// Flatten an event's markets into one token list, keeping the grouping.
    #[must_use]
    pub fn from_event(event: Event) -> Self {
        let groups: Vec<MarketGroup> = event
            .markets
            .iter()
            .map(|market| MarketGroup {
                question: market.question.clone(),
                market_id: market.id.clone(),
                condition_id: market.condition_id.clone(),
                token_ids: market.token_ids(),
                active: market.is_active(),
            })
            .collect();

        let token_ids = groups
            .iter()
            .flat_map(|g| g.token_ids.iter().cloned())
            .collect();

        Self {
            id: event.id,
            slug: event.slug,
            title: event.title,
            token_ids,
            groups,
            markets: event.markets,
        }
    }

    /// Groups whose market is still taking orders.
    pub fn active_groups(&self) -> impl Iterator<Item = &MarketGroup> {
        self.groups.iter().filter(|g| g.active)
    }
}

/// Result of resolving an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Input was already an ID; nothing was fetched.
    Raw(String),
    /// Input named an event, now expanded.
    Event(ResolvedEvent),
}

/// Resolve an identifier to a raw ID or an expanded event.
///
/// # Errors
///
/// - [`ValidationError`] for empty input or a URL without a slug (no
///   network call is made).
/// - [`Error::NotFound`] when no event matches the slug.
/// - Any catalog error, unchanged.
pub async fn resolve(catalog: &dyn MarketCatalog, input: &str) -> Result<Target> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyIdentifier.into());
    }

    let slug = match classify(input) {
        IdentifierKind::Raw => {
            debug!(id = %input, "Identifier is raw, skipping resolution");
            return Ok(Target::Raw(input.to_string()));
        }
        IdentifierKind::Slug => input.to_string(),
        IdentifierKind::Url => extract_slug(input)?,
    };

    debug!(slug = %slug, "Resolving event slug");
    let events = catalog.events_by_slug(&slug).await?;
    let Some(event) = events.into_iter().next() else {
        return Err(Error::NotFound {
            kind: "event",
            query: slug,
        });
    };

    let resolved = ResolvedEvent::from_event(event);
    info!(
        slug = %resolved.slug,
        markets = resolved.groups.len(),
        tokens = resolved.token_ids.len(),
        "Resolved event"
    );
    Ok(Target::Event(resolved))
}
