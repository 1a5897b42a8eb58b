//! Discovery commands: `events`, `tags`, `search`.

use serde_json::json;
use tabled::Tabled;

use super::command::{EventsArgs, SearchArgs, TagsArgs};
use super::{format, output};
use crate::domain::market::{Event, Tag};
use crate::error::Result;
use crate::infrastructure::context::ClientContext;
use crate::port::outbound::catalog::EventQuery;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Markets")]
    markets: usize,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            slug: event.slug.clone(),
            title: format::truncate(&event.title, 48),
            markets: event.markets.len(),
            volume: event.volume.map_or_else(|| "-".to_string(), format::usd),
            status: event.status(),
        }
    }
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Events")]
    events: String,
}

impl From<&Tag> for TagRow {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            label: format::or_dash(tag.label.as_deref()),
            slug: format::or_dash(tag.slug.as_deref()),
            events: format::or_dash(tag.event_count),
        }
    }
}

fn event_query(args: &EventsArgs) -> EventQuery {
    EventQuery {
        limit: args.limit,
        offset: args.offset,
        order: args.order.clone(),
        ascending: args.ascending(),
        tag_slug: args.tag_slug.clone(),
        tag_id: args.tag_id.clone(),
        closed: args.closed_filter(),
        featured: args.featured.then_some(true),
    }
}

/// List events, one page at a time.
pub async fn events(ctx: &ClientContext, args: &EventsArgs) -> Result<()> {
    let query = event_query(args);
    let events = ctx.catalog().list_events(&query).await?;
    let full_page = u32::try_from(events.len()).is_ok_and(|n| n > 0 && n >= args.limit);

    if output::is_json() {
        output::json_output(json!({
            "command": "events",
            "offset": args.offset,
            "limit": args.limit,
            "count": events.len(),
            "events": events,
        }));
        return Ok(());
    }

    if events.is_empty() {
        output::note("No events found");
        return Ok(());
    }

    output::section(&format!("Events ({})", events.len()));
    output::table(events.iter().map(EventRow::from));

    if full_page {
        output::hint(&format!(
            "more events may exist, use {}",
            output::highlight(format!("--offset {}", args.offset + args.limit))
        ));
    }
    Ok(())
}

/// List tags.
pub async fn tags(ctx: &ClientContext, args: &TagsArgs) -> Result<()> {
    let tags = ctx.catalog().tags(args.limit).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "tags",
            "count": tags.len(),
            "tags": tags,
        }));
        return Ok(());
    }

    if tags.is_empty() {
        output::note("No tags found");
        return Ok(());
    }

    output::section(&format!("Tags ({})", tags.len()));
    output::table(tags.iter().map(TagRow::from));
    output::hint(&format!(
        "filter events with {}",
        output::highlight("pmctl events --tag-slug <slug>")
    ));
    Ok(())
}

/// Search active events and tags.
pub async fn search(ctx: &ClientContext, args: &SearchArgs) -> Result<()> {
    let results = ctx.catalog().search(args.query.trim(), args.limit).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "search",
            "query": args.query,
            "results": results,
        }));
        return Ok(());
    }

    if results.events.is_empty() && results.tags.is_empty() {
        output::note(&format!("No results for '{}'", args.query));
        return Ok(());
    }

    if !results.events.is_empty() {
        output::section(&format!("Events ({})", results.events.len()));
        output::table(results.events.iter().map(EventRow::from));
    }
    if !results.tags.is_empty() {
        output::section(&format!("Tags ({})", results.tags.len()));
        output::table(results.tags.iter().map(TagRow::from));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::adapter::inbound::cli::command::{Cli, Commands};

    fn parse_events(args: &[&str]) -> EventsArgs {
        let argv = ["pmctl", "events"].iter().chain(args.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Events(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn default_query_excludes_closed() {
        let query = event_query(&parse_events(&[]));
        assert_eq!(query.limit, 10);
        assert_eq!(query.closed, Some(false));
        assert_eq!(query.featured, None);
        assert_eq!(query.ascending, None);
    }

    #[test]
    fn flags_map_onto_query() {
        let query = event_query(&parse_events(&[
            "--limit", "5", "--offset", "20", "--order", "volume", "--asc", "--tag-slug",
            "crypto", "--closed", "--featured",
        ]));
        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 20);
        assert_eq!(query.order.as_deref(), Some("volume"));
        assert_eq!(query.ascending, Some(true));
        assert_eq!(query.tag_slug.as_deref(), Some("crypto"));
        assert_eq!(query.closed, Some(true));
        assert_eq!(query.featured, Some(true));
    }
}
