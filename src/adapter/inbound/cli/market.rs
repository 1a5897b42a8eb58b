//! Detail commands: `market` and `token`.

use serde_json::json;
use tabled::Tabled;

use super::command::{MarketArgs, TokenArgs};
use super::{format, output};
use crate::application::params::{active_markets, reconcile_all, SharedParams};
use crate::application::resolver::{resolve, ResolvedEvent, Target};
use crate::domain::error::ValidationError;
use crate::domain::id::MarketId;
use crate::domain::market::{Market, MarketField, Token};
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Token ID")]
    token_id: String,
}

impl From<&Token> for OutcomeRow {
    fn from(token: &Token) -> Self {
        Self {
            outcome: token.outcome.clone(),
            price: token.price.map_or_else(|| "-".to_string(), format::price),
            token_id: token.token_id.to_string(),
        }
    }
}

/// Full detail for a single market.
pub async fn market(ctx: &ClientContext, args: &MarketArgs) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyIdentifier.into());
    }

    let market = ctx.catalog().market(&MarketId::new(id)).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "market",
            "market": market,
        }));
        return Ok(());
    }

    print_market(&market);
    Ok(())
}

fn print_market(market: &Market) {
    output::section(&market.question);
    output::field("Market ID", &market.id);
    output::field("Condition ID", &market.condition_id);
    output::optional_field("Slug", market.slug.as_deref());
    output::field(
        "Status",
        format::market_status(market.active, market.closed, market.accepting_orders),
    );
    output::optional_field("Ends", market.end_date.as_deref());

    if !market.tokens.is_empty() {
        output::section("Outcomes");
        output::table(market.tokens.iter().map(OutcomeRow::from));
    }

    output::section("Trading");
    output::field("Best Bid", format::or_dash(market.best_bid.map(format::price)));
    output::field("Best Ask", format::or_dash(market.best_ask.map(format::price)));
    output::field("Spread", format::decimal_or_dash(market.spread));
    output::field("Tick Size", format::decimal_or_dash(market.tick_size));
    output::field("Min Order Size", format::decimal_or_dash(market.min_order_size));
    output::field("Neg Risk", format::or_dash(market.neg_risk));

    output::section("Activity");
    output::field("Volume", format::or_dash(market.volume.map(format::usd)));
    output::field("Volume 24h", format::or_dash(market.volume_24hr.map(format::usd)));
    output::field("Liquidity", format::or_dash(market.liquidity.map(format::usd)));

    if let Some(event) = market.events.first() {
        output::section("Event");
        output::field("Title", &event.title);
        output::optional_field("Slug", event.slug.as_deref());
        output::optional_field("Neg Risk", event.neg_risk);
        output::optional_field("Resolution", event.resolution_source.as_deref());
    }

    if let Some(description) = market.description.as_deref() {
        if output::verbosity() > 0 {
            output::section("Description");
            output::lines(description);
        }
    }
}

/// Resolve an identifier to token IDs, with shared or per-market parameters.
pub async fn token(ctx: &ClientContext, args: &TokenArgs) -> Result<()> {
    match resolve(ctx.catalog(), &args.identifier).await? {
        Target::Raw(id) => {
            if output::is_json() {
                output::json_output(json!({
                    "command": "token",
                    "kind": "raw",
                    "token_ids": [id],
                }));
                return Ok(());
            }
            output::field("Token ID", &id);
            output::note("Input looks like a raw ID; nothing was looked up");
            Ok(())
        }
        Target::Event(event) => {
            let params = reconcile_all(&event.markets);
            if output::is_json() {
                output::json_output(json!({
                    "command": "token",
                    "kind": "event",
                    "event": event,
                    "shared_params": params,
                }));
                return Ok(());
            }
            print_event(&event, &params);
            Ok(())
        }
    }
}

fn print_event(event: &ResolvedEvent, params: &SharedParams) {
    output::section(&event.title);
    output::field("Event ID", &event.id);
    output::field("Slug", &event.slug);
    output::field("Markets", event.groups.len());

    for (index, group) in event.groups.iter().enumerate() {
        let state = if group.active {
            String::new()
        } else {
            format!(" {}", output::muted("(inactive)"))
        };
        output::section(&format!("{}. {}{}", index + 1, group.question, state));
        output::field("Condition ID", &group.condition_id);
        for token_id in &group.token_ids {
            output::field("Token", output::highlight(token_id));
        }
    }

    let active = active_markets(&event.markets);
    if active.is_empty() {
        output::warning("No active markets in this event");
        return;
    }

    output::section("Parameters");
    for field in MarketField::ALL {
        if let Some(value) = params.get(field) {
            output::field(field.label(), value);
        }
    }
    for field in params.divergent() {
        output::field(field.label(), output::muted("per market"));
        for market in &active {
            output::field(
                &format!("  {}", format::truncate(&market.question, 40)),
                format::or_dash(market.field(field)),
            );
        }
    }
}
