//! `book` command: sorted order book with summary.

use serde_json::json;
use tabled::Tabled;

use super::command::TokenArg;
use super::{format, output};
use crate::application::book::analyze;
use crate::domain::book::PriceLevel;
use crate::domain::id::TokenId;
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

/// Levels shown per side in human output.
const DISPLAY_DEPTH: usize = 10;

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Size")]
    size: String,
}

impl From<&PriceLevel> for LevelRow {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: format::price(level.price()),
            size: level.size().normalize().to_string(),
        }
    }
}

/// Show the sorted book for a token.
pub async fn book(ctx: &ClientContext, args: &TokenArg) -> Result<()> {
    let token_id = TokenId::new(args.token.trim());
    let book = ctx.prices().order_book(&token_id).await?;
    let analysis = analyze(&book);

    if output::is_json() {
        output::json_output(json!({
            "command": "book",
            "token_id": token_id,
            "market": book.market(),
            "crossed": analysis.is_crossed(),
            "book": analysis,
        }));
        return Ok(());
    }

    output::section(&format!("Order book {}", output::highlight(&token_id)));
    if analysis.is_crossed() {
        output::warning("Book is crossed (best bid above best ask); values shown as reported");
    }

    output::section(&format!(
        "Asks ({} levels, top {})",
        analysis.sorted_asks.len(),
        DISPLAY_DEPTH.min(analysis.sorted_asks.len())
    ));
    if analysis.sorted_asks.is_empty() {
        output::note("No asks");
    } else {
        output::table(analysis.sorted_asks.iter().take(DISPLAY_DEPTH).map(LevelRow::from));
    }

    output::section(&format!(
        "Bids ({} levels, top {})",
        analysis.sorted_bids.len(),
        DISPLAY_DEPTH.min(analysis.sorted_bids.len())
    ));
    if analysis.sorted_bids.is_empty() {
        output::note("No bids");
    } else {
        output::table(analysis.sorted_bids.iter().take(DISPLAY_DEPTH).map(LevelRow::from));
    }

    output::section("Summary");
    output::field("Best Bid", format::or_dash(analysis.best_bid.map(format::price)));
    output::field("Best Ask", format::or_dash(analysis.best_ask.map(format::price)));
    output::field("Spread", format::decimal_or_dash(analysis.spread));
    output::field("Midpoint", format::or_dash(analysis.midpoint.map(format::price)));
    output::field("Bid Depth", analysis.bid_depth.normalize());
    output::field("Ask Depth", analysis.ask_depth.normalize());
    Ok(())
}
