//! Price reference commands: `price` and `history`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;

use super::command::{HistoryArgs, TokenArg};
use super::{format, output};
use crate::application::quote;
use crate::domain::id::TokenId;
use crate::domain::price::{HistoryQuery, HistoryWindow, PricePoint, Quote};
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&PricePoint> for PointRow {
    fn from(point: &PricePoint) -> Self {
        Self {
            time: format::timestamp(point.t),
            price: format::price(point.p),
        }
    }
}

/// Print a quote block. Shared with the trade commands.
pub(crate) fn print_quote(quote: &Quote) {
    output::field("Ask", format::price(quote.ask));
    output::field("Bid", format::price(quote.bid));
    output::field("Midpoint", format::price(quote.midpoint));
    output::field("Spread", quote.spread().normalize());
}

/// Current ask, bid and midpoint.
pub async fn price(ctx: &ClientContext, args: &TokenArg) -> Result<()> {
    let token_id = TokenId::new(args.token.trim());
    let quote = quote::quote(ctx.prices(), &token_id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "price",
            "token_id": token_id,
            "quote": quote,
            "spread": quote.spread(),
        }));
        return Ok(());
    }

    output::section(&format!("Price {}", output::highlight(&token_id)));
    print_quote(&quote);
    Ok(())
}

/// Price series with an open/close/high/low summary.
pub async fn history(ctx: &ClientContext, args: &HistoryArgs) -> Result<()> {
    let window = HistoryWindow::from_parts(args.interval.clone(), args.start, args.end)?;
    let query = HistoryQuery {
        token_id: TokenId::new(args.token.trim()),
        window,
        fidelity: args.fidelity,
    };

    let (points, summary) = quote::history(ctx.prices(), &query).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "token_id": query.token_id,
            "summary": summary,
            "history": points,
        }));
        return Ok(());
    }

    let Some(summary) = summary else {
        output::note("No price history for this window");
        return Ok(());
    };

    output::section(&format!("History {}", output::highlight(&query.token_id)));
    output::field("Points", summary.points);
    output::field(
        "Range",
        format!(
            "{} → {}",
            format::timestamp(summary.first_ts),
            format::timestamp(summary.last_ts)
        ),
    );
    output::field("Open", format::price(summary.open));
    output::field("Close", format::price(summary.close));
    output::field("High", format::price(summary.high));
    output::field("Low", format::price(summary.low));

    let change = format::signed(summary.change);
    let change = if summary.change < Decimal::ZERO {
        output::negative(change)
    } else {
        output::positive(change)
    };
    output::field("Change", change);
    output::field(
        "Change %",
        format::or_dash(summary.change_pct.map(|pct| format!("{}%", format::signed(pct.round_dp(2))))),
    );

    if output::verbosity() > 0 {
        output::section("Points");
        output::table(points.iter().map(PointRow::from));
    }
    Ok(())
}
