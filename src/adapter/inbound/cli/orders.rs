//! Open-order inspection and cancellation: `orders`, `cancel`.

use serde_json::json;
use tabled::Tabled;

use super::command::{CancelArgs, OrdersArgs};
use super::{format, output};
use crate::application::orders::{open_orders_for_tokens, summarize};
use crate::application::resolver::{resolve, Target};
use crate::domain::error::ValidationError;
use crate::domain::id::{ConditionId, OrderId, TokenId};
use crate::domain::order::{CancelReport, OpenOrder, OrderFilter};
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order ID")]
    id: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Type")]
    order_type: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Matched")]
    matched: String,
    #[tabled(rename = "Token")]
    token: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&OpenOrder> for OrderRow {
    fn from(order: &OpenOrder) -> Self {
        Self {
            id: format::truncate(order.id.as_str(), 14),
            side: order.side.clone(),
            order_type: format::or_dash(order.order_type.as_deref()),
            price: format::cents(order.price),
            size: order.original_size.normalize().to_string(),
            matched: order.size_matched.normalize().to_string(),
            token: format::truncate(order.asset_id.as_str(), 14),
            status: order.status.clone(),
            created: format::or_dash(order.created_at.map(format::timestamp)),
        }
    }
}

/// Which open orders to list.
enum Scope {
    All,
    Token(TokenId),
    Tokens { title: String, tokens: Vec<TokenId> },
}

/// List open orders, optionally scoped to a token or an event.
pub async fn orders(ctx: &ClientContext, args: &OrdersArgs) -> Result<()> {
    let scope = match (&args.token, &args.market) {
        (Some(token), _) => Scope::Token(TokenId::new(token.trim())),
        (None, Some(market)) => match resolve(ctx.catalog(), market).await? {
            Target::Raw(id) => Scope::Token(TokenId::new(id)),
            Target::Event(event) => Scope::Tokens {
                title: event.title,
                tokens: event.token_ids,
            },
        },
        (None, None) => Scope::All,
    };

    let session = ctx.trading().await?;
    let trader = session.trader();

    let (label, orders) = match scope {
        Scope::All => ("all markets".to_string(), trader.open_orders(&OrderFilter::default()).await?),
        Scope::Token(token) => (
            format!("token {token}"),
            trader.open_orders(&OrderFilter::asset(token)).await?,
        ),
        Scope::Tokens { title, tokens } => {
            (title, open_orders_for_tokens(trader, &tokens).await?)
        }
    };

    let summary = summarize(&orders);

    if output::is_json() {
        output::json_output(json!({
            "command": "orders",
            "scope": label,
            "summary": summary,
            "orders": orders,
        }));
        return Ok(());
    }

    if orders.is_empty() {
        output::note(&format!("No open orders ({label})"));
        return Ok(());
    }

    output::section(&format!("Open orders: {label}"));
    output::table(orders.iter().map(OrderRow::from));
    output::field("Total", summary.total);
    output::field("Buy", output::positive(summary.buy));
    output::field("Sell", output::negative(summary.sell));
    Ok(())
}

/// Cancel one order, or every order in one or more markets.
pub async fn cancel(ctx: &ClientContext, args: &CancelArgs) -> Result<()> {
    let (label, report) = match (&args.order, &args.market) {
        (Some(order), _) => {
            let order_id = order.trim();
            if order_id.is_empty() {
                return Err(ValidationError::MissingArgument { name: "order" }.into());
            }
            let order_id = OrderId::new(order_id);
            let session = ctx.trading().await?;
            let report = session.dispatcher().cancel_one(&order_id).await?;
            (format!("order {order_id}"), report)
        }
        (None, Some(market)) => {
            let (label, markets) = match resolve(ctx.catalog(), market).await? {
                Target::Raw(id) => (format!("market {id}"), vec![ConditionId::new(id)]),
                Target::Event(event) => {
                    let markets: Vec<ConditionId> = event
                        .groups
                        .iter()
                        .map(|g| g.condition_id.clone())
                        .filter(|c| !c.as_str().is_empty())
                        .collect();
                    (event.title, markets)
                }
            };
            let session = ctx.trading().await?;
            let report = session
                .dispatcher()
                .cancel_all_for_markets(markets.iter())
                .await?;
            (label, report)
        }
        (None, None) => return Err(ValidationError::MissingArgument { name: "order" }.into()),
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "cancel",
            "scope": label,
            "partial": report.is_partial(),
            "canceled": report.canceled,
            "not_canceled": report.not_canceled,
            "failed_markets": report.failed_markets,
        }));
        return Ok(());
    }

    print_report(&label, &report);
    Ok(())
}

fn print_report(label: &str, report: &CancelReport) {
    if report.is_empty() {
        output::note(&format!("No orders to cancel ({label})"));
        return;
    }

    output::section(&format!("Cancel: {label}"));
    for order_id in &report.canceled {
        output::success(&format!("Canceled {order_id}"));
    }
    for failed in &report.not_canceled {
        output::warning(&format!("Not canceled {}: {}", failed.order_id, failed.reason));
    }
    for failed in &report.failed_markets {
        output::warning(&format!("Market {} not canceled: {}", failed.market, failed.reason));
    }

    output::field("Canceled", output::positive(report.canceled.len()));
    output::field("Not canceled", output::negative(report.not_canceled.len()));
    if !report.failed_markets.is_empty() {
        output::field("Failed markets", output::negative(report.failed_markets.len()));
    }
    if report.is_partial() {
        output::warning("Cancellation partially succeeded");
    }
}
