//! `buy` and `sell` commands.
//!
//! Arguments are validated into an [`OrderRequest`] before any network
//! call. A price reference is shown next, then the order goes through the
//! dispatcher's balance preflight and submission.

use serde_json::json;

use super::command::OrderArgs;
use super::price::print_quote;
use super::{format, output};
use crate::application::quote;
use crate::domain::id::TokenId;
use crate::domain::order::{DispatchOutcome, OrderKind, OrderRequest, Side, TickSize};
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

/// Turn raw flags into a validated request.
///
/// # Errors
///
/// Returns a validation error for a bad tick size, price or size.
pub fn build_request(side: Side, args: &OrderArgs) -> Result<OrderRequest> {
    let tick_size: TickSize = args.tick.parse()?;
    let request = OrderRequest::new(
        TokenId::new(args.token.trim()),
        side,
        args.price,
        args.order_type.into(),
        args.size,
        tick_size,
        args.neg_risk,
    )?;
    Ok(request)
}

fn describe(request: &OrderRequest) -> String {
    match request.kind() {
        OrderKind::Market { amount } => format!(
            "market {} {} at up to {}",
            request.side(),
            format::usd(amount.value()),
            format::price(request.price())
        ),
        OrderKind::Limit { shares, .. } => format!(
            "limit {} {} shares @ {}",
            request.side(),
            shares,
            format::price(request.price())
        ),
    }
}

/// Place an order on one side of the book.
pub async fn place(ctx: &ClientContext, side: Side, args: &OrderArgs) -> Result<()> {
    let request = build_request(side, args)?;

    let reference = quote::quote(ctx.prices(), request.token_id()).await?;
    if !output::is_json() {
        output::section(&format!("Price reference {}", output::highlight(request.token_id())));
        print_quote(&reference);
    }

    let session = ctx.trading().await?;
    let dispatcher = session.dispatcher();

    if !output::is_json() {
        output::section("Order");
        output::action("Submitting", &describe(&request));
    }

    let outcome = dispatcher.dispatch(&request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": side.as_str().to_ascii_lowercase(),
            "order": request.payload(),
            "notional": request.notional(),
            "quote": reference,
            "result": outcome,
        }));
        return Ok(());
    }

    match outcome {
        DispatchOutcome::Confirmed { order_id, status } => {
            output::success(&format!("Order submitted: {}", output::highlight(&order_id)));
            output::field("Status", format::or_dash(status));
        }
        DispatchOutcome::Rejected { reason, status } => {
            output::warning(&format!("Order rejected by exchange: {reason}"));
            output::optional_field("Status", status);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    use crate::adapter::inbound::cli::command::{Cli, Commands};
    use crate::domain::order::BalanceAsset;
    use crate::error::Error;

    fn order_args(extra: &[&str]) -> OrderArgs {
        let argv = ["pmctl", "buy"].iter().chain(extra.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Buy(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn limit_buy_requires_price_times_size() {
        let args = order_args(&["--token", "123", "--price", "0.65", "--size", "100"]);
        let request = build_request(Side::Buy, &args).unwrap();

        let requirement = request.requirement();
        assert_eq!(requirement.asset, BalanceAsset::Collateral);
        assert_eq!(requirement.amount, dec!(65.00));
    }

    #[test]
    fn market_buy_requires_size() {
        let args = order_args(&[
            "--token", "123", "--price", "0.65", "--size", "50", "--type", "market",
        ]);
        let request = build_request(Side::Buy, &args).unwrap();
        assert_eq!(request.requirement().amount, dec!(50));
    }

    #[test]
    fn price_above_one_is_rejected() {
        let args = order_args(&["--token", "123", "--price", "1.5", "--size", "10"]);
        assert!(matches!(
            build_request(Side::Buy, &args),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn unknown_tick_is_rejected() {
        let args = order_args(&[
            "--token", "123", "--price", "0.5", "--size", "10", "--tick", "0.05",
        ]);
        assert!(matches!(
            build_request(Side::Buy, &args),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn limit_price_off_tick_is_rejected() {
        let args = order_args(&["--token", "123", "--price", "0.655", "--size", "10"]);
        assert!(build_request(Side::Buy, &args).is_err());

        let args = order_args(&[
            "--token", "123", "--price", "0.655", "--size", "10", "--tick", "0.001",
        ]);
        assert!(build_request(Side::Buy, &args).is_ok());
    }
}
