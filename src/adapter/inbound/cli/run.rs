//! Command dispatch.

use tracing::debug;

use super::command::Commands;
use super::{book, discover, market, orders, price, trade, wallet};
use crate::domain::order::Side;
use crate::error::Result;
use crate::infrastructure::context::ClientContext;

/// Run one subcommand against the context.
pub async fn execute(command: &Commands, ctx: &ClientContext) -> Result<()> {
    debug!(?command, "Executing command");

    match command {
        Commands::Events(args) => discover::events(ctx, args).await,
        Commands::Tags(args) => discover::tags(ctx, args).await,
        Commands::Search(args) => discover::search(ctx, args).await,
        Commands::Market(args) => market::market(ctx, args).await,
        Commands::Token(args) => market::token(ctx, args).await,
        Commands::Book(args) => book::book(ctx, args).await,
        Commands::Price(args) => price::price(ctx, args).await,
        Commands::History(args) => price::history(ctx, args).await,
        Commands::Buy(args) => trade::place(ctx, Side::Buy, args).await,
        Commands::Sell(args) => trade::place(ctx, Side::Sell, args).await,
        Commands::Orders(args) => orders::orders(ctx, args).await,
        Commands::Cancel(args) => orders::cancel(ctx, args).await,
        Commands::Balance => wallet::balance(ctx).await,
        Commands::Position(args) => wallet::position(ctx, args).await,
    }
}
