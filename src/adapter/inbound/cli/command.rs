//! Command-line interface definitions.
//!
//! Defines the CLI structure for pmctl using `clap`. Every subcommand
//! honors the global `--json`, `--quiet`, `--verbose`, `--color` and
//! `--config` flags.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::order::OrderType;

/// Prediction market CLI: resolve events, read books and prices, place and cancel orders
#[derive(Parser, Debug)]
#[command(name = "pmctl")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: pmctl.toml if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List events
    Events(EventsArgs),

    /// List tags
    Tags(TagsArgs),

    /// Search active events and tags
    Search(SearchArgs),

    /// Show full detail for one market
    Market(MarketArgs),

    /// Resolve an event slug, URL or raw ID to token IDs
    Token(TokenArgs),

    /// Show the order book for a token
    Book(TokenArg),

    /// Show the current ask, bid and midpoint for a token
    Price(TokenArg),

    /// Show price history for a token
    History(HistoryArgs),

    /// Place a buy order
    Buy(OrderArgs),

    /// Place a sell order
    Sell(OrderArgs),

    /// List open orders
    Orders(OrdersArgs),

    /// Cancel one order or every order in a market
    Cancel(CancelArgs),

    /// Show collateral (USDC) balance
    Balance,

    /// Show outcome-token position for a token
    Position(TokenArg),
}

/// Arguments for `pmctl events`.
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Maximum number of events to return.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Number of events to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Sort field (e.g. volume, liquidity, startDate).
    #[arg(long, visible_alias = "sort")]
    pub order: Option<String>,

    /// Sort ascending.
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Only events with this tag slug.
    #[arg(long)]
    pub tag_slug: Option<String>,

    /// Only events with this tag ID.
    #[arg(long)]
    pub tag_id: Option<String>,

    /// Only closed events.
    #[arg(long, conflicts_with = "all")]
    pub closed: bool,

    /// Include open and closed events.
    #[arg(long)]
    pub all: bool,

    /// Only featured events.
    #[arg(long)]
    pub featured: bool,
}

impl EventsArgs {
    /// Sort direction; `None` leaves the upstream default.
    #[must_use]
    pub fn ascending(&self) -> Option<bool> {
        match (self.asc, self.desc) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Closed filter: open only by default, no filter with `--all`.
    #[must_use]
    pub fn closed_filter(&self) -> Option<bool> {
        if self.all {
            None
        } else {
            Some(self.closed)
        }
    }
}

/// Arguments for `pmctl tags`.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Maximum number of tags to return.
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

/// Arguments for `pmctl search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search text.
    pub query: String,

    /// Maximum results per type.
    #[arg(long, default_value_t = 5)]
    pub limit: u32,
}

/// Arguments for `pmctl market`.
#[derive(Args, Debug)]
pub struct MarketArgs {
    /// Market ID.
    pub id: String,
}

/// Arguments for `pmctl token`.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Event slug, event URL, or raw token/market ID.
    pub identifier: String,
}

/// Shared argument for commands keyed by a single token.
#[derive(Args, Debug)]
pub struct TokenArg {
    /// Token ID.
    pub token: String,
}

/// Arguments for `pmctl history`.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Token ID.
    pub token: String,

    /// Relative window (1h, 6h, 1d, 1w, max). Defaults to 1d.
    #[arg(long)]
    pub interval: Option<String>,

    /// Sampling granularity in minutes.
    #[arg(long)]
    pub fidelity: Option<u32>,

    /// Range start (unix seconds). Requires --end.
    #[arg(long)]
    pub start: Option<i64>,

    /// Range end (unix seconds). Requires --start.
    #[arg(long)]
    pub end: Option<i64>,
}

/// Order type flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderTypeArg {
    /// Fill-or-kill at the current price; size is a dollar amount
    Market,
    /// Good-till-cancelled at --price; size is a share count
    #[default]
    Limit,
}

impl From<OrderTypeArg> for OrderType {
    fn from(arg: OrderTypeArg) -> Self {
        match arg {
            OrderTypeArg::Market => Self::Market,
            OrderTypeArg::Limit => Self::Limit,
        }
    }
}

/// Arguments for `pmctl buy` and `pmctl sell`.
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Token ID to trade.
    #[arg(long)]
    pub token: String,

    /// Price as a probability in (0, 1).
    #[arg(long)]
    pub price: Decimal,

    /// Dollars for market orders, shares for limit orders.
    #[arg(long)]
    pub size: Decimal,

    /// Order type.
    #[arg(long = "type", value_enum, default_value_t = OrderTypeArg::Limit)]
    pub order_type: OrderTypeArg,

    /// Market tick size (0.1, 0.01, 0.001, 0.0001).
    #[arg(long, default_value = "0.01")]
    pub tick: String,

    /// Market belongs to a neg-risk group.
    #[arg(long)]
    pub neg_risk: bool,
}

/// Arguments for `pmctl orders`.
#[derive(Args, Debug)]
pub struct OrdersArgs {
    /// Only orders for this token.
    #[arg(long, conflicts_with = "market")]
    pub token: Option<String>,

    /// Market ID, event slug, or event URL.
    #[arg(long)]
    pub market: Option<String>,
}

/// Arguments for `pmctl cancel`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CancelArgs {
    /// Order ID to cancel.
    #[arg(long)]
    pub order: Option<String>,

    /// Condition ID, event slug, or event URL; cancels every order in it.
    #[arg(long)]
    pub market: Option<String>,
}
