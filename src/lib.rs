//! pmctl - prediction market command-line toolkit.
//!
//! Turns loose identifiers (event slugs, URLs, raw IDs) into token IDs and
//! market parameters, summarizes books and price history, and places or
//! cancels orders on the Polymarket CLOB after a balance preflight.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Plain data and invariants: markets, books, typed order sizes
//! - [`port`] - Traits for the market catalog, price feed, trading client and balances
//! - [`application`] - Resolution, parameter reconciliation, book analysis, quotes, dispatch
//! - [`adapter`] - CLI (inbound) and Polymarket REST/SDK/on-chain (outbound)
//! - [`infrastructure`] - Configuration, logging and the client context
//!
//! # Features
//!
//! - `polymarket` (default) - Authenticated trading and on-chain balances
//! - `testkit` - In-memory fakes of every port for integration tests
//!
//! # Example
//!
//! ```
//! use pmctl::application::resolver::{classify, IdentifierKind};
//!
//! assert_eq!(classify("bitcoin-up-or-down"), IdentifierKind::Slug);
//! assert_eq!(classify("123456789012"), IdentifierKind::Raw);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
