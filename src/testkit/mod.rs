//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fake`]: In-memory implementations of every outbound port:
//!   `FakeCatalog`, `FakePriceFeed`, `FakeTrader`, `FakeWallet`.
//! - [`domain`]: Builders for domain primitives: tokens, markets, events,
//!   books and open orders.

pub mod domain;
pub mod fake;
