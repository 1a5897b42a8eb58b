//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the pure application services and the
//! outside world. Adapters implement them for the live exchange; the
//! `testkit` module implements them in memory.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                  ▼                 ▼                  ▼
//! ┌─────────┐     ┌───────────┐     ┌───────────┐     ┌─────────────┐
//! │ Catalog │     │ PriceFeed │     │  Trading  │     │   Balance   │
//! │ (Gamma) │     │  (CLOB)   │     │   (SDK)   │     │  (on-chain) │
//! └─────────┘     └───────────┘     └───────────┘     └─────────────┘
//! ```

pub mod outbound;

pub use outbound::catalog::{EventQuery, MarketCatalog};
pub use outbound::pricing::PriceFeed;
pub use outbound::trading::TradingClient;
pub use outbound::wallet::BalanceSource;
