//! Polymarket integration.
//!
//! - [`gamma`] / [`clob`]: public REST reads over a shared [`client::RestClient`]
//! - [`executor`]: authenticated order execution via the SDK (feature `polymarket`)
//! - [`wallet`]: on-chain balances via alloy (feature `polymarket`)

pub mod client;
pub mod clob;
pub mod dto;
#[cfg(feature = "polymarket")]
pub mod executor;
pub mod gamma;
pub mod settings;
#[cfg(feature = "polymarket")]
pub mod wallet;

pub use client::RestClient;
pub use clob::ClobPriceFeed;
#[cfg(feature = "polymarket")]
pub use executor::PolymarketTrader;
pub use gamma::GammaCatalog;
#[cfg(feature = "polymarket")]
pub use wallet::ChainWallet;
