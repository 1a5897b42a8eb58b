//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - CLI driving the application services
//! - [`outbound`] - Polymarket REST, SDK and on-chain adapters

pub mod inbound;
pub mod outbound;
