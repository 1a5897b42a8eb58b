//! Outbound adapters (driven side): implementations of outbound ports.

pub mod polymarket;
