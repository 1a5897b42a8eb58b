//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod catalog;
pub mod pricing;
pub mod trading;
pub mod wallet;
