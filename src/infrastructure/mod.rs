//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, env overrides and logging setup
//! - [`context`] - Composition root wiring adapters into command handlers

pub mod config;
pub mod context;

pub use context::{ClientContext, TradingSession};
