//! Application services (use cases).
//!
//! Pure functions and thin services over the ports. Nothing here knows
//! which exchange or transport sits behind a port.

pub mod book;
pub mod dispatch;
pub mod orders;
pub mod params;
pub mod quote;
pub mod resolver;

pub use dispatch::OrderDispatcher;
pub use params::{reconcile, reconcile_all, SharedParams};
pub use resolver::{classify, resolve, IdentifierKind, MarketGroup, ResolvedEvent, Target};
