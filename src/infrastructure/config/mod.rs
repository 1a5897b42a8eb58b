//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;
pub mod wallet;

pub use settings::{Config, DEFAULT_CONFIG_PATH};
