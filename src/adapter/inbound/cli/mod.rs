//! CLI module graph.

pub mod book;
pub mod command;
pub mod discover;
pub mod format;
pub mod market;
pub mod orders;
pub mod output;
pub mod price;
pub mod run;
pub mod trade;
pub mod wallet;
