//! CLI module for studio pricing

pub mod app;
pub mod commands;

pub use app::{CatalogLine, NegotiationOutcome, PricingApp};
pub use commands::{Cli, Commands};
