//! Studio pricing library
//!
//! Pricing guardrails for photography-studio quotes:
//! - Base (list) price computation from cost, utility margin and commission
//! - Negotiation evaluation: discount, margin and utility impact of a proposed price
//! - Per-quote negotiation sessions on top of an injected price resolver
//! - Currency display in the studio's locale convention

pub mod cli;
pub mod config;
pub mod currency;
pub mod error;
pub mod negotiation;
pub mod pricing;
pub mod types;

// Re-export commonly used types and functions
pub use currency::CurrencyFormatter;
pub use error::{PricingError, Result};
pub use negotiation::{
    evaluate, evaluate_negotiation, NegotiationInput, NegotiationResult, ViolatedConstraint,
};
pub use pricing::{calculate_price, PriceCatalog, PriceConfiguration, PriceResolver};
