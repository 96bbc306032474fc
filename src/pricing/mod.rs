//! Base prices and per-service pricing guardrails

pub mod base_price;
pub mod resolver;
pub mod types;

pub use base_price::calculate_price;
pub use resolver::{PriceCatalog, PriceResolver};
pub use types::{PriceBreakdown, PriceConfiguration, PricingPolicy, ServiceEntry};
