//! Error types for studio pricing

use thiserror::Error;

/// Main error type for pricing and negotiation
#[derive(Error, Debug)]
pub enum PricingError {
    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Undefined computation: {0}")]
    Domain(String),

    // Lookup errors
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Quote not found: {0}")]
    QuoteNotFound(String),

    // Negotiation errors
    #[error("Invalid negotiation state transition: {0}")]
    InvalidStateTransition(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PricingError {
    /// Malformed or out-of-range input rejected at the boundary
    pub fn is_input_error(&self) -> bool {
        matches!(self, PricingError::InvalidInput(_))
    }

    /// Mathematically undefined computation
    pub fn is_domain_error(&self) -> bool {
        matches!(self, PricingError::Domain(_))
    }
}

/// Result type alias for pricing operations
pub type Result<T> = std::result::Result<T, PricingError>;
