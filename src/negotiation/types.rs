//! Negotiation types and quote state machine

use crate::error::{PricingError, Result};
use crate::pricing::PriceConfiguration;
use crate::types::{Hash, QuoteId, ServiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A validated request to evaluate one proposed price.
///
/// `original_price` is non-negative and the configuration bounds are already
/// checked. `proposed_price` is kept as given; the calculator reports a
/// non-positive proposal as an undefined margin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NegotiationRequest")]
pub struct NegotiationInput {
    original_price: Decimal,
    proposed_price: Decimal,
    configuration: PriceConfiguration,
}

/// Untrusted negotiation request, e.g. a JSON body
#[derive(Clone, Debug, Deserialize)]
pub struct NegotiationRequest {
    pub original_price: Decimal,
    pub proposed_price: Decimal,
    pub configuration: PriceConfiguration,
}

impl TryFrom<NegotiationRequest> for NegotiationInput {
    type Error = PricingError;

    fn try_from(request: NegotiationRequest) -> Result<Self> {
        Self::new(
            request.original_price,
            request.proposed_price,
            request.configuration,
        )
    }
}

impl NegotiationInput {
    pub fn new(
        original_price: Decimal,
        proposed_price: Decimal,
        configuration: PriceConfiguration,
    ) -> Result<Self> {
        crate::pricing::types::ensure_non_negative("original_price", original_price)?;

        Ok(Self {
            original_price,
            proposed_price,
            configuration,
        })
    }

    pub fn original_price(&self) -> Decimal {
        self.original_price
    }

    pub fn proposed_price(&self) -> Decimal {
        self.proposed_price
    }

    pub fn configuration(&self) -> &PriceConfiguration {
        &self.configuration
    }

    /// Stable digest of the input; equal inputs (regardless of trailing
    /// zeros) share a fingerprint, so callers can cache results by it.
    pub fn fingerprint(&self) -> Hash {
        let canonical = format!(
            "{}|{}|{}|{}|{}|{}",
            self.original_price.normalize(),
            self.proposed_price.normalize(),
            self.configuration.base_price().normalize(),
            self.configuration.cost_basis().normalize(),
            self.configuration.min_margin().normalize(),
            self.configuration.max_discount().normalize(),
        );
        Hash::from_bytes(canonical.as_bytes())
    }
}

/// Guardrail broken by a proposed price
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolatedConstraint {
    None,
    BelowMinMargin,
    ExceedsMaxDiscount,
}

/// Outcome of evaluating a proposed price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationResult {
    pub is_valid: bool,
    /// `(original - proposed) / original`; negative for a surcharge
    pub discount_percent: Decimal,
    /// `(proposed - cost) / proposed`
    pub margin_percent: Decimal,
    pub original_utility: Decimal,
    pub proposed_utility: Decimal,
    /// Signed change in utility; negative is a loss
    pub utility_delta: Decimal,
    pub violated_constraint: ViolatedConstraint,
    pub formatted_proposed_price: String,
}

/// One evaluated proposal in a quote negotiation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub proposed_price: Decimal,
    pub result: NegotiationResult,
    pub fingerprint: Hash,
    pub proposed_at: SystemTime,
}

/// Quote negotiation state machine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationState {
    /// No proposal yet
    Open,
    /// Latest proposal is within the guardrails
    Proposed { latest: Decimal },
    /// Latest proposal broke a guardrail; a new proposal may follow
    Rejected { constraint: ViolatedConstraint },
    /// Terms agreed, ready for the caller to persist
    Accepted { agreed_price: Decimal },
    /// Negotiation abandoned
    Cancelled { reason: String },
}

impl NegotiationState {
    /// Check if negotiation is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NegotiationState::Accepted { .. } | NegotiationState::Cancelled { .. }
        )
    }

    /// Check if negotiation is active
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// An accepted negotiation, handed back to the caller for persistence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedQuote {
    pub quote_id: QuoteId,
    pub service_id: ServiceId,
    pub original_price: Decimal,
    pub agreed_price: Decimal,
    pub formatted_agreed_price: String,
    pub utility_delta: Decimal,
    pub opened_at: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> PriceConfiguration {
        PriceConfiguration::new(dec!(1000), dec!(600), dec!(0.30), dec!(0.15)).unwrap()
    }

    #[test]
    fn test_input_rejects_negative_original() {
        let err = NegotiationInput::new(dec!(-1000), dec!(900), config()).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_input_keeps_non_positive_proposal() {
        let input = NegotiationInput::new(dec!(1000), dec!(0), config()).unwrap();
        assert_eq!(input.proposed_price(), dec!(0));
    }

    #[test]
    fn test_fingerprint_ignores_trailing_zeros() {
        let a = NegotiationInput::new(dec!(1000), dec!(900), config()).unwrap();
        let b = NegotiationInput::new(dec!(1000.00), dec!(900.0), config()).unwrap();
        let c = NegotiationInput::new(dec!(1000), dec!(901), config()).unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "original_price": "1000",
            "proposed_price": "900",
            "configuration": {
                "base_price": "1000",
                "cost_basis": "600",
                "min_margin": "0.3",
                "max_discount": "0.15"
            }
        }"#;
        let input: NegotiationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.original_price(), dec!(1000));
        assert_eq!(input.configuration().cost_basis(), dec!(600));

        let negative = r#"{
            "original_price": "-1",
            "proposed_price": "900",
            "configuration": {
                "base_price": "1000",
                "cost_basis": "600",
                "min_margin": "0.3",
                "max_discount": "0.15"
            }
        }"#;
        assert!(serde_json::from_str::<NegotiationInput>(negative).is_err());
    }

    #[test]
    fn test_constraint_serialization() {
        let json = serde_json::to_string(&ViolatedConstraint::ExceedsMaxDiscount).unwrap();
        assert_eq!(json, "\"EXCEEDS_MAX_DISCOUNT\"");

        let parsed: ViolatedConstraint = serde_json::from_str("\"NONE\"").unwrap();
        assert_eq!(parsed, ViolatedConstraint::None);
    }

    #[test]
    fn test_state_terminal() {
        let cancelled = NegotiationState::Cancelled {
            reason: "cliente sin respuesta".to_string(),
        };
        assert!(cancelled.is_terminal());
        assert!(!cancelled.is_active());

        let rejected = NegotiationState::Rejected {
            constraint: ViolatedConstraint::BelowMinMargin,
        };
        assert!(rejected.is_active());
        assert!(NegotiationState::Open.is_active());
    }
}
