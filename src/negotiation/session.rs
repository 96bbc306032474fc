//! Negotiation session for a single quote

use crate::currency::CurrencyFormatter;
use crate::error::{PricingError, Result};
use crate::pricing::PriceConfiguration;
use crate::types::{QuoteId, ServiceId};
use rust_decimal::Decimal;
use std::time::SystemTime;

use super::calculator::evaluate_negotiation;
use super::types::{NegotiationInput, NegotiationResult, NegotiationState, Proposal};

/// A quote under negotiation between the studio and a client
#[derive(Clone, Debug)]
pub struct NegotiationSession {
    quote_id: QuoteId,
    service_id: ServiceId,
    original_price: Decimal,
    configuration: PriceConfiguration,
    state: NegotiationState,
    proposals: Vec<Proposal>,
    opened_at: SystemTime,
}

impl NegotiationSession {
    /// Open a session; the original price must be non-negative
    pub fn new(
        quote_id: QuoteId,
        service_id: ServiceId,
        original_price: Decimal,
        configuration: PriceConfiguration,
    ) -> Result<Self> {
        crate::pricing::types::ensure_non_negative("original_price", original_price)?;

        Ok(Self {
            quote_id,
            service_id,
            original_price,
            configuration,
            state: NegotiationState::Open,
            proposals: Vec::new(),
            opened_at: SystemTime::now(),
        })
    }

    pub fn quote_id(&self) -> &QuoteId {
        &self.quote_id
    }

    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn original_price(&self) -> Decimal {
        self.original_price
    }

    pub fn configuration(&self) -> &PriceConfiguration {
        &self.configuration
    }

    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn opened_at(&self) -> SystemTime {
        self.opened_at
    }

    /// Evaluate and record a proposed price.
    ///
    /// A proposal within the guardrails moves the session to `Proposed`; one
    /// that breaks a guardrail moves it to `Rejected`. Undefined proposals
    /// (price <= 0) are returned as errors and leave the session untouched.
    pub fn propose(
        &mut self,
        proposed_price: Decimal,
        formatter: &CurrencyFormatter,
    ) -> Result<NegotiationResult> {
        if self.state.is_terminal() {
            return Err(PricingError::InvalidStateTransition(
                "Cannot add proposal to terminal state".to_string(),
            ));
        }

        let input = NegotiationInput::new(
            self.original_price,
            proposed_price,
            self.configuration.clone(),
        )?;
        let result = evaluate_negotiation(&input, formatter)?;

        self.state = if result.is_valid {
            NegotiationState::Proposed {
                latest: proposed_price,
            }
        } else {
            NegotiationState::Rejected {
                constraint: result.violated_constraint,
            }
        };

        self.proposals.push(Proposal {
            proposed_price,
            result: result.clone(),
            fingerprint: input.fingerprint(),
            proposed_at: SystemTime::now(),
        });

        Ok(result)
    }

    /// Accept the latest valid proposal; returns the agreed price
    pub fn accept(&mut self) -> Result<Decimal> {
        let agreed_price = match &self.state {
            NegotiationState::Proposed { latest } => *latest,
            NegotiationState::Open => {
                return Err(PricingError::InvalidStateTransition(
                    "No proposals yet".to_string(),
                ))
            }
            NegotiationState::Rejected { constraint } => {
                return Err(PricingError::InvalidStateTransition(format!(
                    "Latest proposal was rejected: {:?}",
                    constraint
                )))
            }
            NegotiationState::Accepted { .. } | NegotiationState::Cancelled { .. } => {
                return Err(PricingError::InvalidStateTransition(
                    "Negotiation already finalized".to_string(),
                ))
            }
        };

        self.state = NegotiationState::Accepted { agreed_price };
        Ok(agreed_price)
    }

    /// Cancel negotiation
    pub fn cancel(&mut self, reason: String) -> Result<()> {
        if self.state.is_terminal() {
            return Err(PricingError::InvalidStateTransition(
                "Negotiation already finalized".to_string(),
            ));
        }

        self.state = NegotiationState::Cancelled { reason };
        Ok(())
    }

    /// Check if negotiation is complete
    pub fn is_accepted(&self) -> bool {
        matches!(self.state, NegotiationState::Accepted { .. })
    }

    /// Check if negotiation is cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, NegotiationState::Cancelled { .. })
    }

    /// Latest proposal, valid or not
    pub fn latest_proposal(&self) -> Option<&Proposal> {
        self.proposals.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::types::ViolatedConstraint;
    use rust_decimal_macros::dec;

    fn session() -> NegotiationSession {
        let configuration =
            PriceConfiguration::new(dec!(1000), dec!(600), dec!(0.30), dec!(0.15)).unwrap();
        NegotiationSession::new(
            QuoteId("quote_1".to_string()),
            ServiceId::new("boda"),
            dec!(1000),
            configuration,
        )
        .unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.state(), &NegotiationState::Open);
        assert_eq!(session.service_id().as_str(), "boda");
        assert!(session.proposals().is_empty());
        assert!(!session.is_accepted());
    }

    #[test]
    fn test_negative_original_rejected() {
        let configuration =
            PriceConfiguration::new(dec!(1000), dec!(600), dec!(0.30), dec!(0.15)).unwrap();
        let result = NegotiationSession::new(
            QuoteId("quote_2".to_string()),
            ServiceId::new("boda"),
            dec!(-1),
            configuration,
        );
        assert!(result.unwrap_err().is_input_error());
    }

    #[test]
    fn test_valid_proposal_then_accept() {
        let mut session = session();
        let formatter = CurrencyFormatter::default();

        let result = session.propose(dec!(900), &formatter).unwrap();
        assert!(result.is_valid);
        assert_eq!(session.state(), &NegotiationState::Proposed { latest: dec!(900) });

        let agreed = session.accept().unwrap();
        assert_eq!(agreed, dec!(900));
        assert!(session.is_accepted());
    }

    #[test]
    fn test_rejected_proposal_can_be_revised() {
        let mut session = session();
        let formatter = CurrencyFormatter::default();

        session.propose(dec!(650), &formatter).unwrap();
        assert_eq!(
            session.state(),
            &NegotiationState::Rejected {
                constraint: ViolatedConstraint::ExceedsMaxDiscount
            }
        );
        assert!(session.accept().is_err());

        session.propose(dec!(880), &formatter).unwrap();
        assert_eq!(session.proposals().len(), 2);
        assert_eq!(session.latest_proposal().unwrap().proposed_price, dec!(880));
        assert_eq!(session.accept().unwrap(), dec!(880));
    }

    #[test]
    fn test_undefined_proposal_leaves_session_untouched() {
        let mut session = session();
        let formatter = CurrencyFormatter::default();

        let err = session.propose(dec!(0), &formatter).unwrap_err();
        assert!(err.is_domain_error());
        assert_eq!(session.state(), &NegotiationState::Open);
        assert!(session.proposals().is_empty());
    }

    #[test]
    fn test_accept_without_proposals() {
        let mut session = session();
        assert!(matches!(
            session.accept(),
            Err(PricingError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_cancel() {
        let mut session = session();
        session.cancel("Cliente eligió otro estudio".to_string()).unwrap();

        assert!(session.is_cancelled());
        assert!(!session.is_accepted());
        assert!(session.propose(dec!(900), &CurrencyFormatter::default()).is_err());
    }

    #[test]
    fn test_cannot_change_after_accept() {
        let mut session = session();
        let formatter = CurrencyFormatter::default();

        session.propose(dec!(950), &formatter).unwrap();
        session.accept().unwrap();

        assert!(session.propose(dec!(900), &formatter).is_err());
        assert!(session.cancel("late".to_string()).is_err());
        assert!(session.accept().is_err());
    }

    #[test]
    fn test_proposal_fingerprints() {
        let mut session = session();
        let formatter = CurrencyFormatter::default();

        session.propose(dec!(900), &formatter).unwrap();
        session.propose(dec!(900.00), &formatter).unwrap();
        session.propose(dec!(910), &formatter).unwrap();

        let proposals = session.proposals();
        assert_eq!(proposals[0].fingerprint, proposals[1].fingerprint);
        assert_ne!(proposals[0].fingerprint, proposals[2].fingerprint);
    }
}
