//! Negotiation engine manages all open quote negotiations

use crate::currency::CurrencyFormatter;
use crate::error::{PricingError, Result};
use crate::pricing::PriceResolver;
use crate::types::{QuoteId, ServiceId};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::session::NegotiationSession;
use super::types::{AcceptedQuote, NegotiationResult};

/// Negotiation engine over an injected price resolver and formatter
pub struct NegotiationEngine<R: PriceResolver> {
    resolver: R,
    formatter: CurrencyFormatter,
    sessions: HashMap<QuoteId, NegotiationSession>,
}

impl<R: PriceResolver> NegotiationEngine<R> {
    pub fn new(resolver: R, formatter: CurrencyFormatter) -> Self {
        Self {
            resolver,
            formatter,
            sessions: HashMap::new(),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    /// Open a negotiation for a quote.
    ///
    /// The original price defaults to the service's configured base price.
    pub fn open(
        &mut self,
        quote_id: QuoteId,
        service_id: ServiceId,
        original_price: Option<Decimal>,
    ) -> Result<&NegotiationSession> {
        if self.sessions.contains_key(&quote_id) {
            return Err(PricingError::InvalidStateTransition(format!(
                "Negotiation already open for quote {}",
                quote_id
            )));
        }

        let configuration = self.resolver.resolve(&service_id)?;
        let original_price = original_price.unwrap_or_else(|| configuration.base_price());
        let session =
            NegotiationSession::new(quote_id.clone(), service_id, original_price, configuration)?;

        tracing::info!(
            quote = %quote_id,
            service = %session.service_id(),
            original = %self.formatter.format(original_price),
            "Opened negotiation"
        );

        Ok(&*self.sessions.entry(quote_id).or_insert(session))
    }

    /// Evaluate and record a proposed price for a quote
    pub fn propose(
        &mut self,
        quote_id: &QuoteId,
        proposed_price: Decimal,
    ) -> Result<NegotiationResult> {
        let session = self
            .sessions
            .get_mut(quote_id)
            .ok_or_else(|| PricingError::QuoteNotFound(quote_id.0.clone()))?;

        let result = session.propose(proposed_price, &self.formatter)?;
        let fingerprint = session
            .latest_proposal()
            .map(|proposal| proposal.fingerprint.short())
            .unwrap_or_default();

        if result.is_valid {
            tracing::info!(
                quote = %quote_id,
                fingerprint = %fingerprint,
                price = %result.formatted_proposed_price,
                margin = %result.margin_percent.round_dp(4),
                "Proposal within guardrails"
            );
        } else {
            tracing::warn!(
                quote = %quote_id,
                fingerprint = %fingerprint,
                price = %result.formatted_proposed_price,
                constraint = ?result.violated_constraint,
                "Proposal rejected"
            );
        }

        Ok(result)
    }

    /// Accept the latest valid proposal; the caller persists the returned quote
    pub fn accept(&mut self, quote_id: &QuoteId) -> Result<AcceptedQuote> {
        let session = self
            .sessions
            .get_mut(quote_id)
            .ok_or_else(|| PricingError::QuoteNotFound(quote_id.0.clone()))?;

        let agreed_price = session.accept()?;
        let accepted = AcceptedQuote {
            quote_id: quote_id.clone(),
            service_id: session.service_id().clone(),
            original_price: session.original_price(),
            agreed_price,
            formatted_agreed_price: self.formatter.format(agreed_price),
            utility_delta: agreed_price - session.original_price(),
            opened_at: session.opened_at(),
        };

        tracing::info!(
            quote = %quote_id,
            price = %accepted.formatted_agreed_price,
            "Negotiation accepted"
        );

        Ok(accepted)
    }

    /// Cancel a negotiation
    pub fn cancel(&mut self, quote_id: &QuoteId, reason: String) -> Result<()> {
        let session = self
            .sessions
            .get_mut(quote_id)
            .ok_or_else(|| PricingError::QuoteNotFound(quote_id.0.clone()))?;

        session.cancel(reason.clone())?;
        tracing::info!(quote = %quote_id, reason = %reason, "Negotiation cancelled");
        Ok(())
    }

    /// Drop a session, returning it to the caller
    pub fn remove(&mut self, quote_id: &QuoteId) -> Option<NegotiationSession> {
        self.sessions.remove(quote_id)
    }

    /// Drop every accepted or cancelled session, returning how many were removed
    pub fn prune_finalized(&mut self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.state().is_active());
        let pruned = before - self.sessions.len();

        if pruned > 0 {
            tracing::debug!(
                pruned,
                remaining = self.sessions.len(),
                "Pruned finalized negotiations"
            );
        }
        pruned
    }

    /// Get a session
    pub fn session(&self, quote_id: &QuoteId) -> Option<&NegotiationSession> {
        self.sessions.get(quote_id)
    }

    /// Get all sessions
    pub fn sessions(&self) -> &HashMap<QuoteId, NegotiationSession> {
        &self.sessions
    }
}
