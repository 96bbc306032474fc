//! Studio pricing application wiring configuration, catalog and engine

use crate::config::StudioConfig;
use crate::currency::CurrencyFormatter;
use crate::error::Result;
use crate::negotiation::{evaluate, AcceptedQuote, NegotiationEngine, NegotiationResult};
use crate::pricing::{
    calculate_price, PriceBreakdown, PriceCatalog, PriceConfiguration, PricingPolicy,
};
use crate::types::{QuoteId, ServiceId};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;

/// Result of a one-shot catalog negotiation
#[derive(Clone, Debug, Serialize)]
pub struct NegotiationOutcome {
    pub quote_id: QuoteId,
    pub result: NegotiationResult,
    /// Present when the proposal was within the guardrails
    pub accepted: Option<AcceptedQuote>,
}

/// One catalog line for display
#[derive(Clone, Debug, Serialize)]
pub struct CatalogLine {
    pub id: String,
    pub name: String,
    pub base_price: String,
    pub min_margin: Decimal,
    pub max_discount: Decimal,
}

/// Main studio pricing application
pub struct PricingApp {
    config: StudioConfig,
    engine: NegotiationEngine<PriceCatalog>,
}

impl PricingApp {
    /// Create an application from a validated configuration
    pub fn new(config: StudioConfig) -> Result<Self> {
        let catalog = config.catalog()?;
        let formatter = config.formatter();

        tracing::debug!(
            studio = %config.studio.name,
            currency = %formatter.style().code,
            services = catalog.len(),
            "Studio pricing ready"
        );

        Ok(Self {
            engine: NegotiationEngine::new(catalog, formatter),
            config,
        })
    }

    /// Load configuration from a file, or use the default studio
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => StudioConfig::from_file(path)?,
            None => {
                tracing::debug!("No configuration file given, using default studio");
                StudioConfig::default()
            }
        };
        Self::new(config)
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        self.engine.formatter()
    }

    /// Evaluate a proposal against explicit guardrails; the original price is
    /// taken as the base price
    pub fn evaluate(
        &self,
        original: Decimal,
        proposed: Decimal,
        cost: Decimal,
        min_margin: Decimal,
        max_discount: Decimal,
    ) -> Result<NegotiationResult> {
        let configuration = PriceConfiguration::new(original, cost, min_margin, max_discount)?;
        evaluate(original, proposed, configuration, self.formatter())
    }

    /// Open a quote for a catalog service, propose a price, and accept it if
    /// it holds up; otherwise the quote is cancelled with the broken guardrail
    pub fn negotiate(
        &mut self,
        service: &str,
        proposed: Decimal,
        original: Option<Decimal>,
    ) -> Result<NegotiationOutcome> {
        let quote_id = QuoteId::generate();
        self.engine
            .open(quote_id.clone(), ServiceId::new(service), original)?;

        let result = self.engine.propose(&quote_id, proposed)?;
        let accepted = if result.is_valid {
            Some(self.engine.accept(&quote_id)?)
        } else {
            self.engine.cancel(
                &quote_id,
                format!("{:?}", result.violated_constraint),
            )?;
            None
        };

        Ok(NegotiationOutcome {
            quote_id,
            result,
            accepted,
        })
    }

    /// List price for a cost, with policy overrides
    pub fn price(
        &self,
        cost: Decimal,
        margin: Option<Decimal>,
        commission: Option<Decimal>,
    ) -> Result<PriceBreakdown> {
        let defaults = &self.config.policy;
        let policy = PricingPolicy::new(
            margin.unwrap_or(defaults.utility_margin),
            commission.unwrap_or(defaults.commission),
        )?;
        calculate_price(cost, &policy)
    }

    /// Catalog services with formatted base prices
    pub fn catalog(&self) -> Vec<CatalogLine> {
        self.engine
            .resolver()
            .entries()
            .map(|entry| CatalogLine {
                id: entry.id.to_string(),
                name: entry.name.clone(),
                base_price: self.formatter().format(entry.configuration.base_price()),
                min_margin: entry.configuration.min_margin(),
                max_discount: entry.configuration.max_discount(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::negotiation::ViolatedConstraint;
    use rust_decimal_macros::dec;

    fn app() -> PricingApp {
        let config = StudioConfig::from_toml_str(
            r#"
[studio]
name = "Estudio Luz"

[policy]
utility_margin = 0.25

[[services]]
id = "boda"
name = "Boda"
base_price = 1000
cost_basis = 600
min_margin = 0.30
max_discount = 0.15
"#,
        )
        .unwrap();
        PricingApp::new(config).unwrap()
    }

    #[test]
    fn test_default_app() {
        let app = PricingApp::from_path(None).unwrap();
        assert!(app.catalog().is_empty());
        assert_eq!(app.formatter().style().code, "MXN");
    }

    #[test]
    fn test_evaluate() {
        let app = app();
        let result = app
            .evaluate(dec!(1000), dec!(650), dec!(600), dec!(0.30), dec!(0.15))
            .unwrap();
        assert_eq!(result.violated_constraint, ViolatedConstraint::ExceedsMaxDiscount);

        let err = app
            .evaluate(dec!(1000), dec!(900), dec!(600), dec!(2), dec!(0.15))
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_negotiate_accepts_valid_proposal() {
        let mut app = app();
        let outcome = app.negotiate("boda", dec!(900), None).unwrap();

        assert!(outcome.result.is_valid);
        let accepted = outcome.accepted.unwrap();
        assert_eq!(accepted.agreed_price, dec!(900));
        assert_eq!(accepted.original_price, dec!(1000));
    }

    #[test]
    fn test_negotiate_rejects_invalid_proposal() {
        let mut app = app();
        let outcome = app.negotiate("boda", dec!(620), Some(dec!(700))).unwrap();

        assert!(!outcome.result.is_valid);
        assert_eq!(outcome.result.violated_constraint, ViolatedConstraint::BelowMinMargin);
        assert!(outcome.accepted.is_none());
    }

    #[test]
    fn test_negotiate_unknown_service() {
        let mut app = app();
        let err = app.negotiate("xv-anos", dec!(900), None).unwrap_err();
        assert!(matches!(err, PricingError::ServiceNotFound(_)));
    }

    #[test]
    fn test_price_uses_policy_defaults() {
        let app = app();
        assert_eq!(app.price(dec!(600), None, None).unwrap().total, dec!(800));
        assert_eq!(app.price(dec!(600), Some(dec!(0.40)), None).unwrap().total, dec!(1000));
    }

    #[test]
    fn test_catalog_lines() {
        let app = app();
        let lines = app.catalog();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "boda");
        assert_eq!(lines[0].base_price, "$1,000.00");
        assert_eq!(app.config().studio.name, "Estudio Luz");
    }
}
