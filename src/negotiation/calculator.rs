//! Negotiation price calculator
//!
//! A pure function of its input: no I/O, no logging, no shared state.

use crate::currency::CurrencyFormatter;
use crate::error::{PricingError, Result};
use crate::pricing::PriceConfiguration;
use rust_decimal::Decimal;

use super::types::{NegotiationInput, NegotiationResult, ViolatedConstraint};

/// Evaluate a proposed price against the configured guardrails.
///
/// The discount bound is checked before the margin bound, so a proposal that
/// breaks both reports `ExceedsMaxDiscount`.
pub fn evaluate_negotiation(
    input: &NegotiationInput,
    formatter: &CurrencyFormatter,
) -> Result<NegotiationResult> {
    let original = input.original_price();
    let proposed = input.proposed_price();
    let config = input.configuration();

    if proposed <= Decimal::ZERO {
        return Err(PricingError::Domain(format!(
            "margin is undefined for proposed price {}",
            proposed
        )));
    }

    let discount_percent = if original.is_zero() {
        Decimal::ZERO
    } else {
        checked(
            original
                .checked_sub(proposed)
                .and_then(|reduction| reduction.checked_div(original)),
            "discount",
        )?
    };

    let original_utility = checked(original.checked_sub(config.cost_basis()), "original utility")?;
    let proposed_utility = checked(proposed.checked_sub(config.cost_basis()), "proposed utility")?;
    let utility_delta = checked(proposed_utility.checked_sub(original_utility), "utility delta")?;
    let margin_percent = checked(proposed_utility.checked_div(proposed), "margin")?;

    let violated_constraint = if discount_percent > config.max_discount() {
        ViolatedConstraint::ExceedsMaxDiscount
    } else if margin_percent < config.min_margin() {
        ViolatedConstraint::BelowMinMargin
    } else {
        ViolatedConstraint::None
    };

    Ok(NegotiationResult {
        is_valid: violated_constraint == ViolatedConstraint::None,
        discount_percent,
        margin_percent,
        original_utility,
        proposed_utility,
        utility_delta,
        violated_constraint,
        formatted_proposed_price: formatter.format(proposed),
    })
}

/// Overflowing `Decimal` arithmetic is reported rather than panicking
fn checked(value: Option<Decimal>, quantity: &str) -> Result<Decimal> {
    value.ok_or_else(|| {
        PricingError::Domain(format!("{} is outside the representable decimal range", quantity))
    })
}

/// Validate raw prices and evaluate them in one step
pub fn evaluate(
    original_price: Decimal,
    proposed_price: Decimal,
    configuration: PriceConfiguration,
    formatter: &CurrencyFormatter,
) -> Result<NegotiationResult> {
    let input = NegotiationInput::new(original_price, proposed_price, configuration)?;
    evaluate_negotiation(&input, formatter)
}
