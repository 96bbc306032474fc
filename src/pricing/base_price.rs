//! List price computation from a cost basis

use crate::error::{PricingError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{ensure_non_negative, PriceBreakdown, PricingPolicy};

/// Currency precision for list prices
const PRICE_DECIMALS: u32 = 2;

/// Compute the list price for a cost so that utility and commission are
/// the policy's fractions of the final price.
///
/// `subtotal = cost / (1 - utility_margin)` and
/// `total = subtotal / (1 - commission)`, rounded to cents. The commission is
/// rounded from the total and utility takes the remainder, so the breakdown
/// sums exactly to `total`. A cost too large for the policy to price within
/// `Decimal` range is rejected as invalid input.
pub fn calculate_price(cost_basis: Decimal, policy: &PricingPolicy) -> Result<PriceBreakdown> {
    ensure_non_negative("cost_basis", cost_basis)?;
    policy.validate()?;

    let too_large = || {
        PricingError::InvalidInput(format!(
            "cost_basis {} is too large to price under this policy",
            cost_basis
        ))
    };

    let total = cost_basis
        .checked_div(Decimal::ONE - policy.utility_margin)
        .and_then(|subtotal| subtotal.checked_div(Decimal::ONE - policy.commission))
        .map(round_price)
        .ok_or_else(too_large)?;
    let commission = total
        .checked_mul(policy.commission)
        .map(round_price)
        .ok_or_else(too_large)?;
    let utility = total
        .checked_sub(commission)
        .and_then(|remainder| remainder.checked_sub(cost_basis))
        .ok_or_else(too_large)?;

    Ok(PriceBreakdown {
        cost_basis,
        utility,
        commission,
        total,
    })
}

fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}
