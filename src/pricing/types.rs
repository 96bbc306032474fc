//! Pricing value objects

use crate::error::{PricingError, Result};
use crate::types::ServiceId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pricing guardrails for one service or package.
///
/// Only constructed through [`PriceConfiguration::new`] (or deserialization,
/// which goes through the same checks), so every instance satisfies:
/// non-negative `base_price` and `cost_basis`, `min_margin` and
/// `max_discount` within `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceConfiguration")]
pub struct PriceConfiguration {
    base_price: Decimal,
    cost_basis: Decimal,
    min_margin: Decimal,
    max_discount: Decimal,
}

#[derive(Deserialize)]
struct RawPriceConfiguration {
    base_price: Decimal,
    cost_basis: Decimal,
    min_margin: Decimal,
    max_discount: Decimal,
}

impl TryFrom<RawPriceConfiguration> for PriceConfiguration {
    type Error = PricingError;

    fn try_from(raw: RawPriceConfiguration) -> Result<Self> {
        Self::new(raw.base_price, raw.cost_basis, raw.min_margin, raw.max_discount)
    }
}

impl PriceConfiguration {
    pub fn new(
        base_price: Decimal,
        cost_basis: Decimal,
        min_margin: Decimal,
        max_discount: Decimal,
    ) -> Result<Self> {
        ensure_non_negative("base_price", base_price)?;
        ensure_non_negative("cost_basis", cost_basis)?;
        ensure_ratio("min_margin", min_margin)?;
        ensure_ratio("max_discount", max_discount)?;

        Ok(Self {
            base_price,
            cost_basis,
            min_margin,
            max_discount,
        })
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn cost_basis(&self) -> Decimal {
        self.cost_basis
    }

    pub fn min_margin(&self) -> Decimal {
        self.min_margin
    }

    pub fn max_discount(&self) -> Decimal {
        self.max_discount
    }
}

/// A catalog row: a named service and its guardrails
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: ServiceId,
    pub name: String,
    pub configuration: PriceConfiguration,
}

/// Studio-wide policy used to derive list prices from costs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Share of the list price kept as utility
    #[serde(default = "default_utility_margin")]
    pub utility_margin: Decimal,
    /// Share of the list price paid out as sales commission
    #[serde(default)]
    pub commission: Decimal,
}

impl PricingPolicy {
    pub fn new(utility_margin: Decimal, commission: Decimal) -> Result<Self> {
        let policy = Self {
            utility_margin,
            commission,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Both shares must be in `[0, 1)`; a share of 1 leaves nothing to cover cost.
    pub fn validate(&self) -> Result<()> {
        ensure_open_ratio("utility_margin", self.utility_margin)?;
        ensure_open_ratio("commission", self.commission)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            utility_margin: default_utility_margin(),
            commission: Decimal::ZERO,
        }
    }
}

fn default_utility_margin() -> Decimal {
    Decimal::new(30, 2)
}

/// How a list price splits into cost, utility and commission.
///
/// `cost_basis + utility + commission == total` always holds exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub cost_basis: Decimal,
    pub utility: Decimal,
    pub commission: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Guardrails for negotiating around this list price
    pub fn into_configuration(
        self,
        min_margin: Decimal,
        max_discount: Decimal,
    ) -> Result<PriceConfiguration> {
        PriceConfiguration::new(self.total, self.cost_basis, min_margin, max_discount)
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::InvalidInput(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(())
}

pub(crate) fn ensure_ratio(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PricingError::InvalidInput(format!(
            "{} must be within [0, 1], got {}",
            field, value
        )));
    }
    Ok(())
}

fn ensure_open_ratio(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(PricingError::InvalidInput(format!(
            "{} must be within [0, 1), got {}",
            field, value
        )));
    }
    Ok(())
}
