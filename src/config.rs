//! Studio configuration loaded from TOML

use crate::currency::CurrencyFormatter;
use crate::error::{PricingError, Result};
use crate::pricing::{PriceCatalog, PriceConfiguration, PricingPolicy, ServiceEntry};
use crate::types::ServiceId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub studio: StudioSection,
    #[serde(default)]
    pub policy: PricingPolicy,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSection {
    pub name: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for StudioSection {
    fn default() -> Self {
        Self {
            name: "Studio".to_string(),
            locale: default_locale(),
            currency: default_currency(),
        }
    }
}

/// One `[[services]]` entry as written in the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub id: String,
    pub name: String,
    pub base_price: Decimal,
    pub cost_basis: Decimal,
    pub min_margin: Decimal,
    pub max_discount: Decimal,
}

fn default_locale() -> String {
    "es-MX".to_string()
}

fn default_currency() -> String {
    "MXN".to_string()
}

impl StudioConfig {
    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            services = config.services.len(),
            "Loaded studio configuration"
        );
        Ok(config)
    }

    /// Parse and validate a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PricingError::Configuration(format!("TOML parsing error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.studio.name.trim().is_empty() {
            return Err(invalid("studio.name", &self.studio.name, "name cannot be empty"));
        }

        if self.studio.locale.trim().is_empty() {
            return Err(invalid("studio.locale", &self.studio.locale, "locale cannot be empty"));
        }

        let currency = &self.studio.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid(
                "studio.currency",
                currency,
                "must be a 3-letter ISO currency code",
            ));
        }

        self.policy
            .validate()
            .map_err(|e| invalid("policy", &format!("{:?}", self.policy), &e.to_string()))?;

        let mut seen = HashSet::new();
        for (index, service) in self.services.iter().enumerate() {
            let field = format!("services[{}].id", index);
            if service.id.trim().is_empty() {
                return Err(invalid(&field, &service.id, "service id cannot be empty"));
            }
            if !seen.insert(service.id.as_str()) {
                return Err(invalid(&field, &service.id, "duplicate service id"));
            }
            service.configuration().map_err(|e| {
                invalid(&format!("services[{}]", index), &service.id, &e.to_string())
            })?;
        }

        Ok(())
    }

    /// Price catalog built from the configured services
    pub fn catalog(&self) -> Result<PriceCatalog> {
        let entries = self
            .services
            .iter()
            .map(|service| {
                Ok(ServiceEntry {
                    id: ServiceId::new(service.id.clone()),
                    name: service.name.clone(),
                    configuration: service.configuration()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        PriceCatalog::from_entries(entries)
    }

    /// Currency formatter for the studio's locale
    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::for_locale(&self.studio.locale, &self.studio.currency)
    }
}

impl ServiceConfig {
    pub fn configuration(&self) -> Result<PriceConfiguration> {
        PriceConfiguration::new(
            self.base_price,
            self.cost_basis,
            self.min_margin,
            self.max_discount,
        )
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> PricingError {
    PricingError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
