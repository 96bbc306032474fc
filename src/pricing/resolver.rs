//! Resolution of service identifiers to pricing guardrails

use crate::error::{PricingError, Result};
use crate::types::ServiceId;
use std::collections::BTreeMap;

use super::types::{PriceConfiguration, ServiceEntry};

/// Supplies the pricing configuration for a service or package
pub trait PriceResolver {
    /// Fails with `ServiceNotFound` when the identifier is unknown
    fn resolve(&self, service_id: &ServiceId) -> Result<PriceConfiguration>;
}

/// In-memory service catalog, ordered by service id
#[derive(Clone, Debug, Default)]
pub struct PriceCatalog {
    entries: BTreeMap<ServiceId, ServiceEntry>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate service ids
    pub fn from_entries(entries: impl IntoIterator<Item = ServiceEntry>) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }

        tracing::debug!("Built price catalog with {} services", catalog.len());
        Ok(catalog)
    }

    /// Add a service; an id may only appear once
    pub fn insert(&mut self, entry: ServiceEntry) -> Result<()> {
        if self.entries.contains_key(&entry.id) {
            return Err(PricingError::InvalidInput(format!(
                "duplicate service id: {}",
                entry.id
            )));
        }

        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn get(&self, service_id: &ServiceId) -> Option<&ServiceEntry> {
        self.entries.get(service_id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PriceResolver for PriceCatalog {
    fn resolve(&self, service_id: &ServiceId) -> Result<PriceConfiguration> {
        self.get(service_id)
            .map(|entry| entry.configuration.clone())
            .ok_or_else(|| PricingError::ServiceNotFound(service_id.0.clone()))
    }
}
