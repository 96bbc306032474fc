//! Locale conventions for rendering a currency amount

use serde::{Deserialize, Serialize};

/// Where the currency symbol sits relative to the number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPosition {
    /// `$1,234.56`
    Before,
    /// `MXN 1,234.56`
    BeforeSpaced,
    /// `1.234,56 €`
    AfterSpaced,
}

/// Display conventions for one locale/currency pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    pub code: String,
    pub symbol: String,
    pub grouping_separator: String,
    pub decimal_separator: String,
    pub decimals: u32,
    pub symbol_position: SymbolPosition,
}

impl CurrencyStyle {
    /// Resolve the style for a locale and ISO currency code.
    ///
    /// Known pairs get their native convention; anything else falls back to
    /// the currency code as prefix with comma grouping and two decimals.
    pub fn for_locale(locale: &str, currency: &str) -> Self {
        let locale = locale.replace('_', "-").to_ascii_lowercase();
        let code = currency.to_ascii_uppercase();

        match (locale.as_str(), code.as_str()) {
            ("es-mx", "MXN") | ("en-us", "USD") => Self {
                code,
                symbol: "$".to_string(),
                grouping_separator: ",".to_string(),
                decimal_separator: ".".to_string(),
                decimals: 2,
                symbol_position: SymbolPosition::Before,
            },
            ("es-es", "EUR") => Self {
                code,
                symbol: "€".to_string(),
                grouping_separator: ".".to_string(),
                decimal_separator: ",".to_string(),
                decimals: 2,
                symbol_position: SymbolPosition::AfterSpaced,
            },
            _ => Self {
                symbol: code.clone(),
                code,
                grouping_separator: ",".to_string(),
                decimal_separator: ".".to_string(),
                decimals: 2,
                symbol_position: SymbolPosition::BeforeSpaced,
            },
        }
    }
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self::for_locale("es-MX", "MXN")
    }
}
