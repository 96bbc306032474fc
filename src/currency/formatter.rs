//! Currency formatter

use rust_decimal::{Decimal, RoundingStrategy};

use super::style::{CurrencyStyle, SymbolPosition};

/// Renders decimal amounts in a studio's currency convention.
///
/// Formatting is total: every `Decimal` produces a string.
#[derive(Clone, Debug, Default)]
pub struct CurrencyFormatter {
    style: CurrencyStyle,
}

impl CurrencyFormatter {
    pub fn new(style: CurrencyStyle) -> Self {
        Self { style }
    }

    /// Formatter for a locale and ISO currency code
    pub fn for_locale(locale: &str, currency: &str) -> Self {
        Self::new(CurrencyStyle::for_locale(locale, currency))
    }

    pub fn style(&self) -> &CurrencyStyle {
        &self.style
    }

    /// Format an amount, e.g. `$1,234.56`
    pub fn format(&self, amount: Decimal) -> String {
        let decimals = self.style.decimals;
        let rounded =
            amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let mut magnitude = rounded.abs();
        magnitude.rescale(decimals);
        let digits = magnitude.to_string();

        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut number = group_digits(integer, &self.style.grouping_separator);
        if let Some(fraction) = fraction {
            number.push_str(&self.style.decimal_separator);
            number.push_str(fraction);
        }

        let body = match self.style.symbol_position {
            SymbolPosition::Before => format!("{}{}", self.style.symbol, number),
            SymbolPosition::BeforeSpaced => format!("{} {}", self.style.symbol, number),
            SymbolPosition::AfterSpaced => format!("{} {}", number, self.style.symbol),
        };

        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Format a ratio as a percentage with two decimals, e.g. `0.1` as `10.00%`
    pub fn format_percent(&self, ratio: Decimal) -> String {
        match ratio.checked_mul(Decimal::ONE_HUNDRED) {
            Some(percent) => {
                let mut percent = percent.round_dp(2);
                percent.rescale(2);
                format!("{}%", percent)
            }
            // Ratios this large carry no fractional digits
            None => format!("{}00%", ratio.round()),
        }
    }
}

fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());

    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_mexican_pesos() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format(dec!(1234.56)), "$1,234.56");
        assert_eq!(formatter.format(dec!(45000)), "$45,000.00");
        assert_eq!(formatter.format(dec!(900)), "$900.00");
        assert_eq!(formatter.format(dec!(1234567.8)), "$1,234,567.80");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format(dec!(0.005)), "$0.01");
        assert_eq!(formatter.format(dec!(2.344)), "$2.34");
        assert_eq!(formatter.format(dec!(-0.005)), "-$0.01");
    }

    #[test]
    fn test_format_negative_and_zero() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format(dec!(-350)), "-$350.00");
        assert_eq!(formatter.format(dec!(0)), "$0.00");
        assert_eq!(formatter.format(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_euro_convention() {
        let formatter = CurrencyFormatter::for_locale("es-ES", "EUR");
        assert_eq!(formatter.format(dec!(1234.5)), "1.234,50 €");
        assert_eq!(formatter.format(dec!(-99.99)), "-99,99 €");
    }

    #[test]
    fn test_format_fallback_and_zero_decimals() {
        let formatter = CurrencyFormatter::for_locale("fr-CA", "CAD");
        assert_eq!(formatter.format(dec!(1500)), "CAD 1,500.00");

        let mut style = CurrencyStyle::for_locale("ja-JP", "JPY");
        style.decimals = 0;
        let formatter = CurrencyFormatter::new(style);
        assert_eq!(formatter.format(dec!(123456.5)), "JPY 123,457");
    }

    #[test]
    fn test_format_percent() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format_percent(dec!(0.1)), "10.00%");
        assert_eq!(formatter.format_percent(dec!(-0.2)), "-20.00%");
        assert_eq!(formatter.format_percent(dec!(1) / dec!(3)), "33.33%");
        assert_eq!(formatter.format_percent(dec!(0)), "0.00%");
    }

    #[test]
    fn test_format_percent_of_huge_ratio() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(
            formatter.format_percent(Decimal::MAX),
            "7922816251426433759354395033500%"
        );
        assert_eq!(
            formatter.format_percent(Decimal::MIN),
            "-7922816251426433759354395033500%"
        );
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ","), "1");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("1234", ","), "1,234");
        assert_eq!(group_digits("123456", "."), "123.456");
    }
}
