//! Currency display for studio prices

pub mod formatter;
pub mod style;

pub use formatter::CurrencyFormatter;
pub use style::{CurrencyStyle, SymbolPosition};
