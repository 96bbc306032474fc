//! CLI command definitions

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "studio-pricing")]
#[command(
    about = "Studio pricing - quote negotiation guardrails for photography studios",
    long_about = None
)]
pub struct Cli {
    /// Studio configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a proposed price against explicit guardrails
    Evaluate {
        /// Original (catalog) price
        #[arg(long)]
        original: Decimal,

        /// Proposed negotiated price
        #[arg(long)]
        proposed: Decimal,

        /// Cost basis of the service
        #[arg(long)]
        cost: Decimal,

        /// Minimum margin as a fraction of the proposed price
        #[arg(long, default_value = "0")]
        min_margin: Decimal,

        /// Maximum discount as a fraction of the original price
        #[arg(long, default_value = "1")]
        max_discount: Decimal,
    },

    /// Negotiate a catalog service price
    Negotiate {
        /// Service id from the catalog
        #[arg(short, long)]
        service: String,

        /// Proposed negotiated price
        #[arg(short, long)]
        proposed: Decimal,

        /// Original price (defaults to the catalog base price)
        #[arg(short, long)]
        original: Option<Decimal>,
    },

    /// Compute a list price from a cost
    Price {
        /// Cost basis
        #[arg(long)]
        cost: Decimal,

        /// Utility margin (defaults to the configured policy)
        #[arg(long)]
        margin: Option<Decimal>,

        /// Sales commission (defaults to the configured policy)
        #[arg(long)]
        commission: Option<Decimal>,
    },

    /// List catalog services
    Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::parse_from([
            "studio-pricing",
            "evaluate",
            "--original",
            "1000",
            "--proposed",
            "900",
            "--cost",
            "600",
            "--min-margin",
            "0.30",
        ]);

        match cli.command {
            Commands::Evaluate {
                original,
                proposed,
                min_margin,
                max_discount,
                ..
            } => {
                assert_eq!(original, dec!(1000));
                assert_eq!(proposed, dec!(900));
                assert_eq!(min_margin, dec!(0.30));
                assert_eq!(max_discount, dec!(1));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negotiate_with_global_flags() {
        let cli = Cli::parse_from([
            "studio-pricing",
            "negotiate",
            "-s",
            "boda-premium",
            "-p",
            "41000",
            "--config",
            "studio.toml",
            "--json",
        ]);

        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("studio.toml")));
        assert!(matches!(
            cli.command,
            Commands::Negotiate { ref service, original: None, .. } if service == "boda-premium"
        ));
    }

    #[test]
    fn test_rejects_non_decimal_price() {
        let result = Cli::try_parse_from(["studio-pricing", "price", "--cost", "mucho"]);
        assert!(result.is_err());
    }
}
