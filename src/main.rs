//! Studio pricing CLI binary

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use studio_pricing::cli::{Cli, Commands, PricingApp};
use studio_pricing::{CurrencyFormatter, NegotiationResult};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout stays parseable
    let default_directive = if cli.verbose {
        "info,studio_pricing=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = PricingApp::from_path(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("failed to load studio configuration from {}", path.display()),
        None => "failed to initialise default studio".to_string(),
    })?;

    match cli.command {
        Commands::Evaluate {
            original,
            proposed,
            cost,
            min_margin,
            max_discount,
        } => {
            let result = app
                .evaluate(original, proposed, cost, min_margin, max_discount)
                .context("negotiation could not be evaluated")?;

            if cli.json {
                print_json(&result)?;
            } else {
                print_result(&result, app.formatter());
            }
        }

        Commands::Negotiate {
            service,
            proposed,
            original,
        } => {
            let outcome = app
                .negotiate(&service, proposed, original)
                .with_context(|| format!("negotiation for service {} failed", service))?;

            if cli.json {
                print_json(&outcome)?;
            } else {
                println!("Quote:      {}", outcome.quote_id);
                print_result(&outcome.result, app.formatter());
                match &outcome.accepted {
                    Some(accepted) => println!(
                        "Accepted:   {} (was {})",
                        accepted.formatted_agreed_price,
                        app.formatter().format(accepted.original_price)
                    ),
                    None => println!("Accepted:   no, quote keeps its original price"),
                }
            }
        }

        Commands::Price {
            cost,
            margin,
            commission,
        } => {
            let breakdown = app
                .price(cost, margin, commission)
                .context("price could not be calculated")?;

            if cli.json {
                print_json(&breakdown)?;
            } else {
                let formatter = app.formatter();
                println!("Cost:       {}", formatter.format(breakdown.cost_basis));
                println!("Utility:    {}", formatter.format(breakdown.utility));
                println!("Commission: {}", formatter.format(breakdown.commission));
                println!("Total:      {}", formatter.format(breakdown.total));
            }
        }

        Commands::Catalog => {
            let lines = app.catalog();

            if cli.json {
                print_json(&lines)?;
            } else if lines.is_empty() {
                println!("No services configured for {}", app.config().studio.name);
            } else {
                for line in lines {
                    println!(
                        "{:<20} {:<30} {:>14}  min margin {}  max discount {}",
                        line.id, line.name, line.base_price, line.min_margin, line.max_discount
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_result(result: &NegotiationResult, formatter: &CurrencyFormatter) {
    println!("Proposed:   {}", result.formatted_proposed_price);
    println!("Discount:   {}", formatter.format_percent(result.discount_percent));
    println!("Margin:     {}", formatter.format_percent(result.margin_percent));
    println!(
        "Utility:    {} ({})",
        formatter.format(result.proposed_utility),
        formatter.format(result.utility_delta)
    );
    println!("Constraint: {:?}", result.violated_constraint);
    println!("Valid:      {}", result.is_valid);
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
