//! # Tally POS Reference Till
//!
//! Drives one checkout against a seeded catalog and prints the receipt.
//!
//! ## Usage
//! ```bash
//! # The reference scenario: seeded catalog, basket {A:3, B:5, C:1, D:1}
//! cargo run -p tally-till --bin till
//!
//! # A custom basket against the built-in catalog
//! cargo run -p tally-till --bin till -- A=4 C=2
//!
//! # A custom catalog seed and a JSON receipt
//! cargo run -p tally-till --bin till -- --seed catalog.json --json B=5
//! ```
//!
//! ## Failure Behavior
//! A till never walks away from a basket: unknown products, rejected
//! quantities and unpriceable lines are logged as warnings and skipped,
//! and the receipt still prints a total for everything that survived.

mod seed;

use std::env;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tally_core::{BasketTotals, Checkout};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut seed_path: Option<String> = None;
    let mut json_output = false;
    let mut items: Vec<(String, i64)> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--json" | "-j" => json_output = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            arg => match parse_item(arg) {
                Some(item) => items.push(item),
                None => warn!(
                    argument = arg,
                    "Ignoring malformed basket item (expected NAME=QTY)"
                ),
            },
        }
        i += 1;
    }

    // Seed the catalog: an explicit value handed in here, never a global
    let catalog = match &seed_path {
        Some(path) => seed::load_catalog(Path::new(path))?,
        None => seed::reference_catalog()?,
    };
    info!(products = catalog.len(), "Catalog ready");

    // No items given: run the reference scenario
    if items.is_empty() {
        items = seed::REFERENCE_BASKET
            .iter()
            .map(|(name, quantity)| (name.to_string(), *quantity))
            .collect();
    }

    let mut checkout = Checkout::new();
    info!(basket = checkout.id(), "Opened basket");

    for (name, quantity) in &items {
        let product = match catalog.lookup(name) {
            Ok(product) => product,
            Err(err) => {
                warn!(%err, "Skipping basket line");
                continue;
            }
        };

        if let Err(err) = checkout.add(product, *quantity) {
            warn!(%err, product = name.as_str(), "Rejected basket line");
        }
    }

    let totals = checkout.calculate_total();
    for failure in &totals.failed {
        warn!(
            product = failure.name.as_str(),
            reason = failure.reason.as_str(),
            "Line failed to price"
        );
    }

    let receipt = Receipt {
        issued_at: Utc::now(),
        totals: &totals,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        print_receipt(&receipt);
    }

    Ok(())
}

/// A timestamped receipt around the basket totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Receipt<'a> {
    issued_at: DateTime<Utc>,
    #[serde(flatten)]
    totals: &'a BasketTotals,
}

/// Parses a `NAME=QTY` argument.
///
/// The quantity only needs to be an integer here; the basket enforces
/// positivity and caps on admission.
fn parse_item(arg: &str) -> Option<(String, i64)> {
    let (name, quantity) = arg.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let quantity: i64 = quantity.trim().parse().ok()?;
    Some((name.to_string(), quantity))
}

fn print_receipt(receipt: &Receipt<'_>) {
    let totals = receipt.totals;

    println!("Tally POS");
    println!("Basket: {}", totals.basket_id);
    println!("Issued: {}", receipt.issued_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("----------------------------------------");

    for line in &totals.lines {
        println!(
            "{:<20} x{:<5} {:>10}",
            line.name,
            line.quantity,
            line.total.to_string()
        );
    }
    for failure in &totals.failed {
        println!("{:<20} not priced: {}", failure.name, failure.reason);
    }

    println!("----------------------------------------");
    println!(
        "{:<27} {:>10}",
        format!("Total ({} units)", totals.total_quantity),
        totals.total.to_string()
    );
}

fn print_help() {
    println!("Tally POS reference till");
    println!();
    println!("Usage: till [OPTIONS] [NAME=QTY ...]");
    println!();
    println!("Arguments:");
    println!("  NAME=QTY           Add QTY units of product NAME to the basket.");
    println!("                     With no items, runs the reference scenario");
    println!("                     (A=3 B=5 C=1 D=1).");
    println!();
    println!("Options:");
    println!("  -s, --seed <PATH>  Load the catalog from a JSON seed file");
    println!("                     instead of the built-in reference catalog");
    println!("  -j, --json         Print the receipt as JSON");
    println!("  -h, --help         Show this help message");
}

// =============================================================================
// Unit Tests
// =============================================================================
