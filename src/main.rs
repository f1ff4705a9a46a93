//! Transit Pass Engine CLI
//!
//! Command-line interface for issuing transit passes from purchase
//! request CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- purchases.csv > passes.csv
//! cargo run -- --strategy sync purchases.csv > passes.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 purchases.csv > passes.csv
//! cargo run -- --offerings config/offerings.csv --stations config/stations.csv purchases.csv
//! ```
//!
//! The program loads the offering catalog and station list, reads
//! purchase requests from the input CSV file, drives each request
//! through the issuance workflow using the selected processing strategy,
//! and outputs the issued passes to stdout. Rejected requests are
//! reported on stderr; stdout carries only the pass data.
//!
//! # Processing Strategies
//!
//! - **sync**: Synchronous parsing with single-threaded processing
//! - **async**: Asynchronous batch processing with owner-partitioned
//!   parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, unreadable input, broken catalog, etc.)

use std::process;
use std::sync::Arc;
use transit_pass_engine::catalog::PassCatalog;
use transit_pass_engine::cli;
use transit_pass_engine::strategy;

fn main() {
    let args = cli::parse_args();

    // Nothing can be sold against a broken catalog, so loading it is fatal
    let catalog = match PassCatalog::load(&args.offerings, &args.stations) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, catalog, config)
    };

    // Pass data on stdout, diagnostics on stderr
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
