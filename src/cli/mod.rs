// Command-line interface for the pass issuance pipeline

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse the process arguments into a [`CliArgs`]
///
/// On invalid input (or `--help`) clap prints its own message and exits,
/// so callers only ever see a fully parsed argument set.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
