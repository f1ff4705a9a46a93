use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Issue transit passes from purchase request CSVs
#[derive(Parser, Debug)]
#[command(name = "pass-engine")]
#[command(about = "Issue transit passes from purchase request CSVs", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing purchase requests
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Offerings catalog configuration file
    #[arg(
        long = "offerings",
        value_name = "PATH",
        default_value = "config/offerings.csv",
        help = "Path to the offerings catalog CSV"
    )]
    pub offerings: PathBuf,

    /// Station list configuration file
    #[arg(
        long = "stations",
        value_name = "PATH",
        default_value = "config/stations.csv",
        help = "Path to the station list CSV"
    )]
    pub stations: PathBuf,

    /// Processing strategy to use for purchase requests
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of purchase requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of purchase requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent batches (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of batches processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available processing strategies for purchase processing
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Build the batch configuration from the tuning flags
    ///
    /// Flags the user did not pass keep their defaults; a zero value is
    /// reported on stderr and replaced with the default by
    /// [`BatchConfig::new`].
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_none() && self.max_concurrent_batches.is_none() {
            return BatchConfig::default();
        }

        let default = BatchConfig::default();
        BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.max_concurrent_batches
                .unwrap_or(default.max_concurrent_batches),
        )
    }
}
