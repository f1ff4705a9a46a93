//! Processing strategies for the purchase pipeline
//!
//! A strategy is one complete pipeline: read purchase requests from a
//! CSV file, drive each through the issuance workflow, and write the
//! issued passes to output. The Strategy pattern keeps the synchronous
//! and the asynchronous-batch pipelines interchangeable at runtime.

use crate::catalog::PassCatalog;
use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// One complete purchase-processing pipeline
pub trait ProcessingStrategy: Send + Sync {
    /// Read purchases from `input_path`, issue passes, write them to `output`
    ///
    /// Individual purchase rejections (validation failures, missing
    /// identity, storage errors) go to stderr and processing continues
    /// with the next request; only fatal conditions fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened, the runtime
    /// cannot be built, or the output cannot be written.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Instantiate the strategy selected on the command line
///
/// `config` tunes the async pipeline and is ignored by the sync one;
/// omitting it selects the default batch configuration.
pub fn create_strategy(
    strategy_type: StrategyType,
    catalog: Arc<PassCatalog>,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(catalog)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(catalog, config))
        }
    }
}
