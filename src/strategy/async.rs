//! Asynchronous batch processing strategy
//!
//! Multi-threaded pipeline: purchase requests are read in batches and
//! each batch is partitioned by owner, so different owners issue
//! concurrently while one owner's requests stay sequential and ordered.
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (owner partitioning + tasks)
//!     └── AsyncIssuanceEngine (thread-safe workflow)
//!         └── AsyncPassStore (thread-safe pass storage)
//! ```
//!
//! Batches run one after another; the parallelism lives inside a batch.
//! That keeps an owner's requests ordered even when they straddle a
//! batch boundary, and the only cross-task race left is the issuance
//! commit itself, which the store makes independently atomic.

use crate::catalog::PassCatalog;
use crate::core::r#async::{AsyncIssuanceEngine, AsyncPassStore, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_passes_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::IssuedPass;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Tuning for the batch pipeline
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of purchase requests per batch
    pub batch_size: usize,
    /// Maximum number of batches processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Build a configuration, replacing zero values with the defaults
    ///
    /// A zero batch size or concurrency makes no progress, so each is
    /// reported on stderr and swapped for its default.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Owner-partitioned concurrent purchase pipeline
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Configured offerings and station list
    catalog: Arc<PassCatalog>,

    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a strategy over a catalog with the given batch tuning
    pub fn new(catalog: Arc<PassCatalog>, config: BatchConfig) -> Self {
        Self { catalog, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the full batch pipeline against one input file
    ///
    /// Builds a multi-threaded tokio runtime sized by the configured
    /// concurrency, reads request batches, processes each batch with
    /// owner partitioning, then writes the registry's view of every
    /// owner's passes. Rejected requests go to stderr; only fatal
    /// conditions (unopenable input, runtime failure, broken output)
    /// fail the run.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let store = Arc::new(AsyncPassStore::new());
            let engine = Arc::new(AsyncIssuanceEngine::new(
                Arc::clone(&self.catalog),
                Arc::clone(&store),
            ));

            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files speak tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let outcomes = processor.process_batch(batch).await;
                for outcome in outcomes {
                    if let Err(e) = outcome.result {
                        eprintln!("Purchase processing error: {}", e);
                    }
                }
            }

            // The output is the registry's view, owner by owner
            let registry = engine.registry();
            let mut passes: Vec<IssuedPass> = Vec::with_capacity(engine.issued_count());
            for owner_id in engine.owner_ids() {
                let owned = registry.list_passes_for(&owner_id).map_err(|e| {
                    format!("Failed to read passes for owner '{}': {}", owner_id, e)
                })?;
                passes.extend(owned);
            }

            write_passes_csv(&passes, output)?;

            Ok(())
        })
    }
}
