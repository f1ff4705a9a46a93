//! Synchronous processing strategy
//!
//! Single-threaded pipeline: stream purchase records with [`SyncReader`],
//! drive each through the [`IssuanceEngine`], then read every owner's
//! passes back through the registry and write them out. Reading the
//! output through the registry means the CSV reflects exactly what a
//! pass holder would see.
//!
//! Records stream one at a time, so memory scales with the passes
//! issued, not with the size of the input.

use crate::catalog::PassCatalog;
use crate::core::IssuanceEngine;
use crate::io::csv_format::write_passes_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::IssuedPass;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Single-threaded purchase pipeline
///
/// `Send + Sync` like every strategy, though it processes sequentially;
/// the engine it drives is created per `process` call.
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    /// Configured offerings and station list
    catalog: Arc<PassCatalog>,
}

impl SyncProcessingStrategy {
    /// Create a strategy over a configured catalog
    pub fn new(catalog: Arc<PassCatalog>) -> Self {
        Self { catalog }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let mut engine = IssuanceEngine::new(Arc::clone(&self.catalog));

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(purchase_record) => {
                    // Rejections are recoverable: log and continue
                    if let Err(e) = engine.process(purchase_record) {
                        eprintln!("Purchase processing error: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("CSV parsing error: {}", e);
                }
            }
        }

        // The output is the registry's view, owner by owner
        let registry = engine.registry();
        let mut passes: Vec<IssuedPass> = Vec::with_capacity(engine.issued_count());
        for owner_id in engine.owner_ids() {
            let owned = registry
                .list_passes_for(&owner_id)
                .map_err(|e| format!("Failed to read passes for owner '{}': {}", owner_id, e))?;
            passes.extend(owned);
        }

        write_passes_csv(&passes, output)?;

        Ok(())
    }
}
