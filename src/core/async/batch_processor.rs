//! Batch processing with owner-based partitioning
//!
//! This module provides the `BatchProcessor`, which runs a batch of
//! purchase requests through the async engine with owner-based
//! partitioning: requests for different owners are processed
//! concurrently, while each owner's requests stay sequential and in
//! order. The issuance commit is the only operation that legitimately
//! races across sessions, and each commit is independently atomic.

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncIssuanceEngine;
use crate::types::{IssuedPass, PassError, PurchaseRecord};

/// Result of processing a single purchase request
///
/// Contains the original request and the outcome of issuing against it.
#[derive(Debug, Clone)]
pub struct IssuanceOutcome {
    /// The purchase request that was processed
    pub record: PurchaseRecord,

    /// The result of processing (an issued pass or the rejection)
    pub result: Result<IssuedPass, PassError>,
}

/// Batch processor with owner-based partitioning
///
/// Cloneable; all internal state is behind `Arc`, and the underlying
/// engine is thread-safe.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe issuance engine shared across tasks
    engine: Arc<AsyncIssuanceEngine>,
}

impl BatchProcessor {
    /// Create a processor over a shared engine
    pub fn new(engine: Arc<AsyncIssuanceEngine>) -> Self {
        BatchProcessor { engine }
    }

    /// Partition a batch of purchase requests by owner id
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one sub-batch
    /// - No requests are lost or duplicated
    /// - Requests for each owner keep their original order
    pub fn partition_by_owner(
        &self,
        batch: Vec<PurchaseRecord>,
    ) -> HashMap<String, Vec<PurchaseRecord>> {
        let mut owner_batches: HashMap<String, Vec<PurchaseRecord>> = HashMap::new();

        for record in batch {
            owner_batches
                .entry(record.owner_id.clone())
                .or_default()
                .push(record);
        }

        owner_batches
    }

    /// Process all requests for a single owner sequentially
    ///
    /// Order is preserved so that, for one owner, passes are issued in
    /// the order the requests arrived. Failures are captured in the
    /// outcomes and do not stop the remaining requests.
    pub async fn process_owner_records(
        &self,
        records: Vec<PurchaseRecord>,
    ) -> Vec<IssuanceOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            let result = self.engine.process(record.clone());
            outcomes.push(IssuanceOutcome { record, result });
        }

        outcomes
    }

    /// Process a batch of purchase requests with owner partitioning
    ///
    /// Partitions the batch by owner, spawns a task per owner, and
    /// collects every outcome. Outcomes may interleave across owners but
    /// stay ordered within one owner.
    pub async fn process_batch(&self, batch: Vec<PurchaseRecord>) -> Vec<IssuanceOutcome> {
        let owner_batches = self.partition_by_owner(batch);

        let mut tasks = Vec::new();
        for (_owner_id, records) in owner_batches {
            let processor = self.clone();
            let task = tokio::spawn(async move { processor.process_owner_records(records).await });
            tasks.push(task);
        }

        let mut outcomes = Vec::new();
        for task in tasks {
            match task.await {
                Ok(owner_outcomes) => outcomes.extend(owner_outcomes),
                Err(e) => {
                    eprintln!("Task panicked: {:?}", e);
                }
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PassCatalog, Station, StationList};
    use crate::core::r#async::AsyncPassStore;
    use crate::types::{DurationUnit, InstrumentTab, PassOffering};
    use rust_decimal::Decimal;

    fn sample_catalog() -> Arc<PassCatalog> {
        let offerings = vec![PassOffering {
            title: "Basic".to_string(),
            price: Decimal::from(299),
            duration_unit: DurationUnit::Month,
            features: Vec::new(),
            popular: false,
        }];
        let stations = StationList::new(vec![
            Station::new("Rajiv Chowk", "Yellow Line"),
            Station::new("Hauz Khas", "Yellow Line"),
        ]);
        Arc::new(PassCatalog::new(offerings, stations))
    }

    fn sample_processor() -> (BatchProcessor, Arc<AsyncIssuanceEngine>) {
        let engine = Arc::new(AsyncIssuanceEngine::new(
            sample_catalog(),
            Arc::new(AsyncPassStore::new()),
        ));
        (BatchProcessor::new(Arc::clone(&engine)), engine)
    }

    fn upi_record(owner_id: &str, handle: &str) -> PurchaseRecord {
        PurchaseRecord {
            owner_id: owner_id.to_string(),
            owner_name: None,
            owner_email: None,
            pass_type: "Basic".to_string(),
            home_zone: "Rajiv Chowk".to_string(),
            destination_zone: "Hauz Khas".to_string(),
            tab: InstrumentTab::Upi,
            instrument: handle.to_string(),
        }
    }

    #[test]
    fn test_partition_covers_batch_exactly() {
        let (processor, _engine) = sample_processor();
        let batch = vec![
            upi_record("u01", "a@oksbi"),
            upi_record("u02", "b@oksbi"),
            upi_record("u01", "c@oksbi"),
            upi_record("u03", "d@oksbi"),
        ];

        let partitions = processor.partition_by_owner(batch);

        assert_eq!(partitions.len(), 3);
        assert_eq!(partitions["u01"].len(), 2);
        assert_eq!(partitions["u02"].len(), 1);
        assert_eq!(partitions["u03"].len(), 1);
        // Per-owner order is the original arrival order
        assert_eq!(partitions["u01"][0].instrument, "a@oksbi");
        assert_eq!(partitions["u01"][1].instrument, "c@oksbi");
    }

    #[tokio::test]
    async fn test_process_batch_issues_all_valid_requests() {
        let (processor, engine) = sample_processor();
        let batch = vec![
            upi_record("u01", "a@oksbi"),
            upi_record("u02", "b@oksbi"),
            upi_record("u01", "c@oksbi"),
        ];

        let outcomes = processor.process_batch(batch).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
        assert_eq!(engine.issued_count(), 3);

        // Per-owner ordering survives concurrent processing
        let passes = engine.registry().list_passes_for("u01").unwrap();
        assert_eq!(passes.len(), 2);
    }

    #[tokio::test]
    async fn test_process_batch_captures_failures_without_stopping() {
        let (processor, engine) = sample_processor();
        let batch = vec![
            upi_record("u01", "a@oksbi"),
            upi_record("u01", "bad@gmail.com"),
            upi_record("u01", "c@oksbi"),
        ];

        let outcomes = processor.process_batch(batch).await;

        assert_eq!(outcomes.len(), 3);
        let failures = outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count();
        assert_eq!(failures, 1);
        assert_eq!(engine.issued_count(), 2);
    }
}
