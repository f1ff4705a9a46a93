//! Issuance orchestration for concurrent batch processing
//!
//! This module provides the `AsyncIssuanceEngine`, the thread-safe
//! counterpart of [`IssuanceEngine`](crate::core::IssuanceEngine). It
//! drives the same per-record workflow (identity, payment session,
//! commit) but commits into the shared `AsyncPassStore`, so purchases
//! for different owners can be processed concurrently.
//!
//! # Thread Safety
//!
//! The engine is cloneable and safe to share across tasks. Each record
//! gets its own payment session (sessions are single-user by contract);
//! the only shared state is the catalog (read-only) and the store, whose
//! inserts are independently atomic.

use crate::catalog::PassCatalog;
use crate::core::issuance::build_pass;
use crate::core::r#async::pass_store::{AsyncPassRegistry, AsyncPassStore};
use crate::core::session::drive_purchase;
use crate::types::{IssuedPass, PassError, PurchaseRecord, ValidationError};
use std::sync::Arc;

/// Thread-safe issuance engine for batch processing
#[derive(Debug, Clone)]
pub struct AsyncIssuanceEngine {
    /// Configured offerings and station list (read-only, shared)
    catalog: Arc<PassCatalog>,

    /// Shared pass store commits land in
    store: Arc<AsyncPassStore>,
}

impl AsyncIssuanceEngine {
    /// Create an engine over a catalog and a shared store
    pub fn new(catalog: Arc<PassCatalog>, store: Arc<AsyncPassStore>) -> Self {
        AsyncIssuanceEngine { catalog, store }
    }

    /// Process a single purchase request
    ///
    /// Identical workflow to the synchronous engine: identity is
    /// resolved before any session state exists, the session walks
    /// zones → instrument → submission, and the commit closes it. A
    /// commit failure returns the session to its chosen instrument and
    /// propagates the error without retrying.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner identity is missing (blank id)
    /// - The offering or either station is unknown
    /// - The instrument fails format validation
    /// - The store rejects the insert
    pub fn process(&self, record: PurchaseRecord) -> Result<IssuedPass, PassError> {
        let owner = record.owner()?;

        let mut session = drive_purchase(&self.catalog, &record)?;

        let zones = session
            .zone_selection()
            .cloned()
            .ok_or(ValidationError::ZonesIncomplete)?;
        let instrument = session
            .instrument()
            .cloned()
            .ok_or(ValidationError::NoInstrumentChosen)?;

        let pass = build_pass(&owner, session.offering(), &zones, &instrument);
        match self.store.insert(pass.clone()) {
            Ok(()) => {
                session.issuance_succeeded()?;
                Ok(pass)
            }
            Err(error) => {
                // Retryable: the session keeps its instrument
                session.issuance_failed(error.to_string())?;
                Err(error.into())
            }
        }
    }

    /// Read-side registry over the shared store
    pub fn registry(&self) -> AsyncPassRegistry {
        AsyncPassRegistry::new(Arc::clone(&self.store))
    }

    /// Distinct owner ids with at least one issued pass, sorted
    pub fn owner_ids(&self) -> Vec<String> {
        self.store.owner_ids()
    }

    /// Number of passes issued so far
    pub fn issued_count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Station, StationList};
    use crate::types::{DurationUnit, InstrumentTab, IssuanceError, PassOffering};
    use rust_decimal::Decimal;

    fn sample_catalog() -> Arc<PassCatalog> {
        let offerings = vec![PassOffering {
            title: "Basic".to_string(),
            price: Decimal::from(999),
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

    fn sample_engine() -> AsyncIssuanceEngine {
        AsyncIssuanceEngine::new(sample_catalog(), Arc::new(AsyncPassStore::new()))
    }

    fn upi_record(owner_id: &str) -> PurchaseRecord {
        PurchaseRecord {
            owner_id: owner_id.to_string(),
            owner_name: Some("Asha Verma".to_string()),
            owner_email: Some("asha@example.com".to_string()),
            pass_type: "Basic".to_string(),
            home_zone: "Rajiv Chowk".to_string(),
            destination_zone: "Hauz Khas".to_string(),
            tab: InstrumentTab::Upi,
            instrument: "user@okhdfcbank".to_string(),
        }
    }

    #[test]
    fn test_process_issues_pass() {
        let engine = sample_engine();

        let pass = engine.process(upi_record("u01")).expect("should issue");

        assert_eq!(pass.owner_id, "u01");
        assert!(pass.payment_mode.contains("UPI"));
        assert_eq!(engine.issued_count(), 1);
    }

    #[test]
    fn test_validation_failure_commits_nothing() {
        let engine = sample_engine();
        let record = PurchaseRecord {
            instrument: "user@gmail.com".to_string(),
            ..upi_record("u01")
        };

        let result = engine.process(record);
        assert!(matches!(result, Err(PassError::Validation(_))));
        assert_eq!(engine.issued_count(), 0);
    }

    #[test]
    fn test_missing_identity_rejected() {
        let engine = sample_engine();
        let record = PurchaseRecord {
            owner_id: "   ".to_string(),
            ..upi_record("u01")
        };

        let result = engine.process(record);
        assert!(matches!(
            result,
            Err(PassError::Issuance(IssuanceError::IdentityMissing))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_purchases_each_issue_independently() {
        let engine = Arc::new(sample_engine());

        let mut tasks = Vec::new();
        for i in 0..20 {
            let engine = Arc::clone(&engine);
            tasks.push(tokio::spawn(async move {
                engine.process(upi_record(&format!("u{:02}", i % 4)))
            }));
        }

        let mut secrets = std::collections::HashSet::new();
        for task in tasks {
            let pass = task.await.unwrap().unwrap();
            secrets.insert(pass.secret);
        }

        assert_eq!(secrets.len(), 20);
        assert_eq!(engine.issued_count(), 20);
    }
}
