//! Issuance workflow orchestration
//!
//! This module provides the `IssuanceEngine` that drives purchase
//! requests through the full workflow: identity resolution, a payment
//! session (zones, instrument tabs, validation, submission), the
//! issuance commit, and the session's success/failure bookkeeping.
//!
//! The engine enforces the workflow's ordering rules:
//! - An unauthenticated request never opens a payment session
//! - Validation failures never reach storage
//! - A commit failure returns the session to its chosen instrument
//!   (retry is the caller's decision; the engine never retries)

use crate::catalog::PassCatalog;
use crate::core::issuance::issue_into;
use crate::core::pass_vault::PassVault;
use crate::core::registry::PassRegistry;
use crate::core::session::drive_purchase;
use crate::core::traits::PassStore;
use crate::types::{IssuedPass, PassError, PurchaseRecord, ValidationError};
use std::sync::Arc;

/// Synchronous issuance engine
///
/// Owns the pass vault and shares the catalog. Each processed record
/// runs a complete payment session; the vault accumulates every
/// successfully issued pass.
#[derive(Debug)]
pub struct IssuanceEngine {
    /// Configured offerings and station list
    catalog: Arc<PassCatalog>,

    /// The pass store commits land in
    vault: PassVault,
}

impl IssuanceEngine {
    /// Create an engine over a catalog with an empty vault
    pub fn new(catalog: Arc<PassCatalog>) -> Self {
        IssuanceEngine {
            catalog,
            vault: PassVault::new(),
        }
    }

    /// Process a single purchase request
    ///
    /// Resolves the owner identity first: an unauthenticated request is
    /// rejected before any session state exists. The session then walks
    /// zones → instrument → submission, and the issuance commit closes
    /// it. On a commit failure the session is returned to its chosen
    /// instrument and the error is propagated; the engine performs no
    /// automatic retry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner identity is missing (blank id)
    /// - The offering or either station is unknown
    /// - The instrument fails format validation
    /// - The store rejects the insert
    pub fn process(&mut self, record: PurchaseRecord) -> Result<IssuedPass, PassError> {
        // Identity precondition: resolved before the session is entered
        let owner = record.owner()?;

        // Walk the session to the Processing state
        let mut session = drive_purchase(&self.catalog, &record)?;

        let zones = session
            .zone_selection()
            .cloned()
            .ok_or(ValidationError::ZonesIncomplete)?;
        let instrument = session
            .instrument()
            .cloned()
            .ok_or(ValidationError::NoInstrumentChosen)?;

        match issue_into(
            &mut self.vault,
            &owner,
            session.offering(),
            &zones,
            &instrument,
        ) {
            Ok(pass) => {
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

    /// Read-side registry over the engine's vault
    pub fn registry(&self) -> PassRegistry<'_, PassVault> {
        PassRegistry::new(&self.vault)
    }

    /// Distinct owner ids with at least one issued pass, sorted
    pub fn owner_ids(&self) -> Vec<String> {
        self.vault.owner_ids()
    }

    /// Number of passes issued so far
    pub fn issued_count(&self) -> usize {
        self.vault.len()
    }
}
