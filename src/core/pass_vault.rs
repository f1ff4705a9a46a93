//! In-memory pass storage
//!
//! The synchronous [`PassStore`] implementation: a vector in insertion
//! order plus a secret index for the uniqueness check. Suitable for the
//! single-threaded strategy; the batch strategy uses the DashMap-backed
//! `AsyncPassStore` instead.

use crate::core::traits::PassStore;
use crate::types::{IssuanceError, IssuedPass};
use std::collections::{BTreeSet, HashSet};

/// In-memory pass store with an enforced unique-secret invariant
///
/// Insertion order is preserved, so `passes_for_owner` returns an
/// owner's passes in the order they were issued.
#[derive(Debug, Default)]
pub struct PassVault {
    /// Stored passes in insertion order
    passes: Vec<IssuedPass>,

    /// Secrets already present, for the uniqueness check
    secrets: HashSet<String>,
}

impl PassVault {
    /// Create an empty vault
    pub fn new() -> Self {
        PassVault {
            passes: Vec::new(),
            secrets: HashSet::new(),
        }
    }
}

impl PassStore for PassVault {
    fn insert(&mut self, pass: IssuedPass) -> Result<(), IssuanceError> {
        // Uniqueness is enforced here, not just assumed from generator
        // entropy
        if !self.secrets.insert(pass.secret.clone()) {
            return Err(IssuanceError::persistence_failed(format!(
                "a pass with secret '{}' already exists",
                pass.secret
            )));
        }
        self.passes.push(pass);
        Ok(())
    }

    fn passes_for_owner(&self, owner_id: &str) -> Result<Vec<IssuedPass>, IssuanceError> {
        Ok(self
            .passes
            .iter()
            .filter(|pass| pass.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn owner_ids(&self) -> Vec<String> {
        self.passes
            .iter()
            .map(|pass| pass.owner_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn len(&self) -> usize {
        self.passes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_pass(owner_id: &str, secret: &str) -> IssuedPass {
        IssuedPass {
            owner_id: owner_id.to_string(),
            owner_name: "Asha Verma".to_string(),
            owner_email: "asha@example.com".to_string(),
            pass_type: "Basic Pass".to_string(),
            price: Decimal::from(299),
            home_zone: "Rajiv Chowk".to_string(),
            destination_zone: "Hauz Khas".to_string(),
            secret: secret.to_string(),
            payment_mode: "UPI".to_string(),
        }
    }

    #[test]
    fn test_new_vault_is_empty() {
        let vault = PassVault::new();
        assert_eq!(vault.len(), 0);
        assert!(vault.is_empty());
        assert!(vault.owner_ids().is_empty());
    }

    #[test]
    fn test_insert_and_list_for_owner() {
        let mut vault = PassVault::new();
        vault.insert(sample_pass("u01", "secret-1")).unwrap();
        vault.insert(sample_pass("u02", "secret-2")).unwrap();
        vault.insert(sample_pass("u01", "secret-3")).unwrap();

        let passes = vault.passes_for_owner("u01").unwrap();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].secret, "secret-1");
        assert_eq!(passes[1].secret, "secret-3");
    }

    #[test]
    fn test_owner_with_no_passes_yields_empty_not_error() {
        let vault = PassVault::new();
        let passes = vault.passes_for_owner("stranger").unwrap();
        assert!(passes.is_empty());
    }

    #[test]
    fn test_duplicate_secret_rejected_and_first_record_kept() {
        let mut vault = PassVault::new();
        vault.insert(sample_pass("u01", "secret-1")).unwrap();

        let result = vault.insert(sample_pass("u02", "secret-1"));
        assert!(matches!(
            result,
            Err(IssuanceError::PersistenceFailed { .. })
        ));

        assert_eq!(vault.len(), 1);
        assert!(vault.passes_for_owner("u02").unwrap().is_empty());
        assert_eq!(vault.passes_for_owner("u01").unwrap().len(), 1);
    }

    #[test]
    fn test_owner_ids_sorted_and_distinct() {
        let mut vault = PassVault::new();
        vault.insert(sample_pass("u02", "secret-1")).unwrap();
        vault.insert(sample_pass("u01", "secret-2")).unwrap();
        vault.insert(sample_pass("u02", "secret-3")).unwrap();

        assert_eq!(vault.owner_ids(), vec!["u01".to_string(), "u02".to_string()]);
    }
}
