//! Thread-safe pass storage for concurrent batch issuance
//!
//! This module provides the `AsyncPassStore`, which stores issued passes
//! using concurrent data structures so that purchases for different
//! owners can commit in parallel.
//!
//! # Design
//!
//! The store keeps passes in a `DashMap` keyed by an insertion sequence
//! number (so per-owner listings come back in issuance order) and a
//! `DashSet` of secrets for the uniqueness check. The secret check and
//! reservation are a single `DashSet::insert`, an atomic
//! check-and-insert, never a read-then-write over enumerated passes, so
//! two racing commits cannot both claim the same secret.
//!
//! # Thread Safety
//!
//! All methods take `&self` and are safe to call from multiple tasks
//! concurrently. Commits for different owners proceed independently;
//! the only cross-task coordination is the sharded locking inside
//! DashMap/DashSet and the atomic sequence counter.

use crate::types::{IssuanceError, IssuedPass};
use dashmap::{DashMap, DashSet};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Thread-safe pass store with an enforced unique-secret invariant
///
/// The concurrent counterpart of
/// [`PassVault`](crate::core::PassVault). Each insert is independently
/// atomic: either the full record becomes visible or nothing does.
#[derive(Debug, Default)]
pub struct AsyncPassStore {
    /// Stored passes keyed by insertion sequence number
    passes: DashMap<u64, IssuedPass>,

    /// Secrets already present, for the atomic uniqueness check
    secrets: DashSet<String>,

    /// Monotonic sequence counter for insertion ordering
    next_seq: AtomicU64,
}

impl AsyncPassStore {
    /// Create an empty store
    pub fn new() -> Self {
        AsyncPassStore {
            passes: DashMap::new(),
            secrets: DashSet::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a newly issued pass
    ///
    /// The secret is reserved first with an atomic check-and-insert; a
    /// duplicate is rejected before the record is stored, so no partial
    /// write is ever visible.
    ///
    /// # Errors
    ///
    /// Returns [`IssuanceError::PersistenceFailed`] if a pass with the
    /// same secret already exists.
    pub fn insert(&self, pass: IssuedPass) -> Result<(), IssuanceError> {
        if !self.secrets.insert(pass.secret.clone()) {
            return Err(IssuanceError::persistence_failed(format!(
                "a pass with secret '{}' already exists",
                pass.secret
            )));
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.passes.insert(seq, pass);
        Ok(())
    }

    /// All passes owned by an identity, in issuance order
    ///
    /// An owner with no passes yields an empty vector, a valid state,
    /// distinct from a fetch error.
    ///
    /// # Errors
    ///
    /// The in-memory store cannot fail to read; the `Result` carries the
    /// storage contract for callers that substitute fallible stores.
    pub fn passes_for_owner(&self, owner_id: &str) -> Result<Vec<IssuedPass>, IssuanceError> {
        let mut owned: Vec<(u64, IssuedPass)> = self
            .passes
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        owned.sort_by_key(|(seq, _)| *seq);
        Ok(owned.into_iter().map(|(_, pass)| pass).collect())
    }

    /// Distinct owner ids with at least one pass, sorted
    pub fn owner_ids(&self) -> Vec<String> {
        self.passes
            .iter()
            .map(|entry| entry.value().owner_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Total number of stored passes
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether the store holds no passes
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

/// Read-side view over the thread-safe store
///
/// The concurrent counterpart of
/// [`PassRegistry`](crate::core::PassRegistry); verification codes come
/// from [`VerificationCode`](crate::core::VerificationCode) either way.
#[derive(Debug, Clone)]
pub struct AsyncPassRegistry {
    store: Arc<AsyncPassStore>,
}

impl AsyncPassRegistry {
    /// Create a registry over a shared store
    pub fn new(store: Arc<AsyncPassStore>) -> Self {
        AsyncPassRegistry { store }
    }

    /// All passes owned by an identity, in issuance order
    ///
    /// # Errors
    ///
    /// Returns [`IssuanceError::PersistenceFailed`] if the store cannot
    /// be read.
    pub fn list_passes_for(&self, owner_id: &str) -> Result<Vec<IssuedPass>, IssuanceError> {
        self.store.passes_for_owner(owner_id)
    }
}
