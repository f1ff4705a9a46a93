//! Asynchronous implementations for concurrent batch issuance
//!
//! This module contains the thread-safe counterparts of the core
//! components, used by the async processing strategy:
//! - `pass_store` - DashMap-backed pass storage and its registry view
//! - `engine` - Cloneable issuance engine safe to share across tasks
//! - `batch_processor` - Owner-partitioned concurrent batch processing

pub mod batch_processor;
pub mod engine;
pub mod pass_store;

pub use batch_processor::{BatchProcessor, IssuanceOutcome};
pub use engine::AsyncIssuanceEngine;
pub use pass_store::{AsyncPassRegistry, AsyncPassStore};
