//! Core business logic module
//!
//! This module contains the pass issuance workflow components:
//! - `traits` - Storage contract for interchangeable pass stores
//! - `zone` - Zone selection against the configured station list
//! - `session` - The payment session state machine
//! - `issuance` - Secret generation and the atomic commit
//! - `pass_vault` - Synchronous in-memory pass storage
//! - `registry` - Read side: passes per owner plus verification codes
//! - `engine` - Workflow orchestration for purchase requests
//! - `async` - Thread-safe implementations for concurrent batch issuance

pub mod r#async;
pub mod engine;
pub mod issuance;
pub mod pass_vault;
pub mod registry;
pub mod session;
pub mod traits;
pub mod zone;

pub use engine::IssuanceEngine;
pub use pass_vault::PassVault;
pub use r#async::{AsyncIssuanceEngine, AsyncPassRegistry, AsyncPassStore, BatchProcessor};
pub use registry::{PassRegistry, VerificationCode};
pub use session::{PaymentSession, SessionState};
pub use traits::PassStore;
pub use zone::{ZoneSelection, ZoneSelector};
