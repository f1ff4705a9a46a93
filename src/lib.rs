//! Transit Pass Engine Library
//! # Overview
//!
//! This library implements the pass issuance workflow for a transit-pass
//! storefront: zone selection, payment-instrument validation, a payment
//! session state machine, the issuance commit, and the read-side pass
//! registry, plus a streaming CSV pipeline with sync and async
//! processing strategies.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (offerings, instruments, passes, errors)
//! - [`validation`] - Stateless instrument format validation
//! - [`catalog`] - Offering catalog and station list configuration
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::session`] - The payment session state machine
//!   - [`core::issuance`] - Secret generation and the atomic commit
//!   - [`core::registry`] - Passes per owner and verification codes
//! - [`io`] - I/O handling with pluggable reading strategies
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Workflow
//!
//! Each purchase request walks one payment session:
//!
//! - **Zone selection**: origin and destination from the closed station
//!   list; both must be set before confirmation
//! - **Instrument capture**: free tab switching, format validation per
//!   instrument family (UPI whitelist, brand-aware card lengths,
//!   enumerated wallets/banks/tenors)
//! - **Submission**: only with a confirmed descriptor
//! - **Commit**: a fresh high-entropy secret, one atomic insert; failure
//!   returns the session to the chosen instrument for retry
//!
//! # Verification
//!
//! Each issued pass is displayed with a verification code derived
//! deterministically from its secret; the code encodes exactly the raw
//! secret and nothing else.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;
pub mod validation;

pub use catalog::{PassCatalog, Station, StationList};
pub use crate::core::{
    AsyncIssuanceEngine, AsyncPassRegistry, AsyncPassStore, IssuanceEngine, PassRegistry,
    PassStore, PassVault, PaymentSession, SessionState, VerificationCode, ZoneSelection,
    ZoneSelector,
};
pub use io::write_passes_csv;
pub use types::{
    CardBrand, DurationUnit, InstrumentTab, IssuanceError, IssuedPass, OwnerIdentity, PassError,
    PassFeature, PassOffering, PaymentInstrument, PurchaseRecord, ValidationError,
};
