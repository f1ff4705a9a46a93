//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `offering`: Pass catalog entries and their feature lines
//! - `instrument`: Payment instrument tabs, card brands, and descriptors
//! - `identity`: Owner identity supplied by the external identity provider
//! - `pass`: Issued pass records (the persisted domain object)
//! - `purchase`: Purchase request records (the pipeline input)
//! - `error`: Error taxonomy for validation, issuance, and the pipeline

pub mod error;
pub mod identity;
pub mod instrument;
pub mod offering;
pub mod pass;
pub mod purchase;

pub use error::{IssuanceError, PassError, ValidationError};
pub use identity::OwnerIdentity;
pub use instrument::{CardBrand, InstrumentTab, PaymentInstrument};
pub use offering::{DurationUnit, PassFeature, PassOffering};
pub use pass::IssuedPass;
pub use purchase::PurchaseRecord;
