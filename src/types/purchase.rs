//! Purchase request records
//!
//! A `PurchaseRecord` is one row of pipeline input: the owner's identity
//! fields, the offering they want, the zone pair, and the raw instrument
//! input for the chosen payment tab. The engine drives each record
//! through a full payment session.

use crate::types::error::IssuanceError;
use crate::types::identity::OwnerIdentity;
use crate::types::instrument::InstrumentTab;

/// Input purchase request from CSV
///
/// Identity fields are kept raw here; [`PurchaseRecord::owner`] resolves
/// them (with placeholder fallbacks) when the engine needs an
/// authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    /// Identity-provider id of the purchaser (blank means unauthenticated)
    pub owner_id: String,

    /// Display name, if the provider supplied one
    pub owner_name: Option<String>,

    /// Email address, if the provider supplied one
    pub owner_email: Option<String>,

    /// Title of the offering to purchase
    pub pass_type: String,

    /// Origin station for the zone pair
    pub home_zone: String,

    /// Destination station for the zone pair
    pub destination_zone: String,

    /// Payment tab the instrument input belongs to
    pub tab: InstrumentTab,

    /// Raw instrument input (UPI handle, card number, wallet name,
    /// bank name, or EMI tenor), validated by the session
    pub instrument: String,
}

impl PurchaseRecord {
    /// Resolve the owner identity for this request
    ///
    /// # Errors
    ///
    /// Returns [`IssuanceError::IdentityMissing`] if the owner id is
    /// blank.
    pub fn owner(&self) -> Result<OwnerIdentity, IssuanceError> {
        OwnerIdentity::resolve(
            &self.owner_id,
            self.owner_name.as_deref(),
            self.owner_email.as_deref(),
        )
    }
}
