//! Pass issuance
//!
//! The commit step of the workflow: generate a fresh high-entropy
//! secret, assemble the pass record, and perform a single atomic insert
//! into the store.
//!
//! Secret generation is independent per call: it never enumerates
//! existing passes, so concurrent issuances cannot race on a
//! check-then-act read. Uniqueness is additionally enforced by the store
//! at insert time.
//!
//! No retries happen here. A storage failure is returned to the caller,
//! whose session goes back to the chosen instrument; re-invoking `issue`
//! is a caller decision and always creates a new pass.

use crate::core::traits::PassStore;
use crate::core::zone::ZoneSelection;
use crate::types::{IssuanceError, IssuedPass, OwnerIdentity, PassOffering, PaymentInstrument};
use uuid::Uuid;

/// Generate a fresh boarding-credential secret
///
/// A random UUID rendered in its hyphenated form. Entropy comes from the
/// operating system RNG; collision probability is negligible, and the
/// store still rejects a duplicate if one ever occurred.
pub fn generate_secret() -> String {
    Uuid::new_v4().to_string()
}

/// Assemble a pass record for a validated purchase
///
/// Copies the offering's title and price, embeds the zone pair, renders
/// the instrument descriptor into the immutable `payment_mode` string,
/// and attaches a freshly generated secret.
pub fn build_pass(
    owner: &OwnerIdentity,
    offering: &PassOffering,
    zones: &ZoneSelection,
    instrument: &PaymentInstrument,
) -> IssuedPass {
    IssuedPass {
        owner_id: owner.id.clone(),
        owner_name: owner.display_name.clone(),
        owner_email: owner.email.clone(),
        pass_type: offering.title.clone(),
        price: offering.price,
        home_zone: zones.home_zone.clone(),
        destination_zone: zones.destination_zone.clone(),
        secret: generate_secret(),
        payment_mode: instrument.to_string(),
    }
}

/// Issue a pass: build the record and commit it to the store
///
/// Preconditions (enforced): the owner identity must be resolved (a
/// blank id is rejected before any storage interaction), the zone pair
/// confirmed, and the instrument validated; the types of the latter two
/// make invalid inputs unrepresentable here.
///
/// Exactly one record is created on success; none on failure.
///
/// # Errors
///
/// * [`IssuanceError::IdentityMissing`] - the owner id is blank; the
///   workflow must not proceed to storage.
/// * [`IssuanceError::PersistenceFailed`] - the store rejected the
///   insert; no partial record is visible and the caller may retry.
pub fn issue_into<S: PassStore + ?Sized>(
    store: &mut S,
    owner: &OwnerIdentity,
    offering: &PassOffering,
    zones: &ZoneSelection,
    instrument: &PaymentInstrument,
) -> Result<IssuedPass, IssuanceError> {
    if owner.id.trim().is_empty() {
        return Err(IssuanceError::IdentityMissing);
    }

    let pass = build_pass(owner, offering, zones, instrument);
    store.insert(pass.clone())?;
    Ok(pass)
}
