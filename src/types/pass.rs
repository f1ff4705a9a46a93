//! Issued pass records
//!
//! The persisted outcome of a successful issuance. A pass is created
//! exactly once, never mutated, and never deleted by this engine;
//! lifecycle beyond creation is an external administrative concern.

use rust_decimal::Decimal;

/// A pass committed to durable storage
///
/// Owned by the issuance service: only a successful `issue` call creates
/// one, on behalf of the authenticated owner. The registry and the holder
/// read it; nothing writes to it after creation.
///
/// The `secret` is the boarding credential: a freshly generated
/// high-entropy token, unique across all passes. The verification code
/// shown for boarding encodes exactly this string and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedPass {
    /// Identity-provider id of the owner
    pub owner_id: String,

    /// Owner display name captured at issuance
    pub owner_name: String,

    /// Owner email captured at issuance
    pub owner_email: String,

    /// Offering title copied at issuance time
    pub pass_type: String,

    /// Price paid, copied from the offering
    pub price: Decimal,

    /// Origin station of the zone pair
    pub home_zone: String,

    /// Destination station of the zone pair
    pub destination_zone: String,

    /// Unique high-entropy boarding credential
    pub secret: String,

    /// Display string of the validated payment instrument
    pub payment_mode: String,
}
