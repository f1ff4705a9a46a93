//! Pass registry (read side)
//!
//! Fetches the passes owned by an identity and derives the verification
//! code each one is displayed with. The registry never writes: passes
//! are read-only to it and to the holder.
//!
//! Rendering the code as a scannable image is an external collaborator's
//! job; this module only supplies the payload, which is exactly the raw
//! secret. Encoding nothing else keeps a captured code's information
//! content minimal: no zones, no price, no owner details.

use crate::core::traits::PassStore;
use crate::types::{IssuanceError, IssuedPass};
use std::fmt;

/// The scannable payload derived from a pass secret
///
/// Derivation is deterministic and pure: the same secret always yields
/// the same code, and the payload carries the secret verbatim with no
/// embedded metadata. This is a rendering step, not a new token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerificationCode {
    payload: String,
}

impl VerificationCode {
    /// Derive the verification code for a secret
    pub fn from_secret(secret: &str) -> Self {
        VerificationCode {
            payload: secret.to_string(),
        }
    }

    /// Derive the verification code for an issued pass
    pub fn for_pass(pass: &IssuedPass) -> Self {
        Self::from_secret(&pass.secret)
    }

    /// The exact string a code renderer must encode
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload)
    }
}

/// Read-side view over a pass store
///
/// Borrowed from the store it reads; see
/// [`IssuanceEngine::registry`](crate::core::IssuanceEngine::registry)
/// for the usual way to obtain one.
#[derive(Debug)]
pub struct PassRegistry<'a, S: PassStore> {
    store: &'a S,
}

impl<'a, S: PassStore> PassRegistry<'a, S> {
    /// Create a registry over a store
    pub fn new(store: &'a S) -> Self {
        PassRegistry { store }
    }

    /// All passes owned by an identity, in issuance order
    ///
    /// An owner with no passes gets an empty vector, not an error; a
    /// store failure is reported as an error so callers can tell the two
    /// apart.
    ///
    /// # Errors
    ///
    /// Returns [`IssuanceError::PersistenceFailed`] if the store cannot
    /// be read.
    pub fn list_passes_for(&self, owner_id: &str) -> Result<Vec<IssuedPass>, IssuanceError> {
        self.store.passes_for_owner(owner_id)
    }
}
