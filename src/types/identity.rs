//! Owner identity types
//!
//! The identity provider is an external collaborator: the engine trusts
//! the identity it is handed and performs no credential checks. Identity
//! is always passed in explicitly; workflow code never reads it from
//! ambient state.

use crate::types::error::IssuanceError;

/// The authenticated owner a pass is issued to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerIdentity {
    /// Stable identifier from the identity provider
    pub id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Contact email address
    pub email: String,
}

impl OwnerIdentity {
    /// Create an identity from already-resolved fields
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        OwnerIdentity {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// Resolve an identity from raw provider fields
    ///
    /// A blank id means no authenticated owner is available, which is
    /// fatal for the issuance attempt. Missing name or email fall back to
    /// placeholder values rather than blocking the purchase.
    ///
    /// # Errors
    ///
    /// Returns [`IssuanceError::IdentityMissing`] if `id` is empty or
    /// whitespace-only.
    pub fn resolve(
        id: &str,
        display_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, IssuanceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(IssuanceError::IdentityMissing);
        }

        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown User");
        let email = email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .unwrap_or("No Email");

        Ok(OwnerIdentity::new(id, display_name, email))
    }
}
