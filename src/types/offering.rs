//! Pass offering types
//!
//! This module defines the static catalog entries a user can purchase.
//! Offerings are configuration inputs: they are loaded by the catalog
//! module and never mutated by the workflow.

use rust_decimal::Decimal;

/// Validity unit of a pass offering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    /// Valid for a single trip
    Trip,

    /// Valid for one day
    Day,

    /// Valid for one month
    Month,
}

impl DurationUnit {
    /// Parse a duration unit from its configuration spelling
    ///
    /// Accepts `trip`, `day`, and `month` case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "trip" => Some(DurationUnit::Trip),
            "day" => Some(DurationUnit::Day),
            "month" => Some(DurationUnit::Month),
            _ => None,
        }
    }
}

/// A single feature line on an offering card
///
/// `included` distinguishes features the tier provides from features
/// listed as absent (shown struck through in the storefront).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassFeature {
    /// Feature description text
    pub text: String,

    /// Whether this tier includes the feature
    pub included: bool,
}

/// A purchasable pass tier from the catalog
///
/// Immutable configuration. One offering may generate many issued passes,
/// one per purchase; the offering's `title` and `price` are copied onto
/// each pass at issuance time.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOffering {
    /// Display title, also the lookup key for purchase requests
    pub title: String,

    /// Price in whole currency units (no minor-unit scaling)
    pub price: Decimal,

    /// Validity unit of the pass
    pub duration_unit: DurationUnit,

    /// Ordered feature lines shown on the offering card
    pub features: Vec<PassFeature>,

    /// Whether the storefront highlights this tier
    pub popular: bool,
}
