//! Zone selection
//!
//! Captures an origin and destination station against the closed station
//! list. Purely local state: no network calls, no storage. A payment
//! session may only be confirmed once both zones are set.

use crate::catalog::StationList;
use crate::types::ValidationError;
use std::sync::Arc;

/// A confirmed zone pair
///
/// Embedded into the issued pass as-is (not normalized). Home and
/// destination may be equal; single-zone passes are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSelection {
    /// Origin station
    pub home_zone: String,

    /// Destination station
    pub destination_zone: String,
}

/// Captures the zone pair for a purchase
///
/// Both selections validate station membership immediately, so an
/// unknown station is surfaced at selection time rather than at
/// confirmation.
#[derive(Debug, Clone)]
pub struct ZoneSelector {
    stations: Arc<StationList>,
    home_zone: Option<String>,
    destination_zone: Option<String>,
}

impl ZoneSelector {
    /// Create a selector over the configured station list
    pub fn new(stations: Arc<StationList>) -> Self {
        ZoneSelector {
            stations,
            home_zone: None,
            destination_zone: None,
        }
    }

    /// Select the home (origin) zone
    ///
    /// Re-selection overwrites the previous choice.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownStation`] if the station is not
    /// part of the configured list; the previous selection is kept.
    pub fn select_home_zone(&mut self, station: &str) -> Result<(), ValidationError> {
        let station = station.trim();
        if !self.stations.contains(station) {
            return Err(ValidationError::unknown_station(station));
        }
        self.home_zone = Some(station.to_string());
        Ok(())
    }

    /// Select the destination zone
    ///
    /// Re-selection overwrites the previous choice.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownStation`] if the station is not
    /// part of the configured list; the previous selection is kept.
    pub fn select_destination_zone(&mut self, station: &str) -> Result<(), ValidationError> {
        let station = station.trim();
        if !self.stations.contains(station) {
            return Err(ValidationError::unknown_station(station));
        }
        self.destination_zone = Some(station.to_string());
        Ok(())
    }

    /// Whether confirmation may proceed
    ///
    /// True iff both zones are set. Equality between them does not
    /// matter.
    pub fn can_confirm(&self) -> bool {
        self.home_zone.is_some() && self.destination_zone.is_some()
    }

    /// The currently selected home zone, if any
    pub fn home_zone(&self) -> Option<&str> {
        self.home_zone.as_deref()
    }

    /// The currently selected destination zone, if any
    pub fn destination_zone(&self) -> Option<&str> {
        self.destination_zone.as_deref()
    }

    /// Produce the confirmed zone pair
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZonesIncomplete`] if either zone is
    /// still unset.
    pub fn selection(&self) -> Result<ZoneSelection, ValidationError> {
        match (&self.home_zone, &self.destination_zone) {
            (Some(home_zone), Some(destination_zone)) => Ok(ZoneSelection {
                home_zone: home_zone.clone(),
                destination_zone: destination_zone.clone(),
            }),
            _ => Err(ValidationError::ZonesIncomplete),
        }
    }
}
