//! Pass catalog and station list configuration
//!
//! The offering catalog and the station list are configuration inputs,
//! not computed by the engine. Both are loaded from CSV files:
//!
//! - Offerings: `title,price,duration_unit,features,popular` where
//!   `features` is a `;`-separated list of feature lines. A line prefixed
//!   with `-` is listed as not included; an optional `+` prefix marks an
//!   included line explicitly.
//! - Stations: `name,line`.
//!
//! Loading failures are fatal for the pipeline: a broken catalog means
//! nothing can be sold against it.

use crate::types::{DurationUnit, PassError, PassFeature, PassOffering, ValidationError};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// A station in the service network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Station name, the identifier used in zone selections
    pub name: String,

    /// Metro line the station sits on
    pub line: String,
}

impl Station {
    /// Create a station entry
    pub fn new(name: impl Into<String>, line: impl Into<String>) -> Self {
        Station {
            name: name.into(),
            line: line.into(),
        }
    }
}

/// The closed list of stations zones may be selected from
///
/// Membership is the only question the workflow ever asks of this list;
/// geography (coordinates, adjacency, nearest-station lookup) is out of
/// scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    /// Create a station list from configuration entries
    pub fn new(stations: Vec<Station>) -> Self {
        StationList { stations }
    }

    /// Whether a station name is part of the network
    pub fn contains(&self, name: &str) -> bool {
        self.stations.iter().any(|station| station.name == name)
    }

    /// All configured stations, in configuration order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of configured stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Offering row as deserialized from the offerings CSV
#[derive(Debug, Deserialize)]
struct OfferingRow {
    title: String,
    price: String,
    duration_unit: String,
    features: String,
    popular: String,
}

/// Station row as deserialized from the stations CSV
#[derive(Debug, Deserialize)]
struct StationRow {
    name: String,
    line: String,
}

/// The configured catalog: purchasable offerings plus the station list
///
/// The station list is shared (`Arc`) so each payment session can hold it
/// without borrowing from the catalog.
#[derive(Debug, Clone)]
pub struct PassCatalog {
    offerings: Vec<PassOffering>,
    stations: Arc<StationList>,
}

impl PassCatalog {
    /// Create a catalog from already-built parts
    pub fn new(offerings: Vec<PassOffering>, stations: StationList) -> Self {
        PassCatalog {
            offerings,
            stations: Arc::new(stations),
        }
    }

    /// Load the catalog from the two CSV configuration files
    ///
    /// # Errors
    ///
    /// Returns [`PassError::Io`] if either file cannot be opened and
    /// [`PassError::Parse`] if a row is malformed (bad price, unknown
    /// duration unit, non-boolean `popular` flag, missing columns).
    pub fn load(offerings_path: &Path, stations_path: &Path) -> Result<Self, PassError> {
        let offerings = load_offerings(offerings_path)?;
        let stations = load_stations(stations_path)?;
        Ok(Self::new(offerings, stations))
    }

    /// Resolve an offering by title
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownOffering`] if no offering with
    /// that title exists.
    pub fn offering(&self, title: &str) -> Result<&PassOffering, ValidationError> {
        self.offerings
            .iter()
            .find(|offering| offering.title == title)
            .ok_or_else(|| ValidationError::unknown_offering(title))
    }

    /// All configured offerings, in configuration order
    pub fn offerings(&self) -> &[PassOffering] {
        &self.offerings
    }

    /// The shared station list
    pub fn stations(&self) -> Arc<StationList> {
        Arc::clone(&self.stations)
    }
}

/// Read and parse the offerings configuration file
fn load_offerings(path: &Path) -> Result<Vec<PassOffering>, PassError> {
    let file = File::open(path)
        .map_err(|e| PassError::io(format!("Failed to open file '{}': {}", path.display(), e)))?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut offerings = Vec::new();
    for result in reader.deserialize::<OfferingRow>() {
        let row = result?;
        offerings.push(parse_offering_row(row)?);
    }

    Ok(offerings)
}

/// Read and parse the stations configuration file
fn load_stations(path: &Path) -> Result<StationList, PassError> {
    let file = File::open(path)
        .map_err(|e| PassError::io(format!("Failed to open file '{}': {}", path.display(), e)))?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut stations = Vec::new();
    for result in reader.deserialize::<StationRow>() {
        let row = result?;
        stations.push(Station::new(row.name, row.line));
    }

    Ok(StationList::new(stations))
}

/// Convert an offerings CSV row into a `PassOffering`
fn parse_offering_row(row: OfferingRow) -> Result<PassOffering, PassError> {
    let price = Decimal::from_str(row.price.trim()).map_err(|_| {
        PassError::parse(
            None,
            format!("Invalid price '{}' for offering '{}'", row.price, row.title),
        )
    })?;

    let duration_unit = DurationUnit::parse(&row.duration_unit).ok_or_else(|| {
        PassError::parse(
            None,
            format!(
                "Invalid duration unit '{}' for offering '{}'",
                row.duration_unit, row.title
            ),
        )
    })?;

    let popular = match row.popular.trim().to_lowercase().as_str() {
        "true" => true,
        "false" => false,
        other => {
            return Err(PassError::parse(
                None,
                format!(
                    "Invalid popular flag '{}' for offering '{}'",
                    other, row.title
                ),
            ))
        }
    };

    Ok(PassOffering {
        title: row.title,
        price,
        duration_unit,
        features: parse_features(&row.features),
        popular,
    })
}

/// Split a `;`-separated feature list into feature lines
///
/// A `-` prefix marks the line as not included; a `+` prefix is accepted
/// and stripped. Empty segments are skipped.
fn parse_features(value: &str) -> Vec<PassFeature> {
    value
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if let Some(text) = segment.strip_prefix('-') {
                PassFeature {
                    text: text.trim().to_string(),
                    included: false,
                }
            } else {
                let text = segment.strip_prefix('+').unwrap_or(segment);
                PassFeature {
                    text: text.trim().to_string(),
                    included: true,
                }
            }
        })
        .collect()
}
