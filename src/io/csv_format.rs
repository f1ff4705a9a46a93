//! CSV format handling for purchase requests and issued-pass output
//!
//! Everything that knows the shape of a CSV row lives here: the input
//! record struct, its conversion into the domain `PurchaseRecord`, and
//! the issued-pass output writer. The readers stream rows; this module
//! decides what the rows mean. Conversion takes no I/O of its own, so
//! the format rules test without files.

use crate::types::{InstrumentTab, IssuedPass, PurchaseRecord};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: owner_id, owner_name,
/// owner_email, pass_type, home_zone, destination_zone, method,
/// instrument. Name and email may be empty; the conversion treats empty
/// values as absent so the identity fallbacks apply.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PurchaseCsvRecord {
    pub owner_id: String,
    pub owner_name: String,
    pub owner_email: String,
    pub pass_type: String,
    pub home_zone: String,
    pub destination_zone: String,
    pub method: String,
    pub instrument: String,
}

/// Convert a deserialized row into a `PurchaseRecord`
///
/// Parses the method column into an [`InstrumentTab`] and maps empty
/// identity fields to absent values. Offering, station, and instrument
/// validation are not done here; the engine owns the catalog and the
/// validator, so a converted record may still be rejected downstream.
///
/// # Errors
///
/// Returns a message naming the owner when the method column is not one
/// of the recognized instrument families.
pub fn convert_purchase_record(csv_record: PurchaseCsvRecord) -> Result<PurchaseRecord, String> {
    let tab = match csv_record.method.trim().to_lowercase().as_str() {
        "upi" => InstrumentTab::Upi,
        "card" | "cards" => InstrumentTab::Cards,
        "wallet" | "wallets" => InstrumentTab::Wallets,
        "netbanking" => InstrumentTab::NetBanking,
        "emi" => InstrumentTab::Emi,
        _ => {
            return Err(format!(
                "Invalid payment method '{}' for owner '{}'",
                csv_record.method, csv_record.owner_id
            ))
        }
    };

    Ok(PurchaseRecord {
        owner_id: csv_record.owner_id.trim().to_string(),
        owner_name: non_empty(csv_record.owner_name),
        owner_email: non_empty(csv_record.owner_email),
        pass_type: csv_record.pass_type.trim().to_string(),
        home_zone: csv_record.home_zone.trim().to_string(),
        destination_zone: csv_record.destination_zone.trim().to_string(),
        tab,
        instrument: csv_record.instrument.trim().to_string(),
    })
}

/// Trim a field and map the empty result to None
fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Write issued passes as the output CSV
///
/// Columns: owner_id, name, email, pass_type, price, home_zone,
/// destination_zone, secret, payment_mode. The rows are stably sorted by
/// owner id, so the output is deterministic while each owner's passes
/// keep their issuance order.
///
/// # Errors
///
/// Returns a message describing the failed write or flush.
pub fn write_passes_csv(passes: &[IssuedPass], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "owner_id",
            "name",
            "email",
            "pass_type",
            "price",
            "home_zone",
            "destination_zone",
            "secret",
            "payment_mode",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Stable sort by owner id keeps per-owner issuance order intact
    let mut sorted_passes = passes.to_vec();
    sorted_passes.sort_by(|a, b| a.owner_id.cmp(&b.owner_id));

    for pass in sorted_passes {
        writer
            .write_record(&[
                pass.owner_id,
                pass.owner_name,
                pass.owner_email,
                pass.pass_type,
                pass.price.to_string(),
                pass.home_zone,
                pass.destination_zone,
                pass.secret,
                pass.payment_mode,
            ])
            .map_err(|e| format!("Failed to write pass record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
