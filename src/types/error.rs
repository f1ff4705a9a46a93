//! Error types for the transit pass engine
//!
//! All the ways the pass issuance workflow can reject input or fail,
//! split by where recovery happens. Each variant renders a message fit
//! for direct display on the CLI's stderr.
//!
//! # Error Categories
//!
//! - **Validation Errors**: instrument format invalid, zones incomplete,
//!   unknown catalog entries, rejected state transitions. Recovered
//!   locally: the session stays in place and the input is corrected.
//!   These never reach storage.
//! - **Issuance Errors**: missing owner identity (fatal for the attempt)
//!   and storage rejections (retryable; the session returns to the chosen
//!   instrument so it need not be re-entered).
//! - **Pipeline Errors**: file I/O and CSV parsing failures from the
//!   batch front end.

use crate::types::instrument::CardBrand;
use thiserror::Error;

/// Validation failures raised before any storage interaction
///
/// Each variant carries enough context to tell the user what to correct.
/// A validation error never advances the payment session and never
/// creates a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The station is not part of the configured station list
    #[error("Unknown station '{station}'")]
    UnknownStation {
        /// The station name that was not found
        station: String,
    },

    /// Zone confirmation was attempted before both zones were selected
    #[error("Both home and destination zones must be selected")]
    ZonesIncomplete,

    /// The requested pass type does not exist in the offering catalog
    #[error("Unknown pass offering '{title}'")]
    UnknownOffering {
        /// The offering title that was not found
        title: String,
    },

    /// The card number contains characters other than digits
    #[error("Card number may contain only digits")]
    MalformedCardNumber,

    /// The card number's length is not acceptable for its detected brand
    ///
    /// Also raised when no brand rule matched the prefix, since `Unknown`
    /// has no acceptable lengths.
    #[error("{brand} cards with {length} digits are not accepted")]
    InvalidCardLength {
        /// Brand detected from the number's prefix
        brand: CardBrand,
        /// Number of digits that were typed
        length: usize,
    },

    /// The UPI handle does not end with a whitelisted provider suffix
    #[error("UPI handle '{handle}' is not registered with a supported provider")]
    UnsupportedUpiHandle {
        /// The rejected handle
        handle: String,
    },

    /// The wallet provider is not one of the enumerated options
    #[error("Unknown wallet provider '{provider}'")]
    UnknownWalletProvider {
        /// The rejected provider name
        provider: String,
    },

    /// The bank is not one of the enumerated net-banking options
    #[error("Unknown net-banking bank '{bank}'")]
    UnknownBank {
        /// The rejected bank name
        bank: String,
    },

    /// The EMI tenor is not one of the supported plans
    #[error("Unsupported EMI tenor '{tenor}'")]
    UnsupportedEmiTenor {
        /// The rejected tenor input
        tenor: String,
    },

    /// Payment was submitted without a confirmed instrument
    ///
    /// The submission is a no-op; the caller should prompt the user to
    /// choose a payment mode.
    #[error("No payment method has been chosen")]
    NoInstrumentChosen,

    /// A session operation was invoked in a state where it is not defined
    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        /// Name of the state the session was in
        state: &'static str,
        /// The operation that was attempted
        action: &'static str,
    },
}

/// Failures of the issuance commit itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssuanceError {
    /// No authenticated owner identity was available
    ///
    /// Fatal for this attempt: the workflow must not reach storage.
    /// The caller is responsible for resolving an identity before a
    /// payment session is entered.
    #[error("No authenticated owner is available for issuance")]
    IdentityMissing,

    /// The pass store was unreachable or rejected the insert
    ///
    /// Retryable: the session returns to the chosen instrument and the
    /// user may submit again. Either the record exists in full or not at
    /// all; no partial write is ever visible to readers.
    #[error("Pass storage rejected the insert: {detail}")]
    PersistenceFailed {
        /// Description of the storage failure
        detail: String,
    },
}

/// Top-level error type for the processing pipeline
///
/// Wraps the domain error categories and adds the file-level failures
/// the CSV front end can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    /// A validation failure (recoverable; the record is skipped)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An issuance failure (identity missing or storage rejection)
    #[error(transparent)]
    Issuance(#[from] IssuanceError),

    /// A CSV row could not be parsed
    ///
    /// Recoverable: the malformed row is skipped and processing moves on
    /// to the next one.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Input line of the bad row, when the parser knows it
        line: Option<u64>,
        /// What went wrong with the row
        message: String,
    },

    /// A file could not be read or written
    ///
    /// Usually fatal for the run (permissions, missing file, full disk).
    #[error("I/O error: {message}")]
    Io {
        /// The underlying I/O failure
        message: String,
    },
}

impl From<std::io::Error> for PassError {
    fn from(error: std::io::Error) -> Self {
        PassError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for PassError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PassError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Constructor shorthands used throughout the workflow

impl ValidationError {
    /// Create an UnknownStation error
    pub fn unknown_station(station: &str) -> Self {
        ValidationError::UnknownStation {
            station: station.to_string(),
        }
    }

    /// Create an UnknownOffering error
    pub fn unknown_offering(title: &str) -> Self {
        ValidationError::UnknownOffering {
            title: title.to_string(),
        }
    }

    /// Create an InvalidCardLength error
    pub fn invalid_card_length(brand: CardBrand, length: usize) -> Self {
        ValidationError::InvalidCardLength { brand, length }
    }

    /// Create an UnsupportedUpiHandle error
    pub fn unsupported_upi_handle(handle: &str) -> Self {
        ValidationError::UnsupportedUpiHandle {
            handle: handle.to_string(),
        }
    }

    /// Create an UnknownWalletProvider error
    pub fn unknown_wallet_provider(provider: &str) -> Self {
        ValidationError::UnknownWalletProvider {
            provider: provider.to_string(),
        }
    }

    /// Create an UnknownBank error
    pub fn unknown_bank(bank: &str) -> Self {
        ValidationError::UnknownBank {
            bank: bank.to_string(),
        }
    }

    /// Create an UnsupportedEmiTenor error
    pub fn unsupported_emi_tenor(tenor: &str) -> Self {
        ValidationError::UnsupportedEmiTenor {
            tenor: tenor.to_string(),
        }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(state: &'static str, action: &'static str) -> Self {
        ValidationError::InvalidTransition { state, action }
    }
}

impl IssuanceError {
    /// Create a PersistenceFailed error
    pub fn persistence_failed(detail: impl Into<String>) -> Self {
        IssuanceError::PersistenceFailed {
            detail: detail.into(),
        }
    }
}

impl PassError {
    /// Create a Parse error
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        PassError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an Io error
    pub fn io(message: impl Into<String>) -> Self {
        PassError::Io {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unknown_station(
        ValidationError::UnknownStation { station: "Atlantis".to_string() },
        "Unknown station 'Atlantis'"
    )]
    #[case::zones_incomplete(
        ValidationError::ZonesIncomplete,
        "Both home and destination zones must be selected"
    )]
    #[case::unknown_offering(
        ValidationError::UnknownOffering { title: "Gold Pass".to_string() },
        "Unknown pass offering 'Gold Pass'"
    )]
    #[case::invalid_card_length(
        ValidationError::InvalidCardLength { brand: CardBrand::Visa, length: 5 },
        "Visa cards with 5 digits are not accepted"
    )]
    #[case::unsupported_upi(
        ValidationError::UnsupportedUpiHandle { handle: "user@gmail.com".to_string() },
        "UPI handle 'user@gmail.com' is not registered with a supported provider"
    )]
    #[case::no_instrument(
        ValidationError::NoInstrumentChosen,
        "No payment method has been chosen"
    )]
    #[case::invalid_transition(
        ValidationError::InvalidTransition { state: "Processing", action: "confirm zones" },
        "Cannot confirm zones while the session is Processing"
    )]
    fn test_validation_error_display(#[case] error: ValidationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::identity_missing(
        IssuanceError::IdentityMissing,
        "No authenticated owner is available for issuance"
    )]
    #[case::persistence_failed(
        IssuanceError::PersistenceFailed { detail: "store offline".to_string() },
        "Pass storage rejected the insert: store offline"
    )]
    fn test_issuance_error_display(#[case] error: IssuanceError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::parse_with_line(
        PassError::Parse { line: Some(42), message: "bad field".to_string() },
        "CSV parse error at line 42: bad field"
    )]
    #[case::parse_without_line(
        PassError::Parse { line: None, message: "bad field".to_string() },
        "CSV parse error: bad field"
    )]
    #[case::io_error(
        PassError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    fn test_pass_error_display(#[case] error: PassError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_validation_error_wraps_transparently() {
        let error: PassError = ValidationError::ZonesIncomplete.into();
        assert_eq!(
            error.to_string(),
            "Both home and destination zones must be selected"
        );
    }

    #[test]
    fn test_issuance_error_wraps_transparently() {
        let error: PassError = IssuanceError::IdentityMissing.into();
        assert_eq!(
            error.to_string(),
            "No authenticated owner is available for issuance"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: PassError = io_error.into();
        assert!(matches!(error, PassError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[rstest]
    #[case(
        ValidationError::unknown_station("Atlantis"),
        ValidationError::UnknownStation { station: "Atlantis".to_string() }
    )]
    #[case(
        ValidationError::invalid_card_length(CardBrand::Amex, 14),
        ValidationError::InvalidCardLength { brand: CardBrand::Amex, length: 14 }
    )]
    #[case(
        ValidationError::unsupported_emi_tenor("7"),
        ValidationError::UnsupportedEmiTenor { tenor: "7".to_string() }
    )]
    fn test_helper_functions(#[case] result: ValidationError, #[case] expected: ValidationError) {
        assert_eq!(result, expected);
    }
}
