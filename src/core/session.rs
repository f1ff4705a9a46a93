//! Payment session state machine
//!
//! A short-lived session that walks one purchase from zone selection to
//! a committed (or failed) issuance:
//!
//! ```text
//! SelectingZones --confirm_zones--> SelectingInstrument
//! SelectingInstrument --confirm_instrument--> InstrumentChosen
//! InstrumentChosen --submit--> Processing
//! Processing --issuance_succeeded--> Succeeded
//! Processing --issuance_failed----> InstrumentChosen (retryable)
//! ```
//!
//! Instrument capture and the commit are deliberately decoupled: format
//! validation is fast and local and may be retried freely, while a commit
//! failure returns the session to `InstrumentChosen` with the descriptor
//! intact so the user never re-enters an instrument because storage
//! hiccuped.
//!
//! Every operation invoked in a state where it is not defined returns a
//! typed rejection; there are no silent failures.

use crate::catalog::{PassCatalog, StationList};
use crate::core::zone::{ZoneSelection, ZoneSelector};
use crate::types::{
    InstrumentTab, PassError, PassOffering, PaymentInstrument, PurchaseRecord, ValidationError,
};
use crate::validation::validate_instrument;
use std::sync::Arc;

/// The states a payment session moves through
///
/// A failed commit does not get its own resting state: the session
/// records the failure reason and returns to [`InstrumentChosen`] so the
/// submission can be retried with the same descriptor.
///
/// [`InstrumentChosen`]: SessionState::InstrumentChosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Capturing the origin/destination zone pair
    SelectingZones,

    /// Zones confirmed; browsing instrument tabs
    SelectingInstrument,

    /// A validated descriptor is active; ready to submit
    InstrumentChosen,

    /// Submitted; waiting on the issuance commit
    Processing,

    /// The pass was committed; the session is closed
    Succeeded,
}

impl SessionState {
    /// State name used in transition-rejection messages
    fn name(self) -> &'static str {
        match self {
            SessionState::SelectingZones => "SelectingZones",
            SessionState::SelectingInstrument => "SelectingInstrument",
            SessionState::InstrumentChosen => "InstrumentChosen",
            SessionState::Processing => "Processing",
            SessionState::Succeeded => "Succeeded",
        }
    }
}

/// One purchase attempt, from zone capture to commit outcome
///
/// Sessions are single-user and sequential: all transitions come from
/// one logical stream of user input. Nothing here guards against
/// concurrent mutation of the same session; tab switches are simply
/// last-write-wins.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    offering: PassOffering,
    zones: ZoneSelector,
    selection: Option<ZoneSelection>,
    active_tab: InstrumentTab,
    instrument: Option<PaymentInstrument>,
    state: SessionState,
    last_failure: Option<String>,
}

impl PaymentSession {
    /// Open a session for an offering against the configured stations
    ///
    /// The session starts in `SelectingZones` with the UPI tab active
    /// (the storefront's default tab).
    pub fn new(offering: PassOffering, stations: Arc<StationList>) -> Self {
        PaymentSession {
            offering,
            zones: ZoneSelector::new(stations),
            selection: None,
            active_tab: InstrumentTab::Upi,
            instrument: None,
            state: SessionState::SelectingZones,
            last_failure: None,
        }
    }

    /// Current state of the session
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The offering this session is purchasing
    pub fn offering(&self) -> &PassOffering {
        &self.offering
    }

    /// The currently active instrument tab
    pub fn active_tab(&self) -> InstrumentTab {
        self.active_tab
    }

    /// The active (most recently confirmed) descriptor, if any
    pub fn instrument(&self) -> Option<&PaymentInstrument> {
        self.instrument.as_ref()
    }

    /// The confirmed zone pair, available after `confirm_zones`
    pub fn zone_selection(&self) -> Option<&ZoneSelection> {
        self.selection.as_ref()
    }

    /// Reason recorded by the most recent failed commit, if any
    pub fn failure_reason(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Select the home zone (only while selecting zones)
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownStation`] for a station outside
    /// the configured list, or [`ValidationError::InvalidTransition`]
    /// outside `SelectingZones`.
    pub fn select_home_zone(&mut self, station: &str) -> Result<(), ValidationError> {
        self.expect_state(SessionState::SelectingZones, "select a home zone")?;
        self.zones.select_home_zone(station)
    }

    /// Select the destination zone (only while selecting zones)
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownStation`] for a station outside
    /// the configured list, or [`ValidationError::InvalidTransition`]
    /// outside `SelectingZones`.
    pub fn select_destination_zone(&mut self, station: &str) -> Result<(), ValidationError> {
        self.expect_state(SessionState::SelectingZones, "select a destination zone")?;
        self.zones.select_destination_zone(station)
    }

    /// Whether both zones are set and confirmation may proceed
    pub fn can_confirm_zones(&self) -> bool {
        self.zones.can_confirm()
    }

    /// Confirm the zone pair and move on to instrument selection
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZonesIncomplete`] (no transition) if
    /// either zone is unset, or [`ValidationError::InvalidTransition`]
    /// outside `SelectingZones`.
    pub fn confirm_zones(&mut self) -> Result<(), ValidationError> {
        self.expect_state(SessionState::SelectingZones, "confirm zones")?;
        let selection = self.zones.selection()?;
        self.selection = Some(selection);
        self.state = SessionState::SelectingInstrument;
        Ok(())
    }

    /// Switch the active instrument tab
    ///
    /// Free within instrument selection. Switching does not discard a
    /// descriptor confirmed on another tab; only confirming a new
    /// instrument replaces the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] outside
    /// `SelectingInstrument` / `InstrumentChosen`.
    pub fn switch_tab(&mut self, tab: InstrumentTab) -> Result<(), ValidationError> {
        match self.state {
            SessionState::SelectingInstrument | SessionState::InstrumentChosen => {
                self.active_tab = tab;
                Ok(())
            }
            state => Err(ValidationError::invalid_transition(
                state.name(),
                "switch instrument tabs",
            )),
        }
    }

    /// Validate raw input on the active tab and make it the descriptor
    ///
    /// On success the session is in `InstrumentChosen` with the new
    /// descriptor active. On a validation failure the session does not
    /// move and any previously confirmed descriptor stays active.
    ///
    /// # Errors
    ///
    /// Returns the validator's rejection, or
    /// [`ValidationError::InvalidTransition`] outside
    /// `SelectingInstrument` / `InstrumentChosen`.
    pub fn confirm_instrument(&mut self, input: &str) -> Result<&PaymentInstrument, ValidationError> {
        match self.state {
            SessionState::SelectingInstrument | SessionState::InstrumentChosen => {}
            state => {
                return Err(ValidationError::invalid_transition(
                    state.name(),
                    "confirm an instrument",
                ))
            }
        }

        let descriptor = validate_instrument(self.active_tab, input)?;
        self.state = SessionState::InstrumentChosen;
        Ok(self.instrument.insert(descriptor))
    }

    /// Submit the payment for processing
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoInstrumentChosen`] (a no-op; the
    /// caller prompts for a payment mode) if no descriptor has been
    /// confirmed, or [`ValidationError::InvalidTransition`] outside the
    /// instrument-selection states.
    pub fn submit(&mut self) -> Result<(), ValidationError> {
        match self.state {
            SessionState::InstrumentChosen => {
                self.state = SessionState::Processing;
                Ok(())
            }
            SessionState::SelectingInstrument => Err(ValidationError::NoInstrumentChosen),
            state => Err(ValidationError::invalid_transition(state.name(), "submit payment")),
        }
    }

    /// Record a successful commit and close the session
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] outside
    /// `Processing`.
    pub fn issuance_succeeded(&mut self) -> Result<(), ValidationError> {
        self.expect_state(SessionState::Processing, "record issuance success")?;
        self.state = SessionState::Succeeded;
        self.last_failure = None;
        Ok(())
    }

    /// Record a failed commit and return to the chosen instrument
    ///
    /// The descriptor is preserved so the user can retry the submission
    /// without re-entering it; the reason is kept for display.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] outside
    /// `Processing`.
    pub fn issuance_failed(&mut self, reason: impl Into<String>) -> Result<(), ValidationError> {
        self.expect_state(SessionState::Processing, "record issuance failure")?;
        self.state = SessionState::InstrumentChosen;
        self.last_failure = Some(reason.into());
        Ok(())
    }

    /// Abandon a commit that has not resolved
    ///
    /// The caller-boundary timeout policy: rather than hanging on a
    /// commit, the caller may abandon processing and re-attempt. The
    /// session returns to `InstrumentChosen` uncorrupted. Re-submitting
    /// creates a new pass; issuance is not idempotent, so callers must
    /// not re-submit one user intent without explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] outside
    /// `Processing`.
    pub fn abandon_processing(&mut self) -> Result<(), ValidationError> {
        self.expect_state(SessionState::Processing, "abandon processing")?;
        self.state = SessionState::InstrumentChosen;
        Ok(())
    }

    /// Reject the call unless the session is in the expected state
    fn expect_state(
        &self,
        expected: SessionState,
        action: &'static str,
    ) -> Result<(), ValidationError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ValidationError::invalid_transition(self.state.name(), action))
        }
    }
}

/// Drive a purchase request through a fresh session up to submission
///
/// Resolves the offering, selects and confirms zones, switches to the
/// requested tab, confirms the instrument, and submits. On success the
/// returned session is in `Processing`, ready for the issuance commit.
/// Any rejection along the way is returned unchanged; the record is
/// simply not advanced.
pub(crate) fn drive_purchase(
    catalog: &PassCatalog,
    record: &PurchaseRecord,
) -> Result<PaymentSession, PassError> {
    let offering = catalog.offering(&record.pass_type)?.clone();

    let mut session = PaymentSession::new(offering, catalog.stations());
    session.select_home_zone(&record.home_zone)?;
    session.select_destination_zone(&record.destination_zone)?;
    session.confirm_zones()?;
    session.switch_tab(record.tab)?;
    session.confirm_instrument(&record.instrument)?;
    session.submit()?;

    Ok(session)
}
