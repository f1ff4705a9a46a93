//! Payment instrument types
//!
//! This module defines the instrument tabs offered by the payment screen,
//! the card brands recognized by the classifier, and the validated
//! `PaymentInstrument` descriptor that a confirmed instrument produces.

use std::fmt;

/// Instrument tabs available in the payment session
///
/// Each tab corresponds to one instrument family. The user may switch
/// between tabs freely while selecting an instrument; switching does not
/// discard a descriptor confirmed on another tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentTab {
    /// UPI handle entry (e.g. `user@okhdfcbank`)
    Upi,

    /// Card number entry (brand detected from the typed digits)
    Cards,

    /// Wallet provider selection from a fixed list
    Wallets,

    /// Net-banking bank selection from a fixed list
    NetBanking,

    /// EMI tenor selection from a fixed list
    Emi,
}

impl fmt::Display for InstrumentTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstrumentTab::Upi => "UPI",
            InstrumentTab::Cards => "Cards",
            InstrumentTab::Wallets => "Wallets",
            InstrumentTab::NetBanking => "NetBanking",
            InstrumentTab::Emi => "EMI",
        };
        write!(f, "{}", label)
    }
}

/// Card brands recognized by the brand classifier
///
/// Brand determines which card-number lengths are acceptable. `Unknown`
/// has no length entry, so a number whose prefix matches no brand rule
/// can never validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    Visa,
    MasterCard,
    Maestro,
    Amex,
    Discover,
    Diners,
    Jcb,
    UnionPay,
    Unknown,
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardBrand::Visa => "Visa",
            CardBrand::MasterCard => "MasterCard",
            CardBrand::Maestro => "Maestro",
            CardBrand::Amex => "Amex",
            CardBrand::Discover => "Discover",
            CardBrand::Diners => "Diners",
            CardBrand::Jcb => "JCB",
            CardBrand::UnionPay => "UnionPay",
            CardBrand::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// A validated payment instrument descriptor
///
/// Produced only by the instrument validator after the rules for the
/// relevant tab have passed. The `Display` form of this descriptor is the
/// short string persisted as the `payment_mode` of an issued pass; it is
/// immutable after issuance.
///
/// Card descriptors keep only the brand and the last four digits; the
/// full number is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInstrument {
    /// A UPI handle that ends with a whitelisted provider suffix
    Upi {
        /// The full validated handle (e.g. `user@okhdfcbank`)
        handle: String,
    },

    /// A card whose brand and length passed validation
    Card {
        /// Brand detected from the number's prefix
        brand: CardBrand,
        /// Last four digits of the card number
        last4: String,
    },

    /// A wallet provider chosen from the enumerated list
    Wallet {
        /// Canonical provider name (e.g. `PhonePe`)
        provider: String,
    },

    /// A net-banking bank chosen from the enumerated list
    NetBanking {
        /// Canonical bank name (e.g. `HDFC Bank`)
        bank: String,
    },

    /// An EMI plan with a supported tenor
    Emi {
        /// Tenor in months (6, 9, or 12)
        tenor_months: u8,
    },
}

impl PaymentInstrument {
    /// The tab this descriptor was confirmed on
    pub fn tab(&self) -> InstrumentTab {
        match self {
            PaymentInstrument::Upi { .. } => InstrumentTab::Upi,
            PaymentInstrument::Card { .. } => InstrumentTab::Cards,
            PaymentInstrument::Wallet { .. } => InstrumentTab::Wallets,
            PaymentInstrument::NetBanking { .. } => InstrumentTab::NetBanking,
            PaymentInstrument::Emi { .. } => InstrumentTab::Emi,
        }
    }
}

impl fmt::Display for PaymentInstrument {
    /// Render the descriptor as the persisted `payment_mode` string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentInstrument::Upi { .. } => write!(f, "UPI"),
            PaymentInstrument::Card { brand, last4 } => {
                write!(f, "Card ({} {})", brand, last4)
            }
            PaymentInstrument::Wallet { provider } => write!(f, "Wallet ({})", provider),
            PaymentInstrument::NetBanking { bank } => write!(f, "NetBanking ({})", bank),
            PaymentInstrument::Emi { tenor_months } => {
                write!(f, "EMI ({} months)", tenor_months)
            }
        }
    }
}
