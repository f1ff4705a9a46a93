//! Payment instrument validation
//!
//! Stateless format validation for every instrument family. All checks
//! here are local and fast, with no network calls and no storage access,
//! so the session can retry them freely as the user types.
//!
//! # Rules
//!
//! - **Cards**: the brand is classified from the number's prefix with an
//!   ordered first-match-wins rule set, then the digit count is checked
//!   against a per-brand length table. An unrecognized prefix classifies
//!   as [`CardBrand::Unknown`], which has no length entry and therefore
//!   never validates.
//! - **UPI**: the handle must end with one of a fixed whitelist of
//!   provider suffixes. This is deliberately a closed whitelist, not an
//!   email-shaped regex: a well-formed handle on an unlisted provider is
//!   rejected.
//! - **Wallets / net-banking / EMI**: a non-empty choice from the
//!   enumerated options; matching is case-insensitive and the canonical
//!   spelling is stored on the descriptor.
//!
//! None of this is payment-network verification. A descriptor passing
//! these rules means the input is well-formed, nothing more.

use crate::types::error::ValidationError;
use crate::types::instrument::{CardBrand, InstrumentTab, PaymentInstrument};

/// UPI provider suffixes accepted by the handle validator
///
/// A closed whitelist: handles on any other domain are rejected even if
/// they look address-like.
pub const UPI_HANDLE_SUFFIXES: [&str; 13] = [
    "@okhdfcbank",
    "@okicici",
    "@okaxis",
    "@oksbi",
    "@ybl",
    "@ibl",
    "@axl",
    "@paytm",
    "@apl",
    "@ptyes",
    "@ptsbi",
    "@pthdfc",
    "@ptaxis",
];

/// Wallet providers offered on the Wallets tab
pub const WALLET_PROVIDERS: [&str; 4] = ["Amazon Pay", "Google Pay", "Paytm Wallet", "PhonePe"];

/// Banks offered on the NetBanking tab
pub const NETBANKING_BANKS: [&str; 4] = ["HDFC Bank", "ICICI Bank", "SBI", "Axis Bank"];

/// EMI tenors offered, in months
pub const EMI_TENOR_MONTHS: [u8; 3] = [6, 9, 12];

/// Classify a card brand from the typed digits
///
/// Applies an ordered set of prefix rules; the first matching rule wins
/// and an unmatched prefix falls back to [`CardBrand::Unknown`]. The
/// classification is resolvable incrementally as digits are typed, so the
/// storefront can swap the brand icon while the user is still entering
/// the number.
///
/// Rules, in order: Visa `4`; MasterCard `51`–`55`; Maestro
/// `5018|5020|5038|56|58|63|67`; Amex `34|37`; Discover
/// `6011|644`–`649`|`65`; Diners `300`–`305`|`36|38|39`; JCB
/// `2131|1800|35`; UnionPay `62`.
pub fn classify_card_brand(digits: &str) -> CardBrand {
    if digits.starts_with('4') {
        return CardBrand::Visa;
    }
    if prefix_in_range(digits, 2, 51, 55) {
        return CardBrand::MasterCard;
    }
    if ["5018", "5020", "5038"].iter().any(|p| digits.starts_with(p))
        || ["56", "58", "63", "67"].iter().any(|p| digits.starts_with(p))
    {
        return CardBrand::Maestro;
    }
    if digits.starts_with("34") || digits.starts_with("37") {
        return CardBrand::Amex;
    }
    if digits.starts_with("6011") || prefix_in_range(digits, 3, 644, 649) || digits.starts_with("65")
    {
        return CardBrand::Discover;
    }
    if prefix_in_range(digits, 3, 300, 305)
        || digits.starts_with("36")
        || digits.starts_with("38")
        || digits.starts_with("39")
    {
        return CardBrand::Diners;
    }
    if digits.starts_with("2131") || digits.starts_with("1800") || digits.starts_with("35") {
        return CardBrand::Jcb;
    }
    if digits.starts_with("62") {
        return CardBrand::UnionPay;
    }
    CardBrand::Unknown
}

/// Check whether the first `width` digits fall inside a numeric range
///
/// Returns false when fewer than `width` digits have been typed, so a
/// partial prefix never matches a range rule prematurely.
fn prefix_in_range(digits: &str, width: usize, low: u32, high: u32) -> bool {
    digits
        .get(..width)
        .and_then(|prefix| prefix.parse::<u32>().ok())
        .map(|prefix| prefix >= low && prefix <= high)
        .unwrap_or(false)
}

/// Check a card number's digit count against its brand's length table
///
/// Lengths by brand: Visa 13 or 16; MasterCard 16; Maestro 12–19; Amex
/// 15; Discover 16–19; Diners 14–19; JCB 16–19; UnionPay 16–19. `Unknown`
/// has no entry, so it always fails. Non-digit characters fail
/// regardless of length.
pub fn is_valid_card_number(number: &str, brand: CardBrand) -> bool {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let length = number.len();
    match brand {
        CardBrand::Visa => length == 13 || length == 16,
        CardBrand::MasterCard => length == 16,
        CardBrand::Maestro => (12..=19).contains(&length),
        CardBrand::Amex => length == 15,
        CardBrand::Discover => (16..=19).contains(&length),
        CardBrand::Diners => (14..=19).contains(&length),
        CardBrand::Jcb => (16..=19).contains(&length),
        CardBrand::UnionPay => (16..=19).contains(&length),
        CardBrand::Unknown => false,
    }
}

/// Check a UPI handle against the provider suffix whitelist
///
/// True iff the handle ends with a whitelisted suffix and has a
/// non-empty local part before it. `user@gmail.com` is well-formed but
/// rejected: the whitelist is closed.
pub fn is_valid_upi_handle(handle: &str) -> bool {
    let handle = handle.trim();
    UPI_HANDLE_SUFFIXES
        .iter()
        .any(|suffix| handle.ends_with(suffix) && handle.len() > suffix.len())
}

/// Strip the separators users type into card numbers
///
/// Spaces and hyphens are cosmetic; everything else is left in place for
/// the digit check to reject.
fn normalize_card_number(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Look up the canonical spelling of an enumerated choice
///
/// Matching is case-insensitive on the trimmed input.
fn canonical_choice<'a>(options: &[&'a str], input: &str) -> Option<&'a str> {
    let input = input.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input))
        .copied()
}

/// Validate raw instrument input for a tab, producing a descriptor
///
/// This is the single entry point the payment session uses: it applies
/// the family-specific rule for `tab` and returns either a validated
/// [`PaymentInstrument`] or the typed rejection the caller surfaces to
/// the user. A rejection never advances the session.
///
/// # Errors
///
/// Returns the [`ValidationError`] variant describing what to correct:
/// malformed or wrong-length card numbers, an unlisted UPI provider, an
/// unknown wallet/bank choice, or an unsupported EMI tenor.
pub fn validate_instrument(
    tab: InstrumentTab,
    input: &str,
) -> Result<PaymentInstrument, ValidationError> {
    match tab {
        InstrumentTab::Upi => {
            let handle = input.trim();
            if !is_valid_upi_handle(handle) {
                return Err(ValidationError::unsupported_upi_handle(handle));
            }
            Ok(PaymentInstrument::Upi {
                handle: handle.to_string(),
            })
        }
        InstrumentTab::Cards => {
            let number = normalize_card_number(input);
            if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ValidationError::MalformedCardNumber);
            }

            let brand = classify_card_brand(&number);
            if !is_valid_card_number(&number, brand) {
                return Err(ValidationError::invalid_card_length(brand, number.len()));
            }

            let last4 = number[number.len() - 4..].to_string();
            Ok(PaymentInstrument::Card { brand, last4 })
        }
        InstrumentTab::Wallets => match canonical_choice(&WALLET_PROVIDERS, input) {
            Some(provider) => Ok(PaymentInstrument::Wallet {
                provider: provider.to_string(),
            }),
            None => Err(ValidationError::unknown_wallet_provider(input.trim())),
        },
        InstrumentTab::NetBanking => match canonical_choice(&NETBANKING_BANKS, input) {
            Some(bank) => Ok(PaymentInstrument::NetBanking {
                bank: bank.to_string(),
            }),
            None => Err(ValidationError::unknown_bank(input.trim())),
        },
        InstrumentTab::Emi => {
            let tenor = input.trim();
            let lowered = tenor.to_lowercase();
            let digits = lowered
                .strip_suffix(" months")
                .or_else(|| lowered.strip_suffix(" month"))
                .unwrap_or(&lowered)
                .trim();

            match digits.parse::<u8>() {
                Ok(value) if EMI_TENOR_MONTHS.contains(&value) => Ok(PaymentInstrument::Emi {
                    tenor_months: value,
                }),
                _ => Err(ValidationError::unsupported_emi_tenor(tenor)),
            }
        }
    }
}
