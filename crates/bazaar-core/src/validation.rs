//! # Validation Module
//!
//! Input sanitation and advisory validation for the listing and offer forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Never Block Typing                                 │
//! │                                                                         │
//! │  Keystroke                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Sanitize (THIS MODULE)                                                │
//! │  ├── strip non-digits                                                  │
//! │  ├── truncate to the field's digit budget                              │
//! │  └── clamp into the field's range                                      │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Advisory checks (THIS MODULE + combat)                                │
//! │  └── ValidationError values → field highlighted, typing continues     │
//! │                                                                         │
//! │  Hard errors only for caller bugs (see CoreError)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::validation::{clamp_denomination, clamp_stat, normalize_quantity};
//!
//! assert_eq!(clamp_denomination("1234"), 123);
//! assert_eq!(clamp_stat("99999999", 0, 3000), Some(3000));
//! assert_eq!(normalize_quantity(""), 1);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Denomination, Money};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Digits kept by a denomination entry field.
pub const DENOMINATION_MAX_DIGITS: usize = 3;

/// Largest value a single denomination entry field accepts.
pub const DENOMINATION_MAX: u64 = 999;

/// Longest accepted item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

// =============================================================================
// Digit Sanitation
// =============================================================================

/// Strips every character that is not an ASCII digit.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::sanitize_digits;
///
/// assert_eq!(sanitize_digits("1,250g"), "1250");
/// assert_eq!(sanitize_digits("-5"), "5");
/// assert_eq!(sanitize_digits("abc"), "");
/// ```
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parses a non-negative amount, treating anything unparsable as 0.
///
/// A digit string too long for `u64` saturates at `u64::MAX`.
pub fn parse_amount(raw: &str) -> u64 {
    let digits = sanitize_digits(raw);
    if digits.is_empty() {
        return 0;
    }
    // Only digits remain, so the only possible failure is overflow.
    digits.parse().unwrap_or(u64::MAX)
}

// =============================================================================
// Currency Entry
// =============================================================================

/// Sanitizes one denomination entry field.
///
/// ## Rules
/// - Only digits are kept
/// - At most 3 digits
/// - Empty input becomes 0
/// - Clamped to 0..=999
pub fn clamp_denomination(raw: &str) -> u64 {
    let digits: String = sanitize_digits(raw)
        .chars()
        .take(DENOMINATION_MAX_DIGITS)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(0).min(DENOMINATION_MAX)
}

/// The four price entry fields of the listing and offer forms.
///
/// Typed input is clamped to 0..=999 per field. Populating from a stored
/// price (editing an existing listing) decomposes it instead, so a large
/// platinum amount survives the round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyEntry {
    pub platinum: u64,
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl CurrencyEntry {
    /// Populates the fields from a stored price.
    pub const fn from_money(money: Money) -> Self {
        let parts = money.denominations();
        CurrencyEntry {
            platinum: parts.platinum,
            gold: parts.gold,
            silver: parts.silver,
            copper: parts.copper,
        }
    }

    /// Applies a keystroke to one field.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Denomination;
    /// use bazaar_core::validation::CurrencyEntry;
    ///
    /// let mut entry = CurrencyEntry::default();
    /// entry.set(Denomination::Gold, "5000");
    /// entry.set(Denomination::Copper, "12c");
    /// assert_eq!(entry.gold, 500);
    /// assert_eq!(entry.total().copper(), 500_000_012);
    /// ```
    pub fn set(&mut self, denomination: Denomination, raw: &str) {
        let value = clamp_denomination(raw);
        match denomination {
            Denomination::Platinum => self.platinum = value,
            Denomination::Gold => self.gold = value,
            Denomination::Silver => self.silver = value,
            Denomination::Copper => self.copper = value,
        }
    }

    /// The entered price in copper.
    pub fn total(&self) -> Money {
        crate::money::Denominations {
            platinum: self.platinum,
            gold: self.gold,
            silver: self.silver,
            copper: self.copper,
        }
        .total()
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Outcome of a keystroke in the quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
    /// The field was emptied.
    Cleared,
    /// A positive quantity was entered.
    Value(i64),
    /// The keystroke is ignored; the field keeps its previous value.
    Rejected,
}

/// Interprets a keystroke in the quantity field.
///
/// ## Rules
/// - Empty input clears the field
/// - Non-digits are stripped; the result must be a positive number
/// - Zero or nothing left after stripping leaves the field unchanged
pub fn sanitize_quantity_input(raw: &str) -> QuantityInput {
    if raw.is_empty() {
        return QuantityInput::Cleared;
    }
    let digits = sanitize_digits(raw);
    if digits.is_empty() {
        return QuantityInput::Rejected;
    }
    match digits.parse::<i64>().unwrap_or(i64::MAX) {
        0 => QuantityInput::Rejected,
        qty => QuantityInput::Value(qty),
    }
}

/// Resolves a quantity for price math; empty or zero means 1.
pub fn normalize_quantity(raw: &str) -> i64 {
    let digits = sanitize_digits(raw);
    if digits.is_empty() {
        return 1;
    }
    match digits.parse::<i64>().unwrap_or(i64::MAX) {
        0 => 1,
        qty => qty,
    }
}

// =============================================================================
// Numeric Stats
// =============================================================================

/// Sanitizes a numeric stat field and clamps it into `[min, max]`.
///
/// ## Rules
/// - Non-digit characters are stripped
/// - At most 5 digits are kept
/// - Nothing left means the field is cleared (`None`)
///
/// Used for Strength, Combat Level and the six armor resistances.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::clamp_stat;
///
/// assert_eq!(clamp_stat("abc12", 0, 3000), Some(12));
/// assert_eq!(clamp_stat("", 0, 3000), None);
/// assert_eq!(clamp_stat("2600", 0, 2500), Some(2500));
/// ```
pub fn clamp_stat(raw: &str, min: i64, max: i64) -> Option<i64> {
    let digits = truncated_digits(raw, crate::combat::STAT_MAX_DIGITS);
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(0);
    Some(value.max(min).min(max))
}

/// Clamps an already-parsed stat into `[min, max]`; negatives become `min`.
///
/// Stored listings bypass the form, so their stats go through this before
/// they reach a draft.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::clamp_stat_value;
///
/// assert_eq!(clamp_stat_value(Some(99999), 0, 3000), Some(3000));
/// assert_eq!(clamp_stat_value(Some(-7), 0, 2500), Some(0));
/// assert_eq!(clamp_stat_value(None, 0, 3000), None);
/// ```
pub fn clamp_stat_value(value: Option<i64>, min: i64, max: i64) -> Option<i64> {
    value.map(|v| v.max(min).min(max))
}

/// Digits of `raw`, truncated to `max_digits`.
pub(crate) fn truncated_digits(raw: &str, max_digits: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_digits)
        .collect()
}

// =============================================================================
// Advisory Validators
// =============================================================================

/// Validates an offer amount.
///
/// ## Rules
/// - Must be positive (> 0); an offer of nothing is not an offer
///
/// ## Example
/// ```rust
/// use bazaar_core::money::Money;
/// use bazaar_core::validation::validate_offer_amount;
///
/// assert!(validate_offer_amount(Money::new(1)).is_ok());
/// assert!(validate_offer_amount(Money::zero()).is_err());
/// ```
pub fn validate_offer_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "offer amount".to_string(),
        });
    }

    Ok(())
}

/// Validates the selected item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42"), 42);
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("abc"), 0);
        assert_eq!(parse_amount("4a2"), 42);
        assert_eq!(parse_amount(&"9".repeat(30)), u64::MAX);
    }

    #[test]
    fn test_clamp_denomination() {
        assert_eq!(clamp_denomination(""), 0);
        assert_eq!(clamp_denomination("7"), 7);
        assert_eq!(clamp_denomination("999"), 999);
        assert_eq!(clamp_denomination("1000"), 100);
        assert_eq!(clamp_denomination("-12"), 12);
        assert_eq!(clamp_denomination("x"), 0);
    }

    #[test]
    fn test_currency_entry() {
        let mut entry = CurrencyEntry::default();
        entry.set(Denomination::Platinum, "2");
        entry.set(Denomination::Silver, "abc");
        entry.set(Denomination::Copper, "45");
        assert_eq!(entry.silver, 0);
        assert_eq!(entry.total().copper(), 2_000_000_045);
    }

    #[test]
    fn test_currency_entry_from_stored_price() {
        let entry = CurrencyEntry::from_money(Money::new(1_234_000_567_008));
        assert_eq!(entry.platinum, 1_234);
        assert_eq!(entry.gold, 0);
        assert_eq!(entry.silver, 567);
        assert_eq!(entry.copper, 8);
        assert_eq!(entry.total().copper(), 1_234_000_567_008);
    }

    #[test]
    fn test_sanitize_quantity_input() {
        assert_eq!(sanitize_quantity_input(""), QuantityInput::Cleared);
        assert_eq!(sanitize_quantity_input("12"), QuantityInput::Value(12));
        assert_eq!(sanitize_quantity_input("1x2"), QuantityInput::Value(12));
        assert_eq!(sanitize_quantity_input("0"), QuantityInput::Rejected);
        assert_eq!(sanitize_quantity_input("-"), QuantityInput::Rejected);
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(""), 1);
        assert_eq!(normalize_quantity("0"), 1);
        assert_eq!(normalize_quantity("abc"), 1);
        assert_eq!(normalize_quantity("25"), 25);
    }

    #[test]
    fn test_clamp_stat_value() {
        assert_eq!(clamp_stat_value(Some(1500), 0, 3000), Some(1500));
        assert_eq!(clamp_stat_value(Some(3001), 0, 3000), Some(3000));
        assert_eq!(clamp_stat_value(Some(-1), 0, 3000), Some(0));
        assert_eq!(clamp_stat_value(Some(i64::MIN), 0, 2500), Some(0));
        assert_eq!(clamp_stat_value(None, 0, 3000), None);
    }

    #[test]
    fn test_clamp_stat() {
        assert_eq!(clamp_stat("99999999", 0, 3000), Some(3000));
        assert_eq!(clamp_stat("", 0, 3000), None);
        assert_eq!(clamp_stat("abc", 0, 3000), None);
        assert_eq!(clamp_stat("abc12", 0, 3000), Some(12));
        assert_eq!(clamp_stat("0", 0, 3000), Some(0));
        assert_eq!(clamp_stat("5", 10, 20), Some(10));
    }

    #[test]
    fn test_clamp_stat_truncates_before_clamping() {
        // "123456" keeps "12345", which is then clamped.
        assert_eq!(clamp_stat("123456", 0, 99_999), Some(12_345));
    }

    #[test]
    fn test_validate_offer_amount() {
        assert!(validate_offer_amount(Money::new(500)).is_ok());
        assert_eq!(
            validate_offer_amount(Money::zero()),
            Err(ValidationError::MustBePositive {
                field: "offer amount".to_string()
            })
        );
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Iron Sword").is_ok());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }
}
