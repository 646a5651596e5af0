//! # Money Module
//!
//! Provides the `Money` type and the platinum/gold/silver/copper currency
//! model used by listings, offers and preview cards.
//!
//! ## One Canonical Unit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERY PRICE IS A SINGLE COPPER COUNT                                   │
//! │                                                                         │
//! │    1 platinum = 1,000,000,000 copper                                    │
//! │    1 gold     =     1,000,000 copper                                    │
//! │    1 silver   =         1,000 copper                                    │
//! │    1 copper   =             1 copper                                    │
//! │                                                                         │
//! │  Entry fields ──► to_copper ──► Money ──► stored as `price`             │
//! │  Stored price ──► from_copper ──► Denominations ──► display / editing  │
//! │                                                                         │
//! │  Mixed-radix, like seconds → days/hours/minutes/seconds:               │
//! │  silver, gold and copper stay in 0..=999, platinum absorbs the rest.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::{derive_prices, from_copper, to_copper, Money, PriceMode};
//!
//! let price = to_copper("1", "", "250", "7");
//! assert_eq!(price.copper(), 1_000_250_007);
//!
//! let parts = from_copper(1_000_250_007).unwrap();
//! assert_eq!((parts.platinum, parts.gold, parts.silver, parts.copper), (1, 0, 250, 7));
//!
//! let prices = derive_prices(Money::new(1000), 4, PriceMode::Total).unwrap();
//! assert_eq!(prices.each.copper(), 250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::parse_amount;

// =============================================================================
// Denomination
// =============================================================================

/// One of the four coin denominations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Denomination {
    Platinum,
    Gold,
    Silver,
    Copper,
}

impl Denomination {
    /// All denominations, highest first.
    pub const ALL: [Denomination; 4] = [
        Denomination::Platinum,
        Denomination::Gold,
        Denomination::Silver,
        Denomination::Copper,
    ];

    /// Value of one coin of this denomination, in copper.
    #[inline]
    pub const fn value(&self) -> u64 {
        match self {
            Denomination::Platinum => 1_000_000_000,
            Denomination::Gold => 1_000_000,
            Denomination::Silver => 1_000,
            Denomination::Copper => 1,
        }
    }

    /// Short suffix used by [`Money`]'s `Display`.
    #[inline]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Denomination::Platinum => "p",
            Denomination::Gold => "g",
            Denomination::Silver => "s",
            Denomination::Copper => "c",
        }
    }

    /// Form field name ("Platinum", "Gold", ...).
    pub const fn label(&self) -> &'static str {
        match self {
            Denomination::Platinum => "Platinum",
            Denomination::Gold => "Gold",
            Denomination::Silver => "Silver",
            Denomination::Copper => "Copper",
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A price in copper, the smallest currency unit.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: prices are never negative, so a negative Money is
///   not representable at all. Signed input goes through [`from_copper`] or
///   `TryFrom<i64>`, which reject it with [`CoreError::InvalidAmount`].
/// - **Saturating arithmetic**: a quantity of 999 on a 999-platinum price
///   would still fit, but sanitized form input is unbounded in principle.
///   Overflow pins at `u64::MAX` instead of panicking.
///
/// ## Where Money is Used
/// ```text
/// CurrencyEntry ──► to_copper ──► Money ──┬──► ListingPayload.price
///                                         ├──► derive_prices (Each/Total)
///                                         └──► Offer amount
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(u64);

impl Money {
    /// Creates a Money value from a copper count.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::new(2_500);
    /// assert_eq!(price.copper(), 2_500);
    /// ```
    #[inline]
    pub const fn new(copper: u64) -> Self {
        Money(copper)
    }

    /// Returns the value in copper.
    #[inline]
    pub const fn copper(&self) -> u64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Splits this amount into denominations.
    ///
    /// Infallible because `Money` cannot be negative.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let parts = Money::new(3_004_005).denominations();
    /// assert_eq!((parts.gold, parts.silver, parts.copper), (3, 4, 5));
    /// ```
    pub const fn denominations(&self) -> Denominations {
        let total = self.0;
        Denominations {
            platinum: total / 1_000_000_000,
            gold: (total % 1_000_000_000) / 1_000_000,
            silver: (total % 1_000_000) / 1_000,
            copper: total % 1_000,
        }
    }

    /// Multiplies money by a quantity, saturating on overflow.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl TryFrom<i64> for Money {
    type Error = CoreError;

    fn try_from(amount: i64) -> CoreResult<Self> {
        u64::try_from(amount)
            .map(Money)
            .map_err(|_| CoreError::InvalidAmount { amount })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the non-zero denominations, highest first: `1p 250s 7c`.
///
/// ## Note
/// The browser renders coin icons instead; this form is for logs and the CLI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.denominations().display_parts();
        for (i, (denomination, amount)) in parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}{}", amount, denomination.suffix())?;
        }
        Ok(())
    }
}

/// Saturating addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Saturating multiplication by a quantity.
impl Mul<u64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u64) -> Self {
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// Denominations
// =============================================================================

/// A price broken into platinum/gold/silver/copper.
///
/// When produced by [`from_copper`] or [`Money::denominations`], gold,
/// silver and copper are each in `0..=999`; platinum is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denominations {
    pub platinum: u64,
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl Denominations {
    /// Returns the amount held in one denomination.
    pub const fn get(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Platinum => self.platinum,
            Denomination::Gold => self.gold,
            Denomination::Silver => self.silver,
            Denomination::Copper => self.copper,
        }
    }

    /// Recombines the parts into a single copper amount.
    ///
    /// Components are not required to be normalized: `1000` silver is
    /// simply one gold's worth.
    pub fn total(&self) -> Money {
        let copper = Denomination::ALL.iter().fold(0u64, |acc, d| {
            acc.saturating_add(self.get(*d).saturating_mul(d.value()))
        });
        Money(copper)
    }

    /// The parts worth showing on a price tag.
    ///
    /// Zero denominations are skipped. A zero price still shows `0` copper
    /// so the tag is never empty.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::{Denomination, Money};
    ///
    /// let parts = Money::new(5_000_012).denominations().display_parts();
    /// assert_eq!(parts, vec![(Denomination::Gold, 5), (Denomination::Copper, 12)]);
    ///
    /// let parts = Money::zero().denominations().display_parts();
    /// assert_eq!(parts, vec![(Denomination::Copper, 0)]);
    /// ```
    pub fn display_parts(&self) -> Vec<(Denomination, u64)> {
        let mut parts: Vec<(Denomination, u64)> = Denomination::ALL
            .iter()
            .map(|d| (*d, self.get(*d)))
            .filter(|(_, amount)| *amount > 0)
            .collect();

        if parts.is_empty() {
            parts.push((Denomination::Copper, 0));
        }
        parts
    }
}

// =============================================================================
// Conversion Operations
// =============================================================================

/// Combines four raw denomination inputs into a single copper amount.
///
/// Each input is sanitized by stripping non-digit characters; an empty
/// result counts as 0. Pass `""` for an absent field. Never fails.
///
/// ## Example
/// ```rust
/// use bazaar_core::money::to_copper;
///
/// assert_eq!(to_copper("", "2", "", "").copper(), 2_000_000);
/// assert_eq!(to_copper("x", "1g", "", "5").copper(), 1_000_005);
/// ```
pub fn to_copper(platinum: &str, gold: &str, silver: &str, copper: &str) -> Money {
    Denominations {
        platinum: parse_amount(platinum),
        gold: parse_amount(gold),
        silver: parse_amount(silver),
        copper: parse_amount(copper),
    }
    .total()
}

/// Decomposes a copper total into denominations.
///
/// ## Errors
/// [`CoreError::InvalidAmount`] when `total` is negative.
///
/// ## Example
/// ```rust
/// use bazaar_core::money::from_copper;
/// use bazaar_core::CoreError;
///
/// let parts = from_copper(2_003_004_005).unwrap();
/// assert_eq!(parts.platinum, 2);
/// assert_eq!(parts.gold, 3);
/// assert_eq!(parts.silver, 4);
/// assert_eq!(parts.copper, 5);
///
/// assert_eq!(from_copper(-1), Err(CoreError::InvalidAmount { amount: -1 }));
/// ```
pub fn from_copper(total: i64) -> CoreResult<Denominations> {
    Money::try_from(total).map(|money| money.denominations())
}

// =============================================================================
// Price Mode
// =============================================================================

/// Whether a listing's price is per unit or for the whole stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceMode {
    /// The price is for one unit.
    #[default]
    Each,
    /// The price is for the whole quantity.
    Total,
}

impl PriceMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PriceMode::Each => "Each",
            PriceMode::Total => "Total",
        }
    }
}

impl fmt::Display for PriceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "each" => Ok(PriceMode::Each),
            "total" => Ok(PriceMode::Total),
            _ => Err(ValidationError::NotAllowed {
                field: "price mode".to_string(),
                allowed: vec!["Each".to_string(), "Total".to_string()],
            }),
        }
    }
}

/// Per-unit and total price of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    pub each: Money,
    pub total: Money,
}

/// Derives the per-unit and total price from a stored price.
///
/// - `Total`: `each = floor(money / quantity)`, `total = money`
/// - `Each`: `each = money`, `total = money * quantity`
///
/// Total-mode division truncates: a remainder that does not split evenly
/// across the units is dropped from `each`.
///
/// ## Errors
/// [`CoreError::InvalidQuantity`] when `quantity <= 0`. Normalizing an empty
/// quantity field to 1 is the caller's job (see
/// [`normalize_quantity`](crate::validation::normalize_quantity)).
///
/// ## Example
/// ```rust
/// use bazaar_core::money::{derive_prices, Money, PriceMode};
///
/// let p = derive_prices(Money::new(1000), 3, PriceMode::Total).unwrap();
/// assert_eq!((p.each.copper(), p.total.copper()), (333, 1000));
///
/// let p = derive_prices(Money::new(1000), 4, PriceMode::Each).unwrap();
/// assert_eq!((p.each.copper(), p.total.copper()), (1000, 4000));
/// ```
pub fn derive_prices(money: Money, quantity: i64, mode: PriceMode) -> CoreResult<PriceBreakdown> {
    if quantity <= 0 {
        return Err(CoreError::InvalidQuantity { quantity });
    }
    let qty = quantity as u64;

    let breakdown = match mode {
        PriceMode::Total => PriceBreakdown {
            each: Money(money.0 / qty),
            total: money,
        },
        PriceMode::Each => PriceBreakdown {
            each: money,
            total: money * qty,
        },
    };
    Ok(breakdown)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denomination_values() {
        assert_eq!(Denomination::Platinum.value(), 1_000_000_000);
        assert_eq!(Denomination::Gold.value(), 1_000_000);
        assert_eq!(Denomination::Silver.value(), 1_000);
        assert_eq!(Denomination::Copper.value(), 1);
    }

    #[test]
    fn test_to_copper() {
        assert_eq!(to_copper("1", "2", "3", "4").copper(), 1_002_003_004);
        assert_eq!(to_copper("", "", "", "").copper(), 0);
        assert_eq!(to_copper("abc", "", "", "12").copper(), 12);
        assert_eq!(to_copper("", "", "1,000", "").copper(), 1_000_000);
    }

    #[test]
    fn test_to_copper_saturates() {
        let huge = "9".repeat(40);
        assert_eq!(to_copper(&huge, "", "", "").copper(), u64::MAX);
    }

    #[test]
    fn test_from_copper() {
        let parts = from_copper(0).unwrap();
        assert_eq!(parts, Denominations::default());

        let parts = from_copper(999).unwrap();
        assert_eq!(parts.copper, 999);
        assert_eq!(parts.silver, 0);

        let parts = from_copper(1_000).unwrap();
        assert_eq!(parts.silver, 1);
        assert_eq!(parts.copper, 0);

        let parts = from_copper(5_000_000_000_123).unwrap();
        assert_eq!(parts.platinum, 5_000);
        assert_eq!(parts.silver, 0);
        assert_eq!(parts.copper, 123);
    }

    #[test]
    fn test_from_copper_rejects_negative() {
        assert_eq!(from_copper(-1), Err(CoreError::InvalidAmount { amount: -1 }));
        assert!(from_copper(i64::MIN).is_err());
    }

    #[test]
    fn test_round_trip_through_denominations() {
        for total in [0i64, 1, 999, 1_000, 999_999, 1_000_000, 123_456_789_012, i64::MAX] {
            let parts = from_copper(total).unwrap();
            assert!(parts.gold <= 999 && parts.silver <= 999 && parts.copper <= 999);
            assert_eq!(parts.total().copper(), total as u64);

            let back = to_copper(
                &parts.platinum.to_string(),
                &parts.gold.to_string(),
                &parts.silver.to_string(),
                &parts.copper.to_string(),
            );
            assert_eq!(back.copper(), total as u64);
        }
    }

    #[test]
    fn test_unnormalized_parts_recombine() {
        let parts = Denominations {
            platinum: 0,
            gold: 0,
            silver: 2_500,
            copper: 1_001,
        };
        let normalized = parts.total().denominations();
        assert_eq!(normalized.gold, 2);
        assert_eq!(normalized.silver, 501);
        assert_eq!(normalized.copper, 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(1_000_250_007).to_string(), "1p 250s 7c");
        assert_eq!(Money::new(3_000_000).to_string(), "3g");
        assert_eq!(Money::zero().to_string(), "0c");
    }

    #[test]
    fn test_derive_prices() {
        let each = derive_prices(Money::new(1000), 4, PriceMode::Each).unwrap();
        assert_eq!(each.each.copper(), 1000);
        assert_eq!(each.total.copper(), 4000);

        let total = derive_prices(Money::new(1000), 4, PriceMode::Total).unwrap();
        assert_eq!(total.each.copper(), 250);
        assert_eq!(total.total.copper(), 1000);

        let single = derive_prices(Money::new(77), 1, PriceMode::Total).unwrap();
        assert_eq!(single.each, single.total);
    }

    /// Total mode truncates: 1000 split three ways loses one copper.
    #[test]
    fn test_total_mode_truncates_remainder() {
        let p = derive_prices(Money::new(1000), 3, PriceMode::Total).unwrap();
        assert_eq!(p.each.copper(), 333);
        assert_eq!((p.each * 3).copper(), 999);
    }

    #[test]
    fn test_derive_prices_rejects_bad_quantity() {
        assert_eq!(
            derive_prices(Money::new(100), 0, PriceMode::Each),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        );
        assert!(derive_prices(Money::new(100), -3, PriceMode::Total).is_err());
    }

    #[test]
    fn test_price_mode_parsing() {
        assert_eq!("Each".parse::<PriceMode>().unwrap(), PriceMode::Each);
        assert_eq!(" total ".parse::<PriceMode>().unwrap(), PriceMode::Total);
        assert!("bulk".parse::<PriceMode>().is_err());
        assert_eq!(PriceMode::default(), PriceMode::Each);
    }

    #[test]
    fn test_price_mode_wire_format() {
        assert_eq!(serde_json::to_string(&PriceMode::Total).unwrap(), "\"Total\"");
        let mode: PriceMode = serde_json::from_str("\"Each\"").unwrap();
        assert_eq!(mode, PriceMode::Each);
    }
}
