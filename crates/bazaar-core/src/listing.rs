//! # Listing Draft
//!
//! In-progress listing form state, its cross-field invariants, and the
//! payload submitted to the listings API.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  keystroke / select ──► ListingDraft::set_* ──► sanitize field          │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                          apply_invariants(draft)        │
//! │                                          └── rarity cleared unless      │
//! │                                              combat item AND            │
//! │                                              category is Weapon/Armor   │
//! │                                                    │                    │
//! │                   ┌────────────────────────────────┼──────────────┐     │
//! │                   ▼                                ▼              ▼     │
//! │            price_breakdown()                 validate()     to_payload()│
//! │            (preview card)                (field highlights) (submit)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stats hidden by the current category stay in the draft, so flipping the
//! category back and forth does not lose typing. They are never submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::combat::{
    self, clamp_combat_level, clamp_resistance, clamp_strength, classify_combat,
    rarity_allowed, ArmorStats, CombatAttributes, DamagePercent, WeaponStats,
    COMBAT_LEVEL_RANGE, RESISTANCE_RANGE, STAT_MAX_DIGITS, STRENGTH_RANGE,
};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::format::parse_timestamp;
use crate::money::{derive_prices, Denomination, Money, PriceBreakdown, PriceMode};
use crate::types::{CombatCategory, DamageType, ItemRecord, ListingType, Rarity};
use crate::validation::{
    clamp_stat_value, sanitize_quantity_input, truncated_digits, validate_item_name,
    CurrencyEntry, QuantityInput,
};

// =============================================================================
// Invariants
// =============================================================================

/// Re-establishes the draft's cross-field invariants.
///
/// Called after every mutation. Rarity only applies to combat items whose
/// category is Weapon or Armor; in every other state it is cleared.
pub fn apply_invariants(mut draft: ListingDraft) -> ListingDraft {
    if draft.rarity.is_some() && !rarity_allowed(draft.is_combat, draft.combat_category) {
        debug!(
            item = %draft.item,
            category = draft.combat_category.as_str(),
            is_combat = draft.is_combat,
            "clearing rarity"
        );
        draft.rarity = None;
    }
    draft
}

// =============================================================================
// Listing Draft
// =============================================================================

/// The listing form.
///
/// Fields are private so every change goes through a setter that
/// sanitizes the input and then runs [`apply_invariants`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    item: String,
    is_combat: bool,
    listing_type: ListingType,
    price: CurrencyEntry,
    quantity: Option<i64>,
    price_mode: PriceMode,
    category: String,
    ign: String,
    notes: String,
    combat_category: CombatCategory,
    combat_level: Option<i64>,
    rarity: Option<Rarity>,
    strength: Option<i64>,
    damage_type: Option<DamageType>,
    damage_percent: Option<i64>,
    resistances: ArmorStats,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a stored listing for editing.
    ///
    /// `item` is the item metadata when known; without it, the listing is
    /// treated as combat gear when it carries a Weapon or Armor category.
    /// Stored stats are clamped into the same ranges the form enforces.
    pub fn from_payload(payload: &ListingPayload, item: Option<&ItemRecord>) -> Self {
        let is_combat = match item {
            Some(record) => classify_combat(record),
            None => payload.combat_category.has_stats(),
        };

        let draft = ListingDraft {
            item: payload.item.clone(),
            is_combat,
            listing_type: payload.listing_type,
            price: CurrencyEntry::from_money(payload.price),
            quantity: payload.quantity.filter(|q| *q > 0),
            price_mode: payload.price_mode,
            category: payload.category.clone(),
            ign: payload.ign.clone(),
            notes: payload.notes.clone(),
            combat_category: payload.combat_category,
            combat_level: clamp_stat_value(
                payload.combat_level,
                COMBAT_LEVEL_RANGE.0,
                COMBAT_LEVEL_RANGE.1,
            ),
            rarity: payload.rarity,
            strength: clamp_stat_value(
                payload.combat_strength,
                STRENGTH_RANGE.0,
                STRENGTH_RANGE.1,
            ),
            damage_type: payload.combat_dmg_type,
            damage_percent: payload.combat_dmg_percent,
            resistances: payload.resistances().clamped(),
        };
        apply_invariants(draft)
    }

    fn commit(&mut self) {
        let draft = std::mem::take(self);
        *self = apply_invariants(draft);
    }

    /// Back to an empty form.
    pub fn reset(&mut self) {
        *self = ListingDraft::default();
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Selects an item; its professions decide whether combat fields apply.
    pub fn set_item(&mut self, item: &ItemRecord) {
        self.item = item.name.clone();
        self.is_combat = classify_combat(item);
        self.commit();
    }

    /// Clears the item selection.
    pub fn clear_item(&mut self) {
        self.item.clear();
        self.is_combat = false;
        self.commit();
    }

    pub fn set_listing_type(&mut self, listing_type: ListingType) {
        self.listing_type = listing_type;
        self.commit();
    }

    /// A keystroke in one of the four price fields.
    pub fn set_price_field(&mut self, denomination: Denomination, raw: &str) {
        self.price.set(denomination, raw);
        self.commit();
    }

    /// A keystroke in the quantity field. Rejected keystrokes leave it as is.
    pub fn set_quantity(&mut self, raw: &str) {
        match sanitize_quantity_input(raw) {
            QuantityInput::Cleared => self.quantity = None,
            QuantityInput::Value(qty) => self.quantity = Some(qty),
            QuantityInput::Rejected => {}
        }
        self.commit();
    }

    pub fn set_price_mode(&mut self, mode: PriceMode) {
        self.price_mode = mode;
        self.commit();
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.commit();
    }

    pub fn set_ign(&mut self, ign: &str) {
        self.ign = ign.to_string();
        self.commit();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
        self.commit();
    }

    pub fn set_combat_category(&mut self, category: CombatCategory) {
        self.combat_category = category;
        self.commit();
    }

    pub fn set_combat_level(&mut self, raw: &str) {
        self.combat_level = clamp_combat_level(raw);
        self.commit();
    }

    pub fn set_rarity(&mut self, rarity: Option<Rarity>) {
        self.rarity = rarity;
        self.commit();
    }

    pub fn set_strength(&mut self, raw: &str) {
        self.strength = clamp_strength(raw);
        self.commit();
    }

    pub fn set_damage_type(&mut self, damage_type: Option<DamageType>) {
        self.damage_type = damage_type;
        self.commit();
    }

    /// Damage percent is sanitized but not clamped; its bands are checked
    /// by [`validate`](Self::validate).
    pub fn set_damage_percent(&mut self, raw: &str) {
        let digits = truncated_digits(raw, STAT_MAX_DIGITS);
        self.damage_percent = digits.parse().ok();
        self.commit();
    }

    pub fn set_resistance(&mut self, damage_type: DamageType, raw: &str) {
        self.resistances.set(damage_type, clamp_resistance(raw));
        self.commit();
    }

    // -------------------------------------------------------------------------
    // Getters
    // -------------------------------------------------------------------------

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn is_combat(&self) -> bool {
        self.is_combat
    }

    pub fn listing_type(&self) -> ListingType {
        self.listing_type
    }

    pub fn price_entry(&self) -> &CurrencyEntry {
        &self.price
    }

    pub fn quantity(&self) -> Option<i64> {
        self.quantity
    }

    pub fn price_mode(&self) -> PriceMode {
        self.price_mode
    }

    pub fn combat_category(&self) -> CombatCategory {
        self.combat_category
    }

    pub fn combat_level(&self) -> Option<i64> {
        self.combat_level
    }

    pub fn rarity(&self) -> Option<Rarity> {
        self.rarity
    }

    pub fn strength(&self) -> Option<i64> {
        self.strength
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn damage_percent(&self) -> Option<i64> {
        self.damage_percent
    }

    pub fn resistances(&self) -> &ArmorStats {
        &self.resistances
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// The entered price in copper.
    pub fn price(&self) -> Money {
        self.price.total()
    }

    /// Per-unit and total price for the preview card. An empty quantity
    /// counts as 1.
    pub fn price_breakdown(&self) -> CoreResult<PriceBreakdown> {
        derive_prices(self.price(), self.quantity.unwrap_or(1), self.price_mode)
    }

    /// Fields the form shows below the category select.
    pub fn visible_fields(&self) -> &'static [combat::CombatField] {
        if self.is_combat {
            combat::visible_fields(self.combat_category)
        } else {
            &[]
        }
    }

    /// Attributes that would be submitted for the current category.
    ///
    /// An out-of-band damage percent is left out.
    pub fn combat_attributes(&self) -> Option<CombatAttributes> {
        if !self.is_combat {
            return None;
        }
        match self.combat_category {
            CombatCategory::None => None,
            CombatCategory::Weapon => Some(CombatAttributes::Weapon(WeaponStats {
                strength: self.strength,
                damage_type: self.damage_type,
                damage_percent: self
                    .damage_percent
                    .and_then(|v| DamagePercent::try_from(v).ok()),
            })),
            CombatCategory::Armor => Some(CombatAttributes::Armor(self.resistances)),
        }
    }

    /// Advisory checks; each error maps to a highlighted field.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = validate_item_name(&self.item) {
            errors.push(e);
        }

        if !self.price().is_positive() {
            errors.push(ValidationError::MustBePositive {
                field: "price".to_string(),
            });
        }

        if self.is_combat && self.combat_category == CombatCategory::Weapon {
            if self.damage_type.is_none() {
                errors.push(ValidationError::Required {
                    field: "damage type".to_string(),
                });
            }
            if let Some(value) = self.damage_percent {
                if let Err(e) = DamagePercent::try_from(value) {
                    errors.push(e);
                }
            }
        }

        errors
    }

    /// Builds the submission payload.
    ///
    /// Only fields visible for the current category are included.
    ///
    /// ## Errors
    /// The first advisory error, wrapped in [`CoreError::Validation`].
    pub fn to_payload(&self) -> CoreResult<ListingPayload> {
        if let Some(first) = self.validate().into_iter().next() {
            return Err(CoreError::Validation(first));
        }

        let mut payload = ListingPayload {
            item: self.item.trim().to_string(),
            price: self.price(),
            quantity: self.quantity,
            listing_type: self.listing_type,
            category: self.category.clone(),
            ign: self.ign.trim().to_string(),
            notes: self.notes.trim().to_string(),
            price_mode: self.price_mode,
            ..ListingPayload::default()
        };

        if self.is_combat {
            payload.combat_category = self.combat_category;
            payload.combat_level = self.combat_level;
            payload.rarity = self.rarity;
        }

        match self.combat_attributes() {
            Some(CombatAttributes::Weapon(weapon)) => {
                payload.combat_strength = weapon.strength;
                payload.combat_dmg_type = weapon.damage_type;
                payload.combat_dmg_percent = weapon.damage_percent.map(i64::from);
            }
            Some(CombatAttributes::Armor(armor)) => payload.set_resistances(&armor),
            None => {}
        }

        Ok(payload)
    }
}

// =============================================================================
// Listing Payload
// =============================================================================

/// A listing as sent to and returned by the listings API.
///
/// Combat fields are flat on the wire. Stored listings written by older
/// clients carry numbers as strings and unset fields as `""`; both are
/// accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    pub item: String,

    /// Entered price in copper (per unit or total, see `price_mode`).
    pub price: Money,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub quantity: Option<i64>,

    #[serde(rename = "type", default)]
    pub listing_type: ListingType,

    #[serde(default)]
    pub category: String,

    #[serde(rename = "IGN", default)]
    pub ign: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub price_mode: PriceMode,

    #[serde(default)]
    pub combat_category: CombatCategory,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_level: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_strength: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_dmg_type: Option<DamageType>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_dmg_percent: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_impact: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_cryonae: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_arborae: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_tempestae: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_infernae: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub combat_necromae: Option<i64>,

    #[serde(default, deserialize_with = "blank::deserialize")]
    pub rarity: Option<Rarity>,

    /// Set by the API when the listing is stored; epoch milliseconds or a
    /// date string.
    #[serde(
        default,
        deserialize_with = "blank::deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
}

impl ListingPayload {
    /// Per-unit and total price of a stored listing.
    pub fn price_breakdown(&self) -> CoreResult<PriceBreakdown> {
        let quantity = self.quantity.filter(|q| *q > 0).unwrap_or(1);
        derive_prices(self.price, quantity, self.price_mode)
    }

    /// Entered price times quantity, saturating. A missing quantity counts
    /// as 1.
    pub fn line_total(&self) -> Money {
        let quantity = self.quantity.filter(|q| *q > 0).unwrap_or(1);
        self.price * quantity as u64
    }

    /// When the listing was stored, if the timestamp parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    /// Stored stats outside the ranges the form allows.
    ///
    /// Listings written outside the form can carry these; restoring one
    /// into a [`ListingDraft`] clamps them.
    pub fn range_errors(&self) -> Vec<ValidationError> {
        let mut checks = vec![
            ("strength", self.combat_strength, STRENGTH_RANGE),
            ("combat level", self.combat_level, COMBAT_LEVEL_RANGE),
        ];
        for (damage_type, value) in self.resistances().iter() {
            checks.push((damage_type.as_str(), value, RESISTANCE_RANGE));
        }

        checks
            .into_iter()
            .filter_map(|(field, value, (min, max))| match value {
                Some(v) if v < min || v > max => Some(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min,
                    max,
                }),
                _ => None,
            })
            .collect()
    }

    /// The six resistance fields as [`ArmorStats`].
    pub fn resistances(&self) -> ArmorStats {
        ArmorStats {
            impact: self.combat_impact,
            cryonae: self.combat_cryonae,
            arborae: self.combat_arborae,
            tempestae: self.combat_tempestae,
            infernae: self.combat_infernae,
            necromae: self.combat_necromae,
        }
    }

    fn set_resistances(&mut self, armor: &ArmorStats) {
        self.combat_impact = armor.impact;
        self.combat_cryonae = armor.cryonae;
        self.combat_arborae = armor.arborae;
        self.combat_tempestae = armor.tempestae;
        self.combat_infernae = armor.infernae;
        self.combat_necromae = armor.necromae;
    }
}

/// Lenient deserialization for optional form values: `null`, `""` and
/// whitespace are unset; numbers may arrive quoted.
mod blank {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => serde_json::from_value(Value::String(s.clone()))
                .or_else(|_| serde_json::from_str(s.trim()))
                .map(Some)
                .map_err(D::Error::custom),
            other => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
        }
    }

    /// Like [`deserialize`] for text that may arrive as a bare number.
    pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(D::Error::custom(format!("expected text, found {other}"))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
