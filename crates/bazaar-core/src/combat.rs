//! # Combat Module
//!
//! Rules for the combat attributes of weapons and armor: which items count
//! as combat gear, which fields apply per category, and what values those
//! fields accept.
//!
//! ## Field Gating
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  classify_combat(item)                                                  │
//! │        │                                                                │
//! │        ├── false ──► no combat fields at all                            │
//! │        │                                                                │
//! │        └── true  ──► Combat Level + Combat Category                     │
//! │                           │                                             │
//! │                           ├── None   ──► (nothing else)                 │
//! │                           ├── Weapon ──► Rarity, Strength,              │
//! │                           │              Dmg Type, Dmg %                │
//! │                           └── Armor  ──► Rarity, six resistances        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Damage Percent Bands
//! A weapon's damage percent is either 0 (no effect), 30-49 (moderate) or
//! 70-89 (high). Nothing in between is a real in-game roll.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{CombatCategory, DamageType, ItemRecord, COMBAT_PROFESSION};
use crate::validation::{clamp_stat, clamp_stat_value};

/// Digits kept by any numeric stat field.
pub const STAT_MAX_DIGITS: usize = 5;

/// Inclusive range of the Strength stat.
pub const STRENGTH_RANGE: (i64, i64) = (0, 3000);

/// Inclusive range of the Combat Level field.
pub const COMBAT_LEVEL_RANGE: (i64, i64) = (0, 2500);

/// Inclusive range of each armor resistance.
pub const RESISTANCE_RANGE: (i64, i64) = (0, 3000);

// =============================================================================
// Stat Sanitation
// =============================================================================

/// Sanitizes the Strength field.
pub fn clamp_strength(raw: &str) -> Option<i64> {
    clamp_stat(raw, STRENGTH_RANGE.0, STRENGTH_RANGE.1)
}

/// Sanitizes the Combat Level field.
pub fn clamp_combat_level(raw: &str) -> Option<i64> {
    clamp_stat(raw, COMBAT_LEVEL_RANGE.0, COMBAT_LEVEL_RANGE.1)
}

/// Sanitizes one armor resistance field.
pub fn clamp_resistance(raw: &str) -> Option<i64> {
    clamp_stat(raw, RESISTANCE_RANGE.0, RESISTANCE_RANGE.1)
}

// =============================================================================
// Damage Percent
// =============================================================================

/// Whether an integer damage percent falls in an allowed band.
#[inline]
pub const fn damage_percent_in_band(value: i64) -> bool {
    matches!(value, 0 | 30..=49 | 70..=89)
}

/// Checks a raw damage percent value.
///
/// Valid if and only if it parses as an integer equal to 0, in 30-49, or
/// in 70-89. Surrounding whitespace is ignored; anything else that is not
/// an integer is invalid.
///
/// ## Example
/// ```rust
/// use bazaar_core::combat::is_valid_damage_percent;
///
/// assert!(is_valid_damage_percent("0"));
/// assert!(is_valid_damage_percent("35"));
/// assert!(is_valid_damage_percent("89"));
///
/// assert!(!is_valid_damage_percent("50"));
/// assert!(!is_valid_damage_percent("29"));
/// assert!(!is_valid_damage_percent("-1"));
/// assert!(!is_valid_damage_percent("abc"));
/// ```
pub fn is_valid_damage_percent(raw: &str) -> bool {
    raw.trim()
        .parse::<i64>()
        .map(damage_percent_in_band)
        .unwrap_or(false)
}

/// A damage percent known to be in an allowed band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "i64", into = "i64")]
pub struct DamagePercent(u8);

impl DamagePercent {
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for DamagePercent {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if damage_percent_in_band(value) {
            Ok(DamagePercent(value as u8))
        } else {
            Err(ValidationError::InvalidDamagePercent {
                value: value.to_string(),
            })
        }
    }
}

impl From<DamagePercent> for i64 {
    fn from(percent: DamagePercent) -> i64 {
        percent.0 as i64
    }
}

// =============================================================================
// Combat Classification
// =============================================================================

fn and_separator() -> &'static Regex {
    static AND: OnceLock<Regex> = OnceLock::new();
    AND.get_or_init(|| Regex::new(r"(?i)\s+and\s+").expect("separator pattern is valid"))
}

/// Splits a raw secondary profession string into profession names.
///
/// The word "and" between whitespace is treated like a comma. Entries are
/// trimmed; empty entries and repeats are dropped, first occurrence wins.
///
/// ## Example
/// ```rust
/// use bazaar_core::combat::parse_secondary_professions;
///
/// assert_eq!(parse_secondary_professions("Botanist and Chef"), vec!["Botanist", "Chef"]);
/// assert_eq!(parse_secondary_professions("Botanist, Chef,"), vec!["Botanist", "Chef"]);
/// assert!(parse_secondary_professions("  ").is_empty());
/// ```
pub fn parse_secondary_professions(raw: &str) -> Vec<String> {
    let normalized = and_separator().replace_all(raw, ",");

    let mut professions: Vec<String> = Vec::new();
    for name in normalized.split(',').map(str::trim) {
        if !name.is_empty() && !professions.iter().any(|p| p == name) {
            professions.push(name.to_string());
        }
    }
    professions
}

/// Whether an item is combat gear.
///
/// True when the primary profession is `Combat`, or when `Combat` appears
/// among the secondary professions.
///
/// ## Example
/// ```rust
/// use bazaar_core::combat::classify_combat;
/// use bazaar_core::types::ItemRecord;
///
/// assert!(classify_combat(&ItemRecord::new("Bone Club", "Botanist", "Combat")));
/// assert!(!classify_combat(&ItemRecord::new("Stew", "Botanist", "Chef and Carpenter")));
/// ```
pub fn classify_combat(item: &ItemRecord) -> bool {
    item.primary_profession.trim() == COMBAT_PROFESSION
        || parse_secondary_professions(&item.secondary_professions)
            .iter()
            .any(|p| p == COMBAT_PROFESSION)
}

// =============================================================================
// Field Visibility
// =============================================================================

/// A category-gated combat field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CombatField {
    Rarity,
    Strength,
    DamageType,
    DamagePercent,
    Resistance(DamageType),
}

const WEAPON_FIELDS: [CombatField; 4] = [
    CombatField::Rarity,
    CombatField::Strength,
    CombatField::DamageType,
    CombatField::DamagePercent,
];

const ARMOR_FIELDS: [CombatField; 7] = [
    CombatField::Rarity,
    CombatField::Resistance(DamageType::Impact),
    CombatField::Resistance(DamageType::Cryonae),
    CombatField::Resistance(DamageType::Arborae),
    CombatField::Resistance(DamageType::Tempestae),
    CombatField::Resistance(DamageType::Infernae),
    CombatField::Resistance(DamageType::Necromae),
];

/// Fields shown and collected for a category.
pub fn visible_fields(category: CombatCategory) -> &'static [CombatField] {
    match category {
        CombatCategory::None => &[],
        CombatCategory::Weapon => &WEAPON_FIELDS,
        CombatCategory::Armor => &ARMOR_FIELDS,
    }
}

/// Whether a rarity may be held given the item's classification.
#[inline]
pub const fn rarity_allowed(is_combat: bool, category: CombatCategory) -> bool {
    is_combat && category.has_stats()
}

// =============================================================================
// Stats
// =============================================================================

/// Weapon stats as entered. Unset fields are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeaponStats {
    pub strength: Option<i64>,
    pub damage_type: Option<DamageType>,
    pub damage_percent: Option<DamagePercent>,
}

/// One resistance per damage type. Unset fields are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArmorStats {
    pub impact: Option<i64>,
    pub cryonae: Option<i64>,
    pub arborae: Option<i64>,
    pub tempestae: Option<i64>,
    pub infernae: Option<i64>,
    pub necromae: Option<i64>,
}

impl ArmorStats {
    pub const fn get(&self, damage_type: DamageType) -> Option<i64> {
        match damage_type {
            DamageType::Impact => self.impact,
            DamageType::Cryonae => self.cryonae,
            DamageType::Arborae => self.arborae,
            DamageType::Tempestae => self.tempestae,
            DamageType::Infernae => self.infernae,
            DamageType::Necromae => self.necromae,
        }
    }

    pub fn set(&mut self, damage_type: DamageType, value: Option<i64>) {
        let slot = match damage_type {
            DamageType::Impact => &mut self.impact,
            DamageType::Cryonae => &mut self.cryonae,
            DamageType::Arborae => &mut self.arborae,
            DamageType::Tempestae => &mut self.tempestae,
            DamageType::Infernae => &mut self.infernae,
            DamageType::Necromae => &mut self.necromae,
        };
        *slot = value;
    }

    /// Every resistance clamped into [`RESISTANCE_RANGE`].
    pub fn clamped(&self) -> Self {
        let mut stats = *self;
        for damage_type in DamageType::ALL {
            let value = self.get(damage_type);
            stats.set(
                damage_type,
                clamp_stat_value(value, RESISTANCE_RANGE.0, RESISTANCE_RANGE.1),
            );
        }
        stats
    }

    /// Iterates `(damage type, resistance)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DamageType, Option<i64>)> + '_ {
        DamageType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

/// Category-specific attributes of a combat listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "category")]
pub enum CombatAttributes {
    Weapon(WeaponStats),
    Armor(ArmorStats),
}

impl CombatAttributes {
    pub const fn category(&self) -> CombatCategory {
        match self {
            CombatAttributes::Weapon(_) => CombatCategory::Weapon,
            CombatAttributes::Armor(_) => CombatCategory::Armor,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_percent_bands() {
        let valid: Vec<i64> = (-10..=120).filter(|v| damage_percent_in_band(*v)).collect();
        let expected: Vec<i64> = std::iter::once(0).chain(30..=49).chain(70..=89).collect();
        assert_eq!(valid, expected);
    }

    #[test]
    fn test_is_valid_damage_percent_edges() {
        for ok in ["0", "30", "49", "70", "89", " 45 "] {
            assert!(is_valid_damage_percent(ok), "{ok} should be valid");
        }
        for bad in ["50", "29", "90", "69", "-1", "abc", "", "4.5", "1"] {
            assert!(!is_valid_damage_percent(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn test_damage_percent_newtype() {
        assert_eq!(DamagePercent::try_from(75).unwrap().value(), 75);
        assert_eq!(
            DamagePercent::try_from(50),
            Err(ValidationError::InvalidDamagePercent {
                value: "50".to_string()
            })
        );
        let parsed: Result<DamagePercent, _> = serde_json::from_str("60");
        assert!(parsed.is_err());
        assert_eq!(serde_json::to_string(&DamagePercent(40)).unwrap(), "40");
    }

    #[test]
    fn test_clamp_helpers() {
        assert_eq!(clamp_strength("99999999"), Some(3000));
        assert_eq!(clamp_combat_level("2600"), Some(2500));
        assert_eq!(clamp_resistance("12a"), Some(12));
        assert_eq!(clamp_resistance(""), None);
    }

    #[test]
    fn test_parse_secondary_professions() {
        assert_eq!(
            parse_secondary_professions("Botanist AND Chef, Miner"),
            vec!["Botanist", "Chef", "Miner"]
        );
        assert_eq!(parse_secondary_professions("Chef, Chef"), vec!["Chef"]);
        // "and" inside a word is not a separator
        assert_eq!(parse_secondary_professions("Handyman"), vec!["Handyman"]);
        assert!(parse_secondary_professions("").is_empty());
    }

    #[test]
    fn test_classify_combat() {
        assert!(classify_combat(&ItemRecord::new("Sword", "Combat", "")));
        assert!(classify_combat(&ItemRecord::new("Bow", "Woodcutter", "Fisher and Combat")));
        assert!(classify_combat(&ItemRecord::new("Bone Club", "Botanist", "Combat")));
        assert!(!classify_combat(&ItemRecord::new(
            "Stew",
            "Botanist",
            "Chef and Carpenter"
        )));
        assert!(!classify_combat(&ItemRecord::new("Gem", "Miner", "Combatant")));
    }

    #[test]
    fn test_visible_fields() {
        assert!(visible_fields(CombatCategory::None).is_empty());

        let weapon = visible_fields(CombatCategory::Weapon);
        assert!(weapon.contains(&CombatField::DamagePercent));
        assert!(!weapon.contains(&CombatField::Resistance(DamageType::Impact)));

        let armor = visible_fields(CombatCategory::Armor);
        assert_eq!(armor.len(), 7);
        assert!(armor.contains(&CombatField::Rarity));
        assert!(!armor.contains(&CombatField::Strength));
    }

    #[test]
    fn test_rarity_allowed() {
        assert!(rarity_allowed(true, CombatCategory::Weapon));
        assert!(rarity_allowed(true, CombatCategory::Armor));
        assert!(!rarity_allowed(true, CombatCategory::None));
        assert!(!rarity_allowed(false, CombatCategory::Weapon));
    }

    #[test]
    fn test_armor_stats_by_damage_type() {
        let mut armor = ArmorStats::default();
        armor.set(DamageType::Infernae, Some(1200));
        assert_eq!(armor.get(DamageType::Infernae), Some(1200));
        assert_eq!(armor.get(DamageType::Impact), None);
        assert_eq!(armor.iter().filter(|(_, v)| v.is_some()).count(), 1);
    }

    #[test]
    fn test_armor_stats_clamped() {
        let mut armor = ArmorStats::default();
        armor.set(DamageType::Impact, Some(88888));
        armor.set(DamageType::Cryonae, Some(-4));
        armor.set(DamageType::Arborae, Some(700));
        let clamped = armor.clamped();
        assert_eq!(clamped.impact, Some(3000));
        assert_eq!(clamped.cryonae, Some(0));
        assert_eq!(clamped.arborae, Some(700));
        assert_eq!(clamped.necromae, None);
    }

    #[test]
    fn test_combat_attributes_category() {
        let weapon = CombatAttributes::Weapon(WeaponStats::default());
        assert_eq!(weapon.category(), CombatCategory::Weapon);
        let json = serde_json::to_value(CombatAttributes::Armor(ArmorStats::default())).unwrap();
        assert_eq!(json["category"], "Armor");
    }
}
