//! # Domain Types
//!
//! Core domain types shared by the listing form, preview cards and the
//! submission payload.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemRecord    │   │ CombatCategory  │   │   DamageType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  None           │   │  Impact         │       │
//! │  │  primary prof.  │   │  Weapon         │   │  Cryonae        │       │
//! │  │  secondary prof.│   │  Armor          │   │  Arborae        │       │
//! │  └─────────────────┘   └─────────────────┘   │  Tempestae      │       │
//! │                                              │  Infernae       │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  Necromae       │       │
//! │  │  ListingType    │   │     Rarity      │   └─────────────────┘       │
//! │  │  Buy / Sell     │   │ Common/Uncommon │                             │
//! │  └─────────────────┘   │ /Rare           │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Profession name that marks an item as combat gear.
pub const COMBAT_PROFESSION: &str = "Combat";

// =============================================================================
// Item Record
// =============================================================================

/// Item metadata as served by the items endpoint.
///
/// Only the fields the core reads are modeled; everything else in the
/// record (image, episode, ...) is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemRecord {
    /// Item name.
    #[serde(rename = "Items")]
    pub name: String,

    /// Primary profession ("Profession A").
    #[serde(rename = "Profession A", default)]
    pub primary_profession: String,

    /// Raw secondary profession list ("Profession B"),
    /// e.g. `"Botanist and Chef"` or `"Botanist, Chef"`.
    #[serde(rename = "Profession B", default)]
    pub secondary_professions: String,
}

impl ItemRecord {
    pub fn new(
        name: impl Into<String>,
        primary_profession: impl Into<String>,
        secondary_professions: impl Into<String>,
    ) -> Self {
        ItemRecord {
            name: name.into(),
            primary_profession: primary_profession.into(),
            secondary_professions: secondary_professions.into(),
        }
    }
}

// =============================================================================
// Listing Type
// =============================================================================

/// Whether the poster wants to buy or sell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Buy,
    Sell,
}

impl ListingType {
    /// Reads the type filter's value; `all` and unknown values are `None`.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "buy" => Some(ListingType::Buy),
            "sell" => Some(ListingType::Sell),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ListingType::Buy => "buy",
            ListingType::Sell => "sell",
        }
    }
}

// =============================================================================
// Combat Category
// =============================================================================

/// Combat classification of an item; gates which stat fields apply.
///
/// On the wire the absence of a category is the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CombatCategory {
    #[default]
    #[serde(rename = "")]
    None,
    Weapon,
    Armor,
}

impl CombatCategory {
    /// Reads the category select's value.
    ///
    /// Anything other than `Weapon` or `Armor` is no category.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "Weapon" => CombatCategory::Weapon,
            "Armor" => CombatCategory::Armor,
            _ => CombatCategory::None,
        }
    }

    /// Whether rarity and stat fields apply.
    #[inline]
    pub const fn has_stats(&self) -> bool {
        matches!(self, CombatCategory::Weapon | CombatCategory::Armor)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CombatCategory::None => "",
            CombatCategory::Weapon => "Weapon",
            CombatCategory::Armor => "Armor",
        }
    }
}

// =============================================================================
// Damage Type
// =============================================================================

/// The six damage schools. Armor carries one resistance per school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DamageType {
    Impact,
    Cryonae,
    Arborae,
    Tempestae,
    Infernae,
    Necromae,
}

impl DamageType {
    /// All damage types in display order.
    pub const ALL: [DamageType; 6] = [
        DamageType::Impact,
        DamageType::Cryonae,
        DamageType::Arborae,
        DamageType::Tempestae,
        DamageType::Infernae,
        DamageType::Necromae,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DamageType::Impact => "Impact",
            DamageType::Cryonae => "Cryonae",
            DamageType::Arborae => "Arborae",
            DamageType::Tempestae => "Tempestae",
            DamageType::Infernae => "Infernae",
            DamageType::Necromae => "Necromae",
        }
    }

    /// Reads a dropdown value; unknown or empty values are `None`.
    pub fn from_form_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rarity
// =============================================================================

/// Quality tier of a weapon or armor piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
        }
    }

    /// Reads a dropdown value; unknown or empty values are `None`.
    pub fn from_form_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
