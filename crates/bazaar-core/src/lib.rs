//! # bazaar-core: Pure Marketplace Logic
//!
//! This crate holds the logic behind the bazaar's listing form, offer
//! entry and preview cards as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser client                               │   │
//! │  │    Listing form ──► Preview card ──► Offers ──► Listing detail  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs bindings                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  combat   │  │  listing  │  │ validation│  │   │
//! │  │   │ copper ⇄  │  │ category  │  │   draft   │  │ sanitize  │  │   │
//! │  │   │ p/g/s/c   │  │ dmg bands │  │ invariants│  │  clamp    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Listings API + SQLite (external)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Copper amounts, denominations, Each/Total price derivation
//! - [`combat`] - Combat classification, field gating, damage percent bands
//! - [`listing`] - Listing form state and submission payload
//! - [`validation`] - Input sanitation and advisory checks
//! - [`types`] - Domain enums and the item record
//! - [`browse`] - Listing search, filters and sort orders
//! - [`format`] - Listing age text
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; safe to call per keystroke
//! 2. **Integer Money**: every price is a single copper count
//! 3. **Never Block Typing**: bad input is normalized, not rejected
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::money::{Denomination, PriceMode};
//! use bazaar_core::listing::ListingDraft;
//! use bazaar_core::types::{CombatCategory, ItemRecord, Rarity};
//!
//! let mut draft = ListingDraft::new();
//! draft.set_item(&ItemRecord::new("Frost Blade", "Blacksmith", "Combat"));
//! draft.set_combat_category(CombatCategory::Weapon);
//! draft.set_rarity(Some(Rarity::Rare));
//! draft.set_price_field(Denomination::Gold, "12");
//! draft.set_quantity("4");
//! draft.set_price_mode(PriceMode::Total);
//!
//! let prices = draft.price_breakdown().unwrap();
//! assert_eq!(prices.each.copper(), 3_000_000);
//!
//! // Leaving the Weapon category clears rarity in the same update.
//! draft.set_combat_category(CombatCategory::None);
//! assert_eq!(draft.rarity(), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod browse;
pub mod combat;
pub mod error;
pub mod format;
pub mod listing;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use browse::{filter_listings, sort_listings, ListingFilter, SortOrder};
pub use combat::{classify_combat, is_valid_damage_percent};
pub use error::{CoreError, CoreResult, ValidationError};
pub use listing::{apply_invariants, ListingDraft, ListingPayload};
pub use money::{derive_prices, from_copper, to_copper, Money, PriceMode};
pub use types::*;
pub use validation::clamp_stat;
