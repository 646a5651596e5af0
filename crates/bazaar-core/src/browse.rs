//! # Listing Browse
//!
//! Search, filter and sort over stored listings, as the all-listings page
//! applies them.
//!
//! ## Sort Orders
//! ```text
//! asc / desc            entered price
//! totalasc / totaldesc  entered price x quantity (saturating)
//! old / new             stored timestamp; undated listings sort last
//! ```
//!
//! ## Example
//! ```rust
//! use bazaar_core::browse::{filter_listings, sort_listings, ListingFilter, SortOrder};
//! use bazaar_core::listing::ListingPayload;
//! use bazaar_core::money::Money;
//!
//! let listings = vec![
//!     ListingPayload { item: "Oak Log".into(), price: Money::new(40), ..Default::default() },
//!     ListingPayload { item: "Iron Ore".into(), price: Money::new(90), ..Default::default() },
//!     ListingPayload { item: "Pine Log".into(), price: Money::new(15), ..Default::default() },
//! ];
//!
//! let filter = ListingFilter { search: "log".into(), ..Default::default() };
//! let mut logs = filter_listings(&listings, &filter);
//! sort_listings(&mut logs, SortOrder::PriceAsc);
//! assert_eq!(logs[0].item, "Pine Log");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::listing::ListingPayload;
use crate::types::ListingType;

// =============================================================================
// Sort Order
// =============================================================================

/// How the listing page orders results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortOrder {
    /// Cheapest entered price first.
    #[default]
    #[serde(rename = "asc")]
    PriceAsc,
    #[serde(rename = "desc")]
    PriceDesc,
    /// Cheapest price x quantity first.
    #[serde(rename = "totalasc")]
    TotalAsc,
    #[serde(rename = "totaldesc")]
    TotalDesc,
    /// Oldest first.
    #[serde(rename = "old")]
    Oldest,
    #[serde(rename = "new")]
    Newest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::TotalAsc,
        SortOrder::TotalDesc,
        SortOrder::Oldest,
        SortOrder::Newest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "asc",
            SortOrder::PriceDesc => "desc",
            SortOrder::TotalAsc => "totalasc",
            SortOrder::TotalDesc => "totaldesc",
            SortOrder::Oldest => "old",
            SortOrder::Newest => "new",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort order".to_string(),
                allowed: Self::ALL.iter().map(|o| o.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Search box plus the type and category selects. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Case-insensitive substring of the item name; empty matches all.
    pub search: String,
    pub listing_type: Option<ListingType>,
    /// Case-insensitive; listings without a category never match.
    pub category: Option<String>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &ListingPayload) -> bool {
        let search = self.search.trim().to_lowercase();
        if !listing.item.to_lowercase().contains(&search) {
            return false;
        }

        if let Some(listing_type) = self.listing_type {
            if listing.listing_type != listing_type {
                return false;
            }
        }

        match &self.category {
            Some(category) => {
                !listing.category.is_empty()
                    && listing.category.to_lowercase() == category.trim().to_lowercase()
            }
            None => true,
        }
    }
}

/// Listings matching `filter`, in their original order.
pub fn filter_listings(
    listings: &[ListingPayload],
    filter: &ListingFilter,
) -> Vec<ListingPayload> {
    listings
        .iter()
        .filter(|listing| filter.matches(listing))
        .cloned()
        .collect()
}

// =============================================================================
// Sort
// =============================================================================

/// Sorts in place. The sort is stable, so ties keep their order.
pub fn sort_listings(listings: &mut [ListingPayload], order: SortOrder) {
    match order {
        SortOrder::PriceAsc => listings.sort_by_key(|l| l.price),
        SortOrder::PriceDesc => listings.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::TotalAsc => listings.sort_by_key(|l| l.line_total()),
        SortOrder::TotalDesc => listings.sort_by(|a, b| b.line_total().cmp(&a.line_total())),
        SortOrder::Oldest => listings.sort_by(|a, b| by_time(a, b, false)),
        SortOrder::Newest => listings.sort_by(|a, b| by_time(a, b, true)),
    }
}

fn by_time(a: &ListingPayload, b: &ListingPayload, newest_first: bool) -> Ordering {
    match (a.created_at(), b.created_at()) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
