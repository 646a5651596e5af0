//! # CLI Commands
//!
//! Each command takes its arguments as strings and returns the lines to
//! print, so the commands are testable without a terminal.
//!
//! ## Command Flow
//! ```text
//! argv ──► main (dispatch) ──► commands::* ──► bazaar-core ──► Vec<String>
//! ```

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use bazaar_core::browse::{filter_listings, sort_listings, ListingFilter, SortOrder};
use bazaar_core::combat::CombatAttributes;
use bazaar_core::format::format_time_ago;
use bazaar_core::money::{derive_prices, from_copper, to_copper, Money, PriceMode};
use bazaar_core::{ItemRecord, ListingDraft, ListingPayload, ListingType};

use crate::config::CliConfig;

/// `to-copper <platinum> <gold> <silver> <copper>`; missing fields count as 0.
pub fn to_copper_cmd(args: &[String]) -> Result<Vec<String>> {
    let money = to_copper(
        field(args, 0),
        field(args, 1),
        field(args, 2),
        field(args, 3),
    );
    Ok(vec![format!("{} copper ({})", money.copper(), money)])
}

fn field(args: &[String], i: usize) -> &str {
    args.get(i).map(String::as_str).unwrap_or("")
}

/// `split <total>`: copper total into denominations.
pub fn split_cmd(args: &[String]) -> Result<Vec<String>> {
    let raw = args.first().context("split needs a copper total")?;
    let total: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a whole number"))?;
    let parts = from_copper(total)?;
    Ok(vec![
        format!("platinum: {}", parts.platinum),
        format!("gold:     {}", parts.gold),
        format!("silver:   {}", parts.silver),
        format!("copper:   {}", parts.copper),
    ])
}

/// `prices <total> <quantity> [each|total]`.
pub fn prices_cmd(args: &[String], config: &CliConfig) -> Result<Vec<String>> {
    if args.len() < 2 {
        bail!("prices needs a copper amount and a quantity");
    }
    let amount: i64 = args[0]
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a whole number", args[0]))?;
    let quantity: i64 = args[1]
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a whole number", args[1]))?;
    let mode = match args.get(2) {
        Some(raw) => raw.parse::<PriceMode>()?,
        None => config.default_price_mode,
    };

    let prices = derive_prices(Money::try_from(amount)?, quantity, mode)?;
    debug!(amount, quantity, %mode, "derived prices");
    Ok(vec![
        format!("each:  {} ({} copper)", prices.each, prices.each.copper()),
        format!("total: {} ({} copper)", prices.total, prices.total.copper()),
    ])
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ListingPayload>),
    One(Box<ListingPayload>),
}

/// Result of checking a listings export.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub lines: Vec<String>,
    pub invalid: usize,
}

/// Checks listing JSON (one listing or an array) against the form rules.
///
/// `items_json` is the items endpoint's output; when given, it decides
/// which listings are combat gear.
pub fn check_listings(listings_json: &str, items_json: Option<&str>) -> Result<CheckReport> {
    let listings = parse_listings(listings_json)?;

    let items: Vec<ItemRecord> = match items_json {
        Some(json) => serde_json::from_str(json).context("items file is not an array of items")?,
        None => Vec::new(),
    };

    let mut report = CheckReport::default();
    for payload in &listings {
        let record = items.iter().find(|i| i.name == payload.item);
        let draft = ListingDraft::from_payload(payload, record);
        let prices = payload.price_breakdown()?;

        report.lines.push(format!(
            "{}: {} each, {} total ({} x{})",
            payload.item,
            prices.each,
            prices.total,
            payload.price_mode,
            payload.quantity.unwrap_or(1)
        ));

        match draft.combat_attributes() {
            Some(CombatAttributes::Weapon(weapon)) => report.lines.push(format!(
                "  weapon: strength {}, {} {}%",
                weapon.strength.map_or("-".to_string(), |s| s.to_string()),
                weapon.damage_type.map_or("-", |t| t.as_str()),
                weapon.damage_percent.map_or("-".to_string(), |p| p.value().to_string()),
            )),
            Some(CombatAttributes::Armor(armor)) => {
                let resists: Vec<String> = armor
                    .iter()
                    .map(|(t, v)| format!("{} {}", t, v.map_or("-".to_string(), |v| v.to_string())))
                    .collect();
                report.lines.push(format!("  armor: {}", resists.join(", ")));
            }
            None => {}
        }

        let mut errors = payload.range_errors();
        errors.extend(draft.validate());
        if !errors.is_empty() {
            report.invalid += 1;
            warn!(item = %payload.item, problems = errors.len(), "listing failed checks");
            for error in errors {
                report.lines.push(format!("  ! {error}"));
            }
        }
    }

    report
        .lines
        .push(format!("{} listing(s), {} with problems", listings.len(), report.invalid));
    Ok(report)
}

fn parse_listings(json: &str) -> Result<Vec<ListingPayload>> {
    let listings = match serde_json::from_str::<OneOrMany>(json)
        .context("listing file is not a listing or an array of listings")?
    {
        OneOrMany::Many(listings) => listings,
        OneOrMany::One(listing) => vec![*listing],
    };
    Ok(listings)
}

/// One line per listing that passes `filter`, in `order`.
pub fn list_listings(
    listings_json: &str,
    filter: &ListingFilter,
    order: SortOrder,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let listings = parse_listings(listings_json)?;
    let mut shown = filter_listings(&listings, filter);
    sort_listings(&mut shown, order);
    debug!(total = listings.len(), shown = shown.len(), %order, "listing");

    let mut lines: Vec<String> = shown
        .iter()
        .map(|listing| {
            let mut line = format!(
                "[{}] {}: {} x{} = {}",
                listing.listing_type.as_str(),
                listing.item,
                listing.price,
                listing.quantity.filter(|q| *q > 0).unwrap_or(1),
                listing.line_total()
            );
            if let Some(created) = listing.created_at() {
                line.push_str(&format!(" ({})", format_time_ago(created, now)));
            }
            line
        })
        .collect();
    lines.push(format!("{} of {} listing(s)", shown.len(), listings.len()));
    Ok(lines)
}

/// `list <listings.json> [--search <text>] [--type <buy|sell|all>]
/// [--category <name|all>] [--sort <order>]`.
pub fn list_cmd(args: &[String]) -> Result<Vec<String>> {
    let mut listings_path: Option<&str> = None;
    let mut filter = ListingFilter::default();
    let mut order = SortOrder::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--search" | "-s" | "--type" | "-t" | "--category" | "-c" | "--sort" | "-o" => {
                let value = args
                    .get(i + 1)
                    .with_context(|| format!("{flag} needs a value"))?;
                match flag {
                    "--search" | "-s" => filter.search = value.clone(),
                    "--type" | "-t" => filter.listing_type = ListingType::from_form_value(value),
                    "--category" | "-c" => {
                        filter.category = Some(value.clone()).filter(|c| c != "all")
                    }
                    _ => order = value.parse()?,
                }
                i += 1;
            }
            path => listings_path = Some(path),
        }
        i += 1;
    }

    let listings_path = listings_path.context("list needs a listings file")?;
    let listings = std::fs::read_to_string(listings_path)
        .with_context(|| format!("failed to read {listings_path}"))?;
    list_listings(&listings, &filter, order, Utc::now())
}

/// `check <listings.json> [--items <items.json>]`.
pub fn check_cmd(args: &[String]) -> Result<CheckReport> {
    let mut listings_path: Option<&str> = None;
    let mut items_path: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--items" | "-i" => {
                items_path = Some(args.get(i + 1).context("--items needs a path")?.as_str());
                i += 1;
            }
            path => listings_path = Some(path),
        }
        i += 1;
    }

    let listings_path = listings_path.context("check needs a listings file")?;
    let listings = std::fs::read_to_string(listings_path)
        .with_context(|| format!("failed to read {listings_path}"))?;
    let items = match items_path {
        Some(path) => {
            Some(std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?)
        }
        None => None,
    };

    check_listings(&listings, items.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_to_copper_cmd() {
        let out = to_copper_cmd(&args(&["1", "", "250", "7"])).unwrap();
        assert_eq!(out, vec!["1000250007 copper (1p 250s 7c)"]);

        let out = to_copper_cmd(&args(&[])).unwrap();
        assert_eq!(out, vec!["0 copper (0c)"]);
    }

    #[test]
    fn test_split_cmd() {
        let out = split_cmd(&args(&["2003004005"])).unwrap();
        assert_eq!(out[0], "platinum: 2");
        assert_eq!(out[3], "copper:   5");

        assert!(split_cmd(&args(&["-1"])).is_err());
        assert!(split_cmd(&args(&["ten"])).is_err());
        assert!(split_cmd(&args(&[])).is_err());
    }

    #[test]
    fn test_prices_cmd() {
        let config = CliConfig::default();
        let out = prices_cmd(&args(&["1000", "3", "total"]), &config).unwrap();
        assert_eq!(out[0], "each:  333c (333 copper)");
        assert_eq!(out[1], "total: 1s (1000 copper)");

        let out = prices_cmd(&args(&["1000", "4"]), &config).unwrap();
        assert_eq!(out[1], "total: 4s (4000 copper)");

        assert!(prices_cmd(&args(&["100", "0"]), &config).is_err());
    }

    #[test]
    fn test_check_listings() {
        let listings = r#"[
            {"item": "Frost Blade", "price": 5000000, "quantity": 2, "type": "sell",
             "priceMode": "Each", "combatCategory": "Weapon", "combatDmgType": "Cryonae",
             "combatDmgPercent": "75", "combatStrength": "1500", "rarity": "Rare"},
            {"item": "Hearty Stew", "price": 0, "type": "buy"}
        ]"#;
        let items = r#"[
            {"Items": "Frost Blade", "Profession A": "Blacksmith", "Profession B": "Combat"},
            {"Items": "Hearty Stew", "Profession A": "Chef", "Profession B": ""}
        ]"#;

        let report = check_listings(listings, Some(items)).unwrap();
        assert_eq!(report.invalid, 1);
        assert_eq!(report.lines[0], "Frost Blade: 5g each, 10g total (Each x2)");
        assert_eq!(report.lines[1], "  weapon: strength 1500, Cryonae 75%");
        assert!(report.lines.iter().any(|l| l == "  ! price must be positive"));
        assert_eq!(report.lines.last().unwrap(), "2 listing(s), 1 with problems");
    }

    #[test]
    fn test_check_flags_stored_stats_out_of_range() {
        let listing = r#"{"item": "Frost Blade", "price": 10, "combatCategory": "Weapon",
            "combatDmgType": "Impact", "combatStrength": 99999, "combatLevel": -7}"#;
        let items = r#"[{"Items": "Frost Blade", "Profession A": "Blacksmith", "Profession B": "Combat"}]"#;

        let report = check_listings(listing, Some(items)).unwrap();
        assert_eq!(report.invalid, 1);
        assert!(report
            .lines
            .iter()
            .any(|l| l == "  ! strength must be between 0 and 3000"));
        assert!(report
            .lines
            .iter()
            .any(|l| l == "  ! combat level must be between 0 and 2500"));
        // The restored draft shows the clamped value.
        assert!(report.lines.iter().any(|l| l.starts_with("  weapon: strength 3000")));
    }

    fn market_json() -> &'static str {
        r#"[
            {"item": "Oak Log", "price": 40, "quantity": 10, "type": "sell",
             "category": "Materials", "timestamp": 1699999500000},
            {"item": "Iron Ore", "price": 90, "quantity": 2, "type": "buy",
             "category": "materials", "timestamp": "2023-11-14T22:10:00Z"},
            {"item": "Pine Log", "price": 15, "type": "sell"}
        ]"#
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_list_listings_sorted_by_total() {
        let now = at("2023-11-14T22:20:00Z");
        let lines = list_listings(
            market_json(),
            &ListingFilter::default(),
            SortOrder::TotalDesc,
            now,
        )
        .unwrap();
        assert_eq!(lines[0], "[sell] Oak Log: 40c x10 = 400c (15 Mins Ago)");
        assert_eq!(lines[1], "[buy] Iron Ore: 90c x2 = 180c (10 Mins Ago)");
        assert_eq!(lines[2], "[sell] Pine Log: 15c x1 = 15c");
        assert_eq!(lines[3], "3 of 3 listing(s)");
    }

    #[test]
    fn test_list_listings_filtered() {
        let now = at("2023-11-14T22:20:00Z");
        let filter = ListingFilter {
            search: "log".to_string(),
            listing_type: Some(ListingType::Sell),
            category: Some("MATERIALS".to_string()),
        };
        let lines = list_listings(market_json(), &filter, SortOrder::Newest, now).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[sell] Oak Log"));
        assert_eq!(lines[1], "1 of 3 listing(s)");
    }

    #[test]
    fn test_list_cmd_rejects_unknown_sort() {
        let err = list_cmd(&args(&["listings.json", "--sort", "cheapest"])).unwrap_err();
        assert!(err.to_string().contains("sort order"));
        assert!(list_cmd(&args(&["--search"])).is_err());
    }

    #[test]
    fn test_check_single_listing() {
        let listing = r#"{"item": "Log", "price": 12, "type": "sell"}"#;
        let report = check_listings(listing, None).unwrap();
        assert_eq!(report.invalid, 0);
        assert_eq!(report.lines[0], "Log: 12c each, 12c total (Each x1)");
    }

    #[test]
    fn test_check_rejects_garbage() {
        assert!(check_listings("{\"nope\": true}", None).is_err());
    }
}
