//! Bank valuation and category summaries.

use crate::categorize::categorize_item;
use crate::fetch::PriceQuote;
use crate::models::{BankData, BankItem, CategorySummary, PotionRecord, PotionStorageData};
use crate::parsers::BankEntry;
use std::collections::{BTreeMap, HashMap};

/// Unit price from a quote: the mid price when both sides exist, else
/// whichever side does, else 0.
pub fn unit_price(quote: Option<&PriceQuote>) -> u64 {
    match quote.map(|q| (q.high, q.low)) {
        Some((Some(high), Some(low))) => (high + low) / 2,
        Some((Some(price), None)) | Some((None, Some(price))) => price,
        _ => 0,
    }
}

/// Resolve missing ids by name, price and categorize every entry.
pub fn value_items(
    entries: Vec<BankEntry>,
    mapping: &HashMap<String, u32>,
    prices: &HashMap<String, PriceQuote>,
) -> Vec<BankItem> {
    let mut unresolved = 0usize;
    let items: Vec<BankItem> = entries
        .into_iter()
        .map(|entry| {
            let id = match entry.id {
                0 => mapping.get(&entry.name).copied().unwrap_or(0),
                id => id,
            };
            let ge_price = if id == 0 {
                unresolved += 1;
                0
            } else {
                unit_price(prices.get(&id.to_string()))
            };
            let (category, subcategory) = categorize_item(&entry.name);
            BankItem {
                id,
                quantity: entry.quantity,
                ge_price,
                total_value: ge_price.saturating_mul(entry.quantity),
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                source: entry.source.to_string(),
                name: entry.name,
            }
        })
        .collect();

    if unresolved > 0 {
        tracing::debug!("{} items without an id, valued at 0", unresolved);
    }
    items
}

/// Totals, per-category breakdown and the `top_n` most valuable items.
pub fn summarize_bank(items: Vec<BankItem>, top_n: usize) -> BankData {
    let mut categories: BTreeMap<String, CategorySummary> = BTreeMap::new();
    for item in &items {
        let category = categories.entry(item.category.clone()).or_default();
        category.count += item.quantity;
        category.value += item.total_value;
        let sub = category.subcategories.entry(item.subcategory.clone()).or_default();
        sub.count += item.quantity;
        sub.value += item.total_value;
    }

    let mut top_items = items.clone();
    top_items.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    top_items.truncate(top_n);

    BankData {
        total_items: items.len(),
        total_quantity: items.iter().map(|i| i.quantity).sum(),
        total_value: items.iter().map(|i| i.total_value).sum(),
        top_items,
        categories,
        items,
    }
}

pub fn potion_storage_data(potions: Vec<PotionRecord>) -> PotionStorageData {
    PotionStorageData {
        total_doses: potions.iter().map(|p| p.doses).sum(),
        potions,
    }
}
