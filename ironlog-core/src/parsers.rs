//! Parsers for the bank export and potion storage files.

use crate::checklist::Checklist;
use crate::error::Result;
use crate::models::PotionRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Read;
use std::path::Path;

lazy_static! {
    static ref DOSE_SUFFIX: Regex = Regex::new(r"\(\d\)$").expect("valid dose regex");
}

pub const SOURCE_BANK: &str = "bank";
pub const SOURCE_POTION_STORAGE: &str = "potion_storage";

/// One inventory line before pricing and categorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    pub id: u32,                    // 0 when the id still has to be looked up
    pub name: String,
    pub quantity: u64,
    pub source: &'static str,
}

/// Parse a tab-separated bank export (`id<TAB>name<TAB>quantity`, header first).
/// Lines that don't parse are skipped.
pub fn parse_bank_export<R: Read>(reader: R) -> Vec<BankEntry> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Bank line {}: {}, skipped", idx + 2, e);
                continue;
            }
        };
        if record.len() < 3 {
            continue;
        }
        let parsed = (record[0].parse::<u32>(), record[2].replace(',', "").parse::<u64>());
        match parsed {
            (Ok(id), Ok(quantity)) if !record[1].is_empty() => entries.push(BankEntry {
                id,
                name: record[1].to_string(),
                quantity,
                source: SOURCE_BANK,
            }),
            _ => tracing::debug!("Bank line {}: malformed {:?}, skipped", idx + 2, record),
        }
    }
    entries
}

/// Load the bank export. A missing file means no data yet.
pub fn load_bank_export(path: &Path) -> Result<Option<Vec<BankEntry>>> {
    if !path.exists() {
        tracing::info!("Bank data not found: {}", path.display());
        return Ok(None);
    }
    let file = std::fs::File::open(path)?;
    Ok(Some(parse_bank_export(file)))
}

/// Name of the four-dose variant: `Prayer potion(2)` becomes `Prayer potion(4)`.
/// Unfinished potions keep their name.
pub fn normalize_potion_name(name: &str) -> String {
    if name.to_lowercase().contains("(unf)") {
        return name.to_string();
    }
    DOSE_SUFFIX.replace(name, "(4)").into_owned()
}

/// Potion storage doses (`name: doses` values in any section), rounded up to
/// whole four-dose potions.
pub fn potion_records(storage: &Checklist) -> Vec<PotionRecord> {
    storage
        .sections
        .iter()
        .flat_map(|s| s.values.iter())
        .map(|(name, doses)| PotionRecord {
            name: name.clone(),
            doses: *doses,
            potion_name: normalize_potion_name(name),
            quantity: doses.div_ceil(4),
        })
        .collect()
}

/// Bank entries for stored potions; ids are resolved later by name.
pub fn potion_bank_entries(potions: &[PotionRecord]) -> Vec<BankEntry> {
    potions
        .iter()
        .filter(|p| p.quantity > 0)
        .map(|p| BankEntry {
            id: 0,
            name: p.potion_name.clone(),
            quantity: p.quantity,
            source: SOURCE_POTION_STORAGE,
        })
        .collect()
}
