//! Data models for tracked account progress.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hiscores skill order, aggregate first.
pub const SKILLS: [&str; 25] = [
    "Overall", "Attack", "Defence", "Strength", "Hitpoints", "Ranged", "Prayer", "Magic",
    "Cooking", "Woodcutting", "Fletching", "Fishing", "Firemaking", "Crafting", "Smithing",
    "Mining", "Herblore", "Agility", "Thieving", "Slayer", "Farming", "Runecraft", "Hunter",
    "Construction", "Sailing",
];

pub const OVERALL: &str = "Overall";

/// Trainable skills, not counting Overall.
pub const NUM_SKILLS: u32 = 24;

/// Bosses the aggregator reports efficiency hours for.
pub const BOSSES: &[&str] = &[
    "Abyssal Sire", "Alchemical Hydra", "Araxxor", "Barrows Chests", "Bryophyta", "Callisto",
    "Cerberus", "Chambers of Xeric", "Chambers of Xeric: Challenge Mode", "Chaos Elemental",
    "Chaos Fanatic", "Commander Zilyana", "Corporeal Beast", "Dagannoth Prime", "Dagannoth Rex",
    "Dagannoth Supreme", "Duke Sucellus", "General Graardor", "Giant Mole", "Grotesque Guardians",
    "Hespori", "Kalphite Queen", "King Black Dragon", "Kraken", "Kree'Arra", "K'ril Tsutsaroth",
    "Mimic", "Nex", "Nightmare", "Obor", "Phantom Muspah", "Sarachnis", "Scorpia", "Skotizo",
    "Sol Heredit", "Tempoross", "The Gauntlet", "The Corrupted Gauntlet", "The Hueycoatl",
    "The Leviathan", "Theatre of Blood", "Theatre of Blood: Hard Mode",
    "Thermonuclear Smoke Devil", "Tombs of Amascut", "Tombs of Amascut: Expert Mode", "TzKal-Zuk",
    "TzTok-Jad", "Vardorvis", "Venenatis", "Vet'ion", "Vorkath", "Wintertodt", "Zalcano", "Zulrah",
];

/// One skill after merging the hiscores with the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub rank: Option<u64>,          // None when unranked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ehp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,      // Not set for Overall
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp_to_level: Option<u64>,
}

/// Boss or activity with at least one kill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossRecord {
    pub name: String,
    pub killcount: u64,
    pub rank: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ehb: Option<f64>,
}

/// Account-wide skill milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestones {
    pub total_level: u32,
    pub total_xp: u64,
    pub combat_level: f64,
    pub skills_99: u32,
    pub skills_90: u32,
    pub skills_80: u32,
    pub skills_70: u32,
    pub num_skills: u32,
    pub maxed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsData {
    pub skills: Vec<SkillRecord>,
    pub milestones: Milestones,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossesData {
    pub bosses: Vec<BossRecord>,
}

/// Raw gains for the configured period, kept as the aggregator returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainsData {
    pub period_days: u32,
    pub gains: serde_json::Value,
}

/// Item from the bank export or potion storage, valued at GE prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankItem {
    pub id: u32,                    // 0 when unresolved
    pub name: String,
    pub quantity: u64,
    pub ge_price: u64,
    pub total_value: u64,
    pub category: String,
    pub subcategory: String,
    pub source: String,             // "bank" or "potion_storage"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubcategorySummary {
    pub count: u64,                 // Summed quantity
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub count: u64,                 // Summed quantity
    pub value: u64,
    pub subcategories: BTreeMap<String, SubcategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankData {
    pub total_items: usize,
    pub total_quantity: u64,
    pub total_value: u64,
    pub top_items: Vec<BankItem>,
    pub categories: BTreeMap<String, CategorySummary>,
    pub items: Vec<BankItem>,
}

/// Potion storage line converted to whole four-dose potions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionRecord {
    pub name: String,               // As written in the storage file
    pub doses: u64,
    pub potion_name: String,        // Normalized to the (4) variant
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionStorageData {
    pub total_doses: u64,
    pub potions: Vec<PotionRecord>,
}

/// Dated item shown in "recently obtained" lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    pub name: String,
    pub group: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLogEntry {
    pub name: String,
    pub category: String,
    pub page: String,
    pub obtained: bool,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub obtained: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionLogData {
    pub unique_obtained: u32,
    pub unique_items: u32,
    pub rank: Option<u64>,
    pub categories: BTreeMap<String, CategoryProgress>,
    pub recent_items: Vec<RecentItem>,
    pub entries: Vec<CollectionLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatAchievementTask {
    pub name: String,
    pub tier: String,
    pub monster: String,
    pub completed: bool,
    pub date: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierProgress {
    pub tier: String,
    pub completed: u32,
    pub total: u32,
    pub points: u32,                // Earned
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatAchievementsData {
    pub completed: u32,
    pub total: u32,
    pub points: u32,
    pub tiers: Vec<TierProgress>,
    pub recent: Vec<RecentItem>,
    pub tasks: Vec<CombatAchievementTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub group: String,
    pub obtained: bool,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetsData {
    pub obtained: u32,
    pub total: u32,
    pub recent: Vec<RecentItem>,
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub group: String,
    pub completed: bool,
    pub date: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestsData {
    pub completed: u32,
    pub total: u32,
    pub quest_points: u32,
    pub quests: Vec<Quest>,
}
