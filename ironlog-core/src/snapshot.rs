//! JSON snapshot files in the data directory.

use crate::error::Result;
use crate::models::{
    BankData, BossesData, CollectionLogData, CombatAchievementsData, GainsData, PetsData,
    PotionStorageData, QuestsData, SkillsData,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SKILLS_FILE: &str = "skills.json";
pub const BOSSES_FILE: &str = "bosses.json";
pub const COLLECTION_LOG_FILE: &str = "collection_log.json";
pub const BANK_FILE: &str = "bank.json";
pub const POTION_STORAGE_FILE: &str = "potion_storage.json";
pub const COMBAT_ACHIEVEMENTS_FILE: &str = "combat_achievements.json";
pub const PETS_FILE: &str = "pets.json";
pub const QUESTS_FILE: &str = "quests.json";
pub const GAINS_FILE: &str = "recent_gains.json";

/// A domain payload tagged with the player and generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub rsn: String,
    pub updated: String,            // RFC 3339, UTC
    #[serde(flatten)]
    pub data: T,
}

impl<T> Snapshot<T> {
    pub fn new(rsn: &str, data: T) -> Self {
        Self::at(rsn, Utc::now(), data)
    }

    pub fn at(rsn: &str, updated: DateTime<Utc>, data: T) -> Self {
        Self {
            rsn: rsn.to_string(),
            updated: updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            data,
        }
    }
}

pub type SkillsSnapshot = Snapshot<SkillsData>;
pub type BossesSnapshot = Snapshot<BossesData>;
pub type GainsSnapshot = Snapshot<GainsData>;
pub type CollectionLogSnapshot = Snapshot<CollectionLogData>;
pub type BankSnapshot = Snapshot<BankData>;
pub type PotionStorageSnapshot = Snapshot<PotionStorageData>;
pub type CombatAchievementsSnapshot = Snapshot<CombatAchievementsData>;
pub type PetsSnapshot = Snapshot<PetsData>;
pub type QuestsSnapshot = Snapshot<QuestsData>;

/// Write a snapshot as pretty JSON, replacing any previous file.
pub fn save_snapshot<T: Serialize>(path: &Path, snapshot: &Snapshot<T>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    std::fs::write(path, json)?;
    tracing::info!("Saved: {}", path.display());
    Ok(())
}

/// Read a snapshot. A missing file means no data yet.
pub fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<Snapshot<T>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Like [`load_snapshot`] but an unreadable file is logged and treated as missing.
pub fn load_snapshot_or_warn<T: DeserializeOwned>(path: &Path) -> Option<Snapshot<T>> {
    match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Ignoring unreadable snapshot {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BossRecord, BossesData};
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_json_shape() {
        let updated = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let snapshot = Snapshot::at(
            "FoolinSlays",
            updated,
            BossesData {
                bosses: vec![BossRecord {
                    name: "Vorkath".to_string(),
                    killcount: 12,
                    rank: None,
                    ehb: None,
                }],
            },
        );
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["rsn"], "FoolinSlays");
        assert_eq!(value["updated"], "2025-01-02T03:04:05Z");
        assert_eq!(value["bosses"][0]["killcount"], 12);
        assert!(value["bosses"][0].get("ehb").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(BOSSES_FILE);
        let snapshot = Snapshot::new("a", BossesData { bosses: vec![] });

        save_snapshot(&path, &snapshot).unwrap();
        let loaded: BossesSnapshot = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<SkillsSnapshot> = load_snapshot(&dir.path().join(SKILLS_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_error_or_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PETS_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_snapshot::<PetsData>(&path).is_err());
        assert!(load_snapshot_or_warn::<PetsData>(&path).is_none());
    }
}
