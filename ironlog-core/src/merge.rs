//! Merging fetched and hand-kept sources into snapshot payloads.
//!
//! Precedence: the official hiscores win for level, xp and rank; the
//! aggregator fills in efficiency hours and anything the hiscores lack; a
//! date written in a checklist always beats a fetched one.

use crate::checklist::{recent_items, Checklist, ChecklistEntry};
use crate::models::{
    BOSSES, BossRecord, CategoryProgress, CollectionLogData, CollectionLogEntry,
    CombatAchievementTask, CombatAchievementsData, Milestones, NUM_SKILLS, OVERALL, Pet, PetsData,
    Quest, QuestsData, RecentItem, SKILLS, SkillRecord, TierProgress,
};
use crate::xp::{level_progress, xp_for_level};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

pub const RECENT_LIMIT: usize = 10;

/// Combat achievement tiers and the points each task is worth.
pub const CA_TIERS: [(&str, u32); 6] = [
    ("Easy", 1),
    ("Medium", 2),
    ("Hard", 3),
    ("Elite", 4),
    ("Master", 5),
    ("Grandmaster", 6),
];

/// Lenient unsigned read: numbers, numeric strings, negatives as absent.
fn json_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

fn json_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn rank_of(value: &Value) -> Option<u64> {
    json_u64(value).filter(|r| *r > 0)
}

/// Hitpoints never drops below this in game, so combat treats it as a floor.
const MIN_HITPOINTS: u32 = 10;

/// Level, xp and ehp the aggregator reports for one skill.
///
/// Accepts both `{"attack": {"level": .., "xp": .., "ehp": ..}}` and the flat
/// `{"Attack": xp, "Attack_level": .., "Attack_ehp": ..}` layouts.
#[derive(Debug, Default, Clone, Copy)]
struct TempleFields {
    level: Option<u32>,
    xp: Option<u64>,
    score: Option<u64>,
    extra: Option<f64>,
}

fn temple_fields(temple: &Value, name: &str, key: &str, extra: &str) -> TempleFields {
    if let Some(obj) = temple.get(key).filter(|v| v.is_object()) {
        return TempleFields {
            level: obj.get("level").and_then(json_u64).map(|l| l as u32),
            xp: obj.get("xp").and_then(json_u64),
            score: obj.get("kc").or_else(|| obj.get("score")).and_then(json_u64),
            extra: obj.get(extra).and_then(json_f64),
        };
    }
    let flat = temple.get(name).and_then(json_u64);
    TempleFields {
        level: temple.get(format!("{name}_level")).and_then(json_u64).map(|l| l as u32),
        xp: flat,
        score: flat,
        extra: temple.get(format!("{name}_{extra}")).and_then(json_f64),
    }
}

fn skill_key(skill: &str) -> String {
    skill.to_lowercase().replace(' ', "_")
}

fn boss_key(boss: &str) -> String {
    boss.to_lowercase().replace(' ', "_").replace(['\'', ':'], "")
}

/// Merge hiscores `skills` with aggregator stats, in hiscores order.
///
/// Returns an empty list when neither source is available. Overall is only
/// present when a source reports it.
pub fn merge_skills(official: Option<&Value>, temple: Option<&Value>) -> Vec<SkillRecord> {
    if official.is_none() && temple.is_none() {
        return Vec::new();
    }

    let official_skills: Vec<&Value> = official
        .and_then(|o| o.get("skills"))
        .and_then(Value::as_array)
        .map(|a| a.iter().collect())
        .unwrap_or_default();
    let find_official = |name: &str| {
        official_skills
            .iter()
            .find(|s| s.get("name").and_then(Value::as_str) == Some(name))
            .copied()
    };

    let mut names: Vec<String> = SKILLS.iter().map(|s| s.to_string()).collect();
    for s in &official_skills {
        if let Some(name) = s.get("name").and_then(Value::as_str) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    let mut records = Vec::with_capacity(names.len());
    for name in names {
        let live = find_official(&name);
        let secondary = temple
            .map(|t| temple_fields(t, &name, &skill_key(&name), "ehp"))
            .unwrap_or_default();

        let live_level = live.and_then(|s| s.get("level")).and_then(json_u64).map(|l| l as u32);
        let live_xp = live.and_then(|s| s.get("xp")).and_then(json_u64);

        let unreported = live.is_none() && secondary.level.is_none() && secondary.xp.is_none();
        if name == OVERALL && unreported {
            continue;
        }

        let reported_level = live_level
            .filter(|l| *l > 0)
            .or(secondary.level.filter(|l| *l > 0));
        let level = reported_level.unwrap_or(if name == OVERALL { 0 } else { 1 });
        // Unreported xp follows a reported level; a defaulted skill has none.
        let xp = live_xp
            .or(secondary.xp)
            .or_else(|| reported_level.filter(|_| name != OVERALL).map(xp_for_level))
            .unwrap_or(0);
        let rank = live.and_then(|s| s.get("rank")).and_then(rank_of);

        let (progress, xp_to_level) = if name == OVERALL {
            (None, None)
        } else {
            let p = level_progress(xp, level);
            (Some(p.progress), Some(p.xp_to_level))
        };

        records.push(SkillRecord {
            name,
            level,
            xp,
            rank,
            ehp: secondary.extra,
            progress,
            xp_to_level,
        });
    }
    records
}

/// Merge hiscores `activities` with aggregator boss data. Only bosses with
/// kills are kept.
pub fn merge_bosses(official: Option<&Value>, temple: Option<&Value>) -> Vec<BossRecord> {
    let mut bosses: Vec<BossRecord> = official
        .and_then(|o| o.get("activities"))
        .and_then(Value::as_array)
        .map(|activities| {
            activities
                .iter()
                .filter_map(|a| {
                    let name = a.get("name").and_then(Value::as_str)?;
                    let killcount = a.get("score").and_then(json_u64).filter(|kc| *kc > 0)?;
                    Some(BossRecord {
                        name: name.to_string(),
                        killcount,
                        rank: a.get("rank").and_then(rank_of),
                        ehb: None,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(temple) = temple {
        for boss in BOSSES {
            let fields = temple_fields(temple, boss, &boss_key(boss), "ehb");
            match bosses.iter_mut().find(|b| b.name == *boss) {
                Some(record) => record.ehb = fields.extra,
                None => {
                    if let Some(kc) = fields.score.filter(|kc| *kc > 0) {
                        bosses.push(BossRecord {
                            name: boss.to_string(),
                            killcount: kc,
                            rank: None,
                            ehb: fields.extra,
                        });
                    }
                }
            }
        }
    }
    bosses
}

fn level_of(skills: &[SkillRecord], name: &str) -> u32 {
    skills
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.level)
        .unwrap_or(1)
}

/// Combat level, rounded to two decimals.
pub fn combat_level(skills: &[SkillRecord]) -> f64 {
    let lvl = |name| level_of(skills, name) as f64;
    let hitpoints = level_of(skills, "Hitpoints").max(MIN_HITPOINTS) as f64;
    let prayer = (level_of(skills, "Prayer") / 2) as f64;
    let base = 0.25 * (lvl("Defence") + hitpoints + prayer);
    let melee = 0.325 * (lvl("Attack") + lvl("Strength"));
    let ranged = 0.4875 * lvl("Ranged");
    let magic = 0.4875 * lvl("Magic");
    let combat = base + melee.max(ranged).max(magic);
    (combat * 100.0).round() / 100.0
}

pub fn calculate_milestones(skills: &[SkillRecord]) -> Milestones {
    let individual: Vec<&SkillRecord> = skills.iter().filter(|s| s.name != OVERALL).collect();

    let (total_level, total_xp) = match skills.iter().find(|s| s.name == OVERALL) {
        Some(overall) if overall.level > 0 => (overall.level, overall.xp),
        _ => (
            individual.iter().map(|s| s.level).sum(),
            individual.iter().map(|s| s.xp).sum(),
        ),
    };

    let at_least =
        |threshold: u32| individual.iter().filter(|s| s.level >= threshold).count() as u32;
    let skills_99 = at_least(99);

    Milestones {
        total_level,
        total_xp,
        combat_level: combat_level(skills),
        skills_99,
        skills_90: at_least(90),
        skills_80: at_least(80),
        skills_70: at_least(70),
        num_skills: NUM_SKILLS,
        maxed: skills_99 >= NUM_SKILLS,
    }
}

/// A hand-recorded date wins over a fetched one for the same item.
pub fn merge_dates(manual: Option<&str>, fetched: Option<&str>) -> Option<String> {
    manual.or(fetched).map(str::to_string)
}

#[derive(Debug, Clone, Default, PartialEq)]
struct FetchedClogItem {
    name: String,
    date: Option<String>,
    category: Option<String>,
}

fn fetched_clog_item(value: &Value, category: Option<&str>) -> Option<FetchedClogItem> {
    match value {
        Value::String(name) => Some(FetchedClogItem {
            name: name.clone(),
            date: None,
            category: category.map(str::to_string),
        }),
        Value::Object(obj) => {
            let name = obj.get("name").and_then(Value::as_str)?;
            let obtained = obj.get("obtained").map(|o| o.as_bool().unwrap_or(true)).unwrap_or(true);
            if !obtained {
                return None;
            }
            Some(FetchedClogItem {
                name: name.to_string(),
                date: obj.get("date").and_then(Value::as_str).map(|d| d.chars().take(10).collect()),
                category: obj
                    .get("category")
                    .and_then(Value::as_str)
                    .or(category)
                    .map(str::to_string),
            })
        }
        _ => None,
    }
}

fn fetched_clog_items(data: &Value) -> Vec<FetchedClogItem> {
    match data.get("items") {
        Some(Value::Array(items)) => {
            items.iter().filter_map(|i| fetched_clog_item(i, None)).collect()
        }
        Some(Value::Object(by_category)) => by_category
            .iter()
            .flat_map(|(category, items)| {
                items
                    .as_array()
                    .into_iter()
                    .flatten()
                    .filter_map(move |i| fetched_clog_item(i, Some(category.as_str())))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn first_u64(data: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| data.get(*k).and_then(json_u64))
}

fn newest_first(mut items: Vec<RecentItem>, limit: usize) -> Vec<RecentItem> {
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.truncate(limit);
    items
}

fn recent_from_checklist<'a, I>(entries: I) -> Vec<RecentItem>
where
    I: IntoIterator<Item = ChecklistEntry<'a>>,
{
    recent_items(entries, RECENT_LIMIT)
        .into_iter()
        .filter_map(|e| {
            Some(RecentItem {
                name: e.item.name.clone(),
                group: e.list.to_string(),
                date: e.item.date.clone()?,
            })
        })
        .collect()
}

/// Merge the hand-kept collection log with the aggregator's response.
///
/// `unique_total_fallback` is used for the total when neither source knows it.
pub fn merge_collection_log(
    manual: Option<&Checklist>,
    fetched: Option<&Value>,
    unique_total_fallback: u32,
) -> Option<CollectionLogData> {
    if manual.is_none() && fetched.is_none() {
        return None;
    }

    let mut entries: Vec<CollectionLogEntry> = manual
        .map(|cl| {
            cl.entries()
                .map(|e| CollectionLogEntry {
                    name: e.item.name.clone(),
                    category: e.section.to_string(),
                    page: e.list.to_string(),
                    obtained: e.item.done,
                    date: e.item.date.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    let manual_items = !entries.is_empty();

    let data = fetched.map(|f| f.get("data").unwrap_or(f));
    let fetched_items = data.map(fetched_clog_items).unwrap_or_default();

    let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, e) in entries.iter().enumerate() {
        by_name.entry(e.name.to_lowercase()).or_default().push(idx);
    }
    for item in fetched_items {
        match by_name.get(&item.name.to_lowercase()) {
            Some(indices) => {
                for &idx in indices {
                    let entry = &mut entries[idx];
                    entry.obtained = true;
                    entry.date = merge_dates(entry.date.as_deref(), item.date.as_deref());
                }
            }
            None => {
                let category = item.category.unwrap_or_else(|| "Other".to_string());
                by_name.entry(item.name.to_lowercase()).or_default().push(entries.len());
                entries.push(CollectionLogEntry {
                    name: item.name,
                    page: category.clone(),
                    category,
                    obtained: true,
                    date: item.date,
                });
            }
        }
    }

    let summary_obtained =
        data.and_then(|d| first_u64(d, &["Unique Obtained", "unique_obtained", "obtained"]));
    let summary_total = data.and_then(|d| first_u64(d, &["Unique", "unique_items", "total"]));
    let rank = data.and_then(|d| ["Rank", "rank"].iter().find_map(|k| d.get(*k).and_then(rank_of)));

    let unique_obtained = if entries.is_empty() {
        summary_obtained.unwrap_or(0) as u32
    } else {
        entries
            .iter()
            .filter(|e| e.obtained)
            .map(|e| e.name.to_lowercase())
            .collect::<HashSet<_>>()
            .len() as u32
    };
    let unique_items = if manual_items {
        entries.iter().map(|e| e.name.to_lowercase()).collect::<HashSet<_>>().len() as u32
    } else {
        summary_total.map(|t| t as u32).unwrap_or(unique_total_fallback)
    };

    let mut categories: BTreeMap<String, CategoryProgress> = BTreeMap::new();
    for e in &entries {
        let progress = categories.entry(e.category.clone()).or_default();
        progress.total += 1;
        if e.obtained {
            progress.obtained += 1;
        }
    }

    let recent = entries
        .iter()
        .filter(|e| e.obtained)
        .filter_map(|e| {
            Some(RecentItem {
                name: e.name.clone(),
                group: e.page.clone(),
                date: e.date.clone()?,
            })
        })
        .collect();

    Some(CollectionLogData {
        unique_obtained,
        unique_items,
        rank,
        categories,
        recent_items: newest_first(recent, RECENT_LIMIT),
        entries,
    })
}

fn tier_points(tier: &str) -> Option<u32> {
    CA_TIERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tier))
        .map(|(_, points)| *points)
}

/// Combat achievements: sections are tiers, lists are monsters.
pub fn summarize_combat_achievements(checklist: &Checklist) -> CombatAchievementsData {
    let tasks: Vec<CombatAchievementTask> = checklist
        .entries()
        .map(|e| CombatAchievementTask {
            name: e.item.name.clone(),
            tier: e.section.to_string(),
            monster: e.list.to_string(),
            completed: e.item.done,
            date: e.item.date.clone(),
            points: e.item.points.or_else(|| tier_points(e.section)).unwrap_or(0),
        })
        .collect();

    // Known tiers in game order, anything else after them in file order.
    let mut tier_names: Vec<String> = CA_TIERS
        .iter()
        .map(|(t, _)| t.to_string())
        .filter(|t| checklist.section(t).is_some())
        .collect();
    for section in &checklist.sections {
        if !tier_names.contains(&section.name) {
            tier_names.push(section.name.clone());
        }
    }

    let tiers: Vec<TierProgress> = tier_names
        .into_iter()
        .map(|tier| {
            let in_tier: Vec<&CombatAchievementTask> =
                tasks.iter().filter(|t| t.tier == tier).collect();
            TierProgress {
                completed: in_tier.iter().filter(|t| t.completed).count() as u32,
                total: in_tier.len() as u32,
                points: in_tier.iter().filter(|t| t.completed).map(|t| t.points).sum(),
                total_points: in_tier.iter().map(|t| t.points).sum(),
                tier,
            }
        })
        .collect();

    CombatAchievementsData {
        completed: tiers.iter().map(|t| t.completed).sum(),
        total: tiers.iter().map(|t| t.total).sum(),
        points: tiers.iter().map(|t| t.points).sum(),
        tiers,
        recent: recent_from_checklist(checklist.entries()),
        tasks,
    }
}

/// Pets: every listed item is a pet, grouped by its list.
pub fn summarize_pets(checklist: &Checklist) -> PetsData {
    let pets: Vec<Pet> = checklist
        .entries()
        .map(|e| Pet {
            name: e.item.name.clone(),
            group: e.list.to_string(),
            obtained: e.item.done,
            date: e.item.date.clone(),
        })
        .collect();

    PetsData {
        obtained: pets.iter().filter(|p| p.obtained).count() as u32,
        total: pets.len() as u32,
        recent: recent_from_checklist(checklist.entries()),
        pets,
    }
}

/// Quests: lists are quest groups, `points` are quest points (0 when unset).
pub fn summarize_quests(checklist: &Checklist) -> QuestsData {
    let quests: Vec<Quest> = checklist
        .entries()
        .map(|e| Quest {
            name: e.item.name.clone(),
            group: e.list.to_string(),
            completed: e.item.done,
            date: e.item.date.clone(),
            points: e.item.points.unwrap_or(0),
        })
        .collect();

    QuestsData {
        completed: quests.iter().filter(|q| q.completed).count() as u32,
        total: quests.len() as u32,
        quest_points: quests.iter().filter(|q| q.completed).map(|q| q.points).sum(),
        quests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn skill(name: &str, level: u32, xp: u64) -> SkillRecord {
        SkillRecord {
            name: name.to_string(),
            level,
            xp,
            rank: None,
            ehp: None,
            progress: None,
            xp_to_level: None,
        }
    }

    fn hiscores() -> Value {
        json!({
            "skills": [
                {"id": 0, "name": "Overall", "rank": 150000, "level": 1500, "xp": 40000000},
                {"id": 1, "name": "Attack", "rank": 200000, "level": 80, "xp": 2000000},
                {"id": 2, "name": "Defence", "rank": -1, "level": 1, "xp": -1},
                {"id": 3, "name": "Hitpoints", "rank": 1, "level": 99, "xp": 13034431}
            ],
            "activities": [
                {"id": 0, "name": "Clue Scrolls (all)", "rank": -1, "score": -1},
                {"id": 1, "name": "Vorkath", "rank": 5000, "score": 250},
                {"id": 2, "name": "Zulrah", "rank": 9000, "score": 0}
            ]
        })
    }

    #[test]
    fn test_merge_skills_prefers_official() {
        let temple = json!({
            "attack": {"level": 70, "xp": 1, "ehp": 12.5},
            "strength": {"level": 60, "xp": 273742}
        });
        let skills = merge_skills(Some(&hiscores()), Some(&temple));

        assert_eq!(skills[0].name, "Overall");
        assert_eq!(skills[0].level, 1500);
        assert_eq!(skills[0].progress, None);

        let attack = skills.iter().find(|s| s.name == "Attack").unwrap();
        assert_eq!(attack.level, 80);
        assert_eq!(attack.xp, 2_000_000);
        assert_eq!(attack.rank, Some(200_000));
        assert_eq!(attack.ehp, Some(12.5));
        assert!(attack.progress.is_some());

        let defence = skills.iter().find(|s| s.name == "Defence").unwrap();
        assert_eq!(defence.rank, None);
        assert_eq!(defence.xp, 0);

        // Missing from the hiscores, filled from the aggregator.
        let strength = skills.iter().find(|s| s.name == "Strength").unwrap();
        assert_eq!(strength.level, 60);
        assert_eq!(strength.xp, 273_742);
        assert_eq!(strength.progress, Some(0.0));

        // Missing everywhere, defaults.
        let magic = skills.iter().find(|s| s.name == "Magic").unwrap();
        assert_eq!(magic.level, 1);
        assert_eq!(magic.rank, None);

        let hp = skills.iter().find(|s| s.name == "Hitpoints").unwrap();
        assert_eq!(hp.progress, Some(100.0));
        assert_eq!(hp.xp_to_level, Some(0));
    }

    #[test]
    fn test_unreported_skills_default_to_level_one() {
        let temple = json!({"attack": {"level": 61, "xp": 302288}});
        let skills = merge_skills(None, Some(&temple));
        let hp = skills.iter().find(|s| s.name == "Hitpoints").unwrap();
        assert_eq!(hp.level, 1);
        assert_eq!(hp.xp, 0);

        // Only reported xp is summed without Overall.
        let m = calculate_milestones(&skills);
        assert_eq!(m.total_xp, 302_288);
        assert_eq!(m.total_level, 61 + 23);
        // Hitpoints still counts as 10 for combat: 0.25 * (1 + 10 + 0) + 0.325 * 62
        assert_eq!(m.combat_level, 22.9);
    }

    #[test]
    fn test_merge_skills_flat_temple_layout() {
        let temple = json!({"Attack": 1210421, "Attack_level": 75, "Attack_ehp": 3.25});
        let skills = merge_skills(None, Some(&temple));
        assert!(skills.iter().all(|s| s.name != "Overall"));
        let attack = skills.iter().find(|s| s.name == "Attack").unwrap();
        assert_eq!(attack.level, 75);
        assert_eq!(attack.xp, 1_210_421);
        assert_eq!(attack.ehp, Some(3.25));
    }

    #[test]
    fn test_merge_skills_without_sources() {
        assert!(merge_skills(None, None).is_empty());
    }

    #[test]
    fn test_merge_bosses() {
        let temple = json!({
            "vorkath": {"ehb": 4.5},
            "Zulrah": 12, "Zulrah_ehb": 0.8,
            "chambers_of_xeric_challenge_mode": {"kc": 3},
            "kreearra": {"kc": 0}
        });
        let bosses = merge_bosses(Some(&hiscores()), Some(&temple));
        let names: Vec<&str> = bosses.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Vorkath", "Chambers of Xeric: Challenge Mode", "Zulrah"]);
        assert_eq!(bosses[0].killcount, 250);
        assert_eq!(bosses[0].rank, Some(5000));
        assert_eq!(bosses[0].ehb, Some(4.5));
        assert_eq!(bosses[1].killcount, 3);
        assert_eq!(bosses[2].killcount, 12);
        assert_eq!(bosses[2].ehb, Some(0.8));
    }

    #[test]
    fn test_combat_level_formula() {
        let skills = vec![
            skill("Attack", 99, 0),
            skill("Strength", 99, 0),
            skill("Defence", 99, 0),
            skill("Hitpoints", 99, 0),
            skill("Prayer", 99, 0),
            skill("Ranged", 99, 0),
            skill("Magic", 99, 0),
        ];
        // 0.25 * (99 + 99 + 49) + 0.325 * 198
        assert_eq!(combat_level(&skills), 126.1);
        // Fresh account: 0.25 * (1 + 10 + 0) + 0.325 * 2
        assert_eq!(combat_level(&[]), 3.4);
        // Ranged dominates
        let ranger = vec![
            skill("Ranged", 99, 0),
            skill("Hitpoints", 70, 0),
            skill("Defence", 70, 0),
        ];
        assert_eq!(combat_level(&ranger), 83.26);
    }

    #[test]
    fn test_milestones_use_overall_when_present() {
        let skills = merge_skills(Some(&hiscores()), None);
        let m = calculate_milestones(&skills);
        assert_eq!(m.total_level, 1500);
        assert_eq!(m.total_xp, 40_000_000);
        assert_eq!(m.skills_99, 1);
        assert_eq!(m.skills_70, 2);
        assert_eq!(m.num_skills, 24);
        assert!(!m.maxed);
    }

    #[test]
    fn test_milestones_sum_without_overall() {
        let skills = vec![skill("Attack", 50, 101_333), skill("Strength", 60, 273_742)];
        let m = calculate_milestones(&skills);
        assert_eq!(m.total_level, 110);
        assert_eq!(m.total_xp, 375_075);
        assert_eq!(m.skills_70, 0);
    }

    #[test]
    fn test_manual_date_wins() {
        assert_eq!(
            merge_dates(Some("2023-05-01"), Some("2025-01-01")).as_deref(),
            Some("2023-05-01")
        );
        assert_eq!(merge_dates(None, Some("2025-01-01")).as_deref(), Some("2025-01-01"));
        assert_eq!(merge_dates(None, None), None);
    }

    #[test]
    fn test_collection_log_merge_keeps_manual_date() {
        let manual = Checklist::parse(
            "Bosses:\n  Vorkath:\n    - Draconic visage | 2023-05-01\n    - Vorki\n  Zulrah:\n    - Tanzanite fang\n",
        );
        let fetched = json!({"data": {
            "Rank": 4321,
            "items": [
                {"name": "Draconic visage", "date": "2025-01-01 12:00:00"},
                {"name": "Tanzanite fang", "date": "2024-02-02"},
                {"name": "Bronze locks", "date": "2024-03-03", "category": "Minigames"}
            ]
        }});
        let clog = merge_collection_log(Some(&manual), Some(&fetched), 1615).unwrap();

        let visage = clog.entries.iter().find(|e| e.name == "Draconic visage").unwrap();
        assert_eq!(visage.date.as_deref(), Some("2023-05-01"));
        let fang = clog.entries.iter().find(|e| e.name == "Tanzanite fang").unwrap();
        assert!(fang.obtained);
        assert_eq!(fang.date.as_deref(), Some("2024-02-02"));

        assert_eq!(clog.unique_obtained, 3);
        assert_eq!(clog.unique_items, 4);
        assert_eq!(clog.rank, Some(4321));
        assert_eq!(clog.categories["Bosses"], CategoryProgress { obtained: 2, total: 3 });
        assert_eq!(clog.categories["Minigames"], CategoryProgress { obtained: 1, total: 1 });

        let total: u32 = clog.categories.values().map(|c| c.total).sum();
        assert_eq!(total as usize, clog.entries.len());
        let recent: Vec<&str> = clog.recent_items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(recent, vec!["Bronze locks", "Tanzanite fang", "Draconic visage"]);
    }

    #[test]
    fn test_collection_log_summary_only() {
        let fetched = json!({"data": {"unique_obtained": "393", "Unique": 1500}});
        let clog = merge_collection_log(None, Some(&fetched), 1615).unwrap();
        assert_eq!(clog.unique_obtained, 393);
        assert_eq!(clog.unique_items, 1500);

        let fetched = json!({"obtained": 12});
        let clog = merge_collection_log(None, Some(&fetched), 1615).unwrap();
        assert_eq!(clog.unique_obtained, 12);
        assert_eq!(clog.unique_items, 1615);

        assert!(merge_collection_log(None, None, 1615).is_none());
    }

    #[test]
    fn test_collection_log_items_by_category() {
        let fetched = json!({"items": {"Raids": [
            {"name": "Olmlet", "date": "2024-05-05"},
            "Twisted bow",
            {"name": "Kodai insignia", "obtained": false}
        ]}});
        let clog = merge_collection_log(None, Some(&fetched), 1615).unwrap();
        assert_eq!(clog.entries.len(), 2);
        assert_eq!(clog.categories["Raids"].obtained, 2);
        assert_eq!(clog.unique_obtained, 2);
    }

    #[test]
    fn test_combat_achievements_summary() {
        let cl = Checklist::parse(
            "Medium:\n  Obor:\n    - [x] Obor Champion | 2024-01-02\n    - Not So Great Obor\nEasy:\n  Noxious Foe:\n    - [x] Noxious Foe\nSpecial:\n  Any:\n    - [x] Custom | | 9\n",
        );
        let ca = summarize_combat_achievements(&cl);
        let tiers: Vec<&str> = ca.tiers.iter().map(|t| t.tier.as_str()).collect();
        assert_eq!(tiers, vec!["Easy", "Medium", "Special"]);
        assert_eq!(ca.tiers[1].completed, 1);
        assert_eq!(ca.tiers[1].total, 2);
        assert_eq!(ca.tiers[1].points, 2);
        assert_eq!(ca.tiers[1].total_points, 4);
        assert_eq!(ca.points, 1 + 2 + 9);
        assert_eq!(ca.points, ca.tiers.iter().map(|t| t.points).sum::<u32>());
        assert_eq!(ca.completed, 3);
        assert_eq!(ca.total, 4);
        assert_eq!(ca.recent.len(), 1);
        assert_eq!(ca.recent[0].group, "Obor");
    }

    #[test]
    fn test_pets_and_quests() {
        let pets = summarize_pets(&Checklist::parse(
            "Pets:\n  Boss:\n    - Vorki | 2024-03-03\n    - Olmlet\n  Skilling:\n    - [x] Heron\n",
        ));
        assert_eq!(pets.obtained, 2);
        assert_eq!(pets.total, 3);
        assert_eq!(pets.recent[0].name, "Vorki");

        let quests = summarize_quests(&Checklist::parse(
            "Quests:\n  Free:\n    - [x] Dragon Slayer I | | 2\n    - Shield of Arrav | | 1\n  Members:\n    - [x] Recipe for Disaster | 2024-01-01 | 10\n",
        ));
        assert_eq!(quests.completed, 2);
        assert_eq!(quests.total, 3);
        assert_eq!(quests.quest_points, 12);
    }
}
