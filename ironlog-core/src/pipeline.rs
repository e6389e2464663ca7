//! Batch jobs: fetch or parse inputs, write snapshots, render the report.

use crate::bank::{potion_storage_data, summarize_bank, value_items};
use crate::checklist::{Checklist, load_checklist};
use crate::config::TrackerConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::goals::{GOALS_FILE, load_goals};
use crate::merge::{
    calculate_milestones, merge_bosses, merge_collection_log, merge_skills,
    summarize_combat_achievements, summarize_pets, summarize_quests,
};
use crate::models::{BossesData, GainsData, SkillsData};
use crate::parsers::{load_bank_export, potion_bank_entries, potion_records};
use crate::report::{ReportData, render_report};
use crate::snapshot::{
    BANK_FILE, BOSSES_FILE, COLLECTION_LOG_FILE, COMBAT_ACHIEVEMENTS_FILE, GAINS_FILE, PETS_FILE,
    POTION_STORAGE_FILE, QUESTS_FILE, SKILLS_FILE, Snapshot, load_snapshot_or_warn, save_snapshot,
};
use serde::Serialize;
use std::path::PathBuf;

pub const BANK_EXPORT_FILE: &str = "bank.txt";
pub const POTION_STORAGE_INPUT: &str = "potion_storage.yaml";
pub const COLLECTION_LOG_INPUT: &str = "collection_log.yaml";
pub const COMBAT_ACHIEVEMENTS_INPUT: &str = "combat_achievements.yaml";
pub const PETS_INPUT: &str = "pets.yaml";
pub const QUESTS_INPUT: &str = "quests.yaml";

/// What a job wrote and which domains it had no data for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub saved: Vec<PathBuf>,
    pub skipped: Vec<&'static str>,
}

impl JobSummary {
    fn save<T: Serialize>(&mut self, config: &TrackerConfig, file: &str, data: T) -> Result<()> {
        let path = config.data_file(file);
        save_snapshot(&path, &Snapshot::new(&config.rsn, data))?;
        self.saved.push(path);
        Ok(())
    }

    fn skip(&mut self, domain: &'static str) {
        tracing::warn!("No {} data, keeping the previous snapshot", domain);
        self.skipped.push(domain);
    }

    fn merge(&mut self, other: JobSummary) {
        self.saved.extend(other.saved);
        self.skipped.extend(other.skipped);
    }
}

/// Treat an unreadable manual input like a missing one.
fn load_input(config: &TrackerConfig, file: &str) -> Option<Checklist> {
    let path = config.data_file(file);
    match load_checklist(&path) {
        Ok(checklist) => checklist,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Skills, bosses, recent gains and the collection log.
pub fn update_stats(config: &TrackerConfig, fetcher: &Fetcher) -> Result<JobSummary> {
    tracing::info!("Updating stats for {}", config.rsn);
    let mut summary = JobSummary::default();

    let official = fetcher.official_hiscores(&config.rsn);
    let temple = fetcher.temple_stats(&config.rsn);

    let skills = merge_skills(official.as_ref(), temple.as_ref());
    if skills.is_empty() {
        summary.skip("skills");
    } else {
        let milestones = calculate_milestones(&skills);
        tracing::info!(
            "Total level {}, combat {:.2}, {} skills at 99",
            milestones.total_level,
            milestones.combat_level,
            milestones.skills_99
        );
        summary.save(config, SKILLS_FILE, SkillsData { skills, milestones })?;
    }

    if official.is_some() || temple.is_some() {
        let bosses = merge_bosses(official.as_ref(), temple.as_ref());
        tracing::info!("{} bosses with kills", bosses.len());
        summary.save(config, BOSSES_FILE, BossesData { bosses })?;
    } else {
        summary.skip("bosses");
    }

    match fetcher.temple_gains(&config.rsn, config.gains_days) {
        Some(gains) => summary.save(
            config,
            GAINS_FILE,
            GainsData {
                period_days: config.gains_days,
                gains,
            },
        )?,
        None => summary.skip("gains"),
    }

    let manual = load_input(config, COLLECTION_LOG_INPUT);
    let fetched = fetcher.temple_collection_log(&config.rsn);
    match merge_collection_log(manual.as_ref(), fetched.as_ref(), config.clog_unique_total) {
        Some(clog) => {
            tracing::info!("Collection log {}/{}", clog.unique_obtained, clog.unique_items);
            summary.save(config, COLLECTION_LOG_FILE, clog)?;
        }
        None => summary.skip("collection log"),
    }

    Ok(summary)
}

/// Bank export and potion storage, valued at current GE prices.
pub fn update_bank(config: &TrackerConfig, fetcher: &Fetcher) -> Result<JobSummary> {
    tracing::info!("Updating bank for {}", config.rsn);
    let mut summary = JobSummary::default();

    let bank_entries = load_bank_export(&config.data_file(BANK_EXPORT_FILE))?;
    let potions = load_input(config, POTION_STORAGE_INPUT).map(|storage| potion_records(&storage));

    if bank_entries.is_none() && potions.is_none() {
        summary.skip("bank");
        return Ok(summary);
    }

    let mut entries = bank_entries.unwrap_or_default();
    if let Some(potions) = potions {
        entries.extend(potion_bank_entries(&potions));
        tracing::info!("{} potions in storage", potions.len());
        summary.save(config, POTION_STORAGE_FILE, potion_storage_data(potions))?;
    }

    let mapping = if entries.iter().any(|e| e.id == 0) {
        fetcher.item_mapping()
    } else {
        Default::default()
    };
    let prices = fetcher.ge_prices();
    if prices.is_empty() {
        tracing::warn!("No GE prices, items will be valued at 0");
    }

    let bank = summarize_bank(value_items(entries, &mapping, &prices), config.top_items);
    tracing::info!("Bank: {} items worth {} gp", bank.total_items, bank.total_value);
    summary.save(config, BANK_FILE, bank)?;

    Ok(summary)
}

/// Combat achievements, pets and quests from their checklist files.
pub fn update_checklists(config: &TrackerConfig) -> Result<JobSummary> {
    tracing::info!("Updating checklists for {}", config.rsn);
    let mut summary = JobSummary::default();

    match load_input(config, COMBAT_ACHIEVEMENTS_INPUT) {
        Some(cl) => {
            let data = summarize_combat_achievements(&cl);
            summary.save(config, COMBAT_ACHIEVEMENTS_FILE, data)?
        }
        None => summary.skip("combat achievements"),
    }
    match load_input(config, PETS_INPUT) {
        Some(cl) => summary.save(config, PETS_FILE, summarize_pets(&cl))?,
        None => summary.skip("pets"),
    }
    match load_input(config, QUESTS_INPUT) {
        Some(cl) => summary.save(config, QUESTS_FILE, summarize_quests(&cl))?,
        None => summary.skip("quests"),
    }

    Ok(summary)
}

/// Gather goals and the saved snapshots for the report.
pub fn load_report_data(config: &TrackerConfig) -> ReportData {
    let goals_path = config.data_file(GOALS_FILE);
    let goals = load_goals(&goals_path).unwrap_or_else(|e| {
        tracing::error!("Failed to read {}: {}", goals_path.display(), e);
        None
    });

    ReportData {
        rsn: config.rsn.clone(),
        goals,
        skills: load_snapshot_or_warn(&config.data_file(SKILLS_FILE)),
        bosses: load_snapshot_or_warn(&config.data_file(BOSSES_FILE)),
        collection_log: load_snapshot_or_warn(&config.data_file(COLLECTION_LOG_FILE)),
        combat_achievements: load_snapshot_or_warn(&config.data_file(COMBAT_ACHIEVEMENTS_FILE)),
        pets: load_snapshot_or_warn(&config.data_file(PETS_FILE)),
        quests: load_snapshot_or_warn(&config.data_file(QUESTS_FILE)),
        bank: load_snapshot_or_warn(&config.data_file(BANK_FILE)),
        potion_storage: load_snapshot_or_warn(&config.data_file(POTION_STORAGE_FILE)),
    }
}

/// Render the report to the configured path.
pub fn render(config: &TrackerConfig) -> Result<PathBuf> {
    let report = render_report(&load_report_data(config));
    let path = config.readme_path.clone();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, report)?;
    tracing::info!("Generated: {}", path.display());
    Ok(path)
}

/// Every update job, then the report. A failing job is logged and the rest still run.
pub fn run_all(config: &TrackerConfig, fetcher: &Fetcher) -> Result<JobSummary> {
    let mut summary = JobSummary::default();

    let jobs: [(&str, Result<JobSummary>); 3] = [
        ("stats", update_stats(config, fetcher)),
        ("bank", update_bank(config, fetcher)),
        ("checklists", update_checklists(config)),
    ];
    for (name, result) in jobs {
        match result {
            Ok(job) => summary.merge(job),
            Err(e) => tracing::error!("Updating {} failed: {}", name, e),
        }
    }

    summary.saved.push(render(config)?);
    Ok(summary)
}
