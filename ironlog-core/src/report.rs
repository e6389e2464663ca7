//! Markdown progress report rendered from the saved snapshots.

use crate::format::{format_number, format_rank, format_thousands, percent};
use crate::goals::{Goal, Goals};
use crate::models::{
    BankData, BossesData, CollectionLogData, CombatAchievementsData, OVERALL, PetsData,
    PotionStorageData, QuestsData, RecentItem, SkillsData,
};
use crate::snapshot::{
    BankSnapshot, BossesSnapshot, CollectionLogSnapshot, CombatAchievementsSnapshot, PetsSnapshot,
    PotionStorageSnapshot, QuestsSnapshot, SkillsSnapshot,
};
use chrono::DateTime;

/// Everything the report shows. Absent parts render a placeholder.
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    pub rsn: String,
    pub goals: Option<Goals>,
    pub skills: Option<SkillsSnapshot>,
    pub bosses: Option<BossesSnapshot>,
    pub collection_log: Option<CollectionLogSnapshot>,
    pub combat_achievements: Option<CombatAchievementsSnapshot>,
    pub pets: Option<PetsSnapshot>,
    pub quests: Option<QuestsSnapshot>,
    pub bank: Option<BankSnapshot>,
    pub potion_storage: Option<PotionStorageSnapshot>,
}

impl ReportData {
    /// Newest `updated` stamp over all loaded snapshots.
    pub fn last_update(&self) -> Option<&str> {
        [
            self.skills.as_ref().map(|s| s.updated.as_str()),
            self.bosses.as_ref().map(|s| s.updated.as_str()),
            self.collection_log.as_ref().map(|s| s.updated.as_str()),
            self.combat_achievements.as_ref().map(|s| s.updated.as_str()),
            self.pets.as_ref().map(|s| s.updated.as_str()),
            self.quests.as_ref().map(|s| s.updated.as_str()),
            self.bank.as_ref().map(|s| s.updated.as_str()),
            self.potion_storage.as_ref().map(|s| s.updated.as_str()),
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

fn display_time(stamp: Option<&str>) -> String {
    match stamp {
        None => "Never".to_string(),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|_| s.to_string()),
    }
}

fn placeholder(what: &str, hint: &str) -> String {
    format!("*No {what} available yet. {hint}*\n")
}

fn recent_list(items: &[RecentItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!("- {} **{}** ({})\n", item.date, item.name, item.group));
    }
    out
}

fn goal_line(goal: &Goal) -> String {
    let status = if goal.completed { "[x]" } else { "[ ]" };
    match goal.progress.as_deref().filter(|p| !p.is_empty()) {
        Some(progress) => format!("- {} {} ({})\n", status, goal.description, progress),
        None => format!("- {} {}\n", status, goal.description),
    }
}

fn goals_section(goals: Option<&Goals>) -> String {
    let Some(goals) = goals.filter(|g| !g.is_empty()) else {
        return "*No goals set yet. Edit `data/goals.yaml` to add some.*\n".to_string();
    };

    let mut out = String::new();
    let lists = [("Short-Term Goals", &goals.short_term), ("Long-Term Goals", &goals.long_term)];
    for (title, list) in lists {
        if list.is_empty() {
            continue;
        }
        out.push_str(&format!("### {}\n", title));
        for goal in list {
            out.push_str(&goal_line(goal));
        }
        out.push('\n');
    }
    out
}

fn skills_section(data: Option<&SkillsData>) -> String {
    let Some(data) = data.filter(|d| !d.skills.is_empty()) else {
        return placeholder("skills data", "Run `ironlog update-stats`.");
    };
    let m = &data.milestones;

    let mut out = String::new();
    out.push_str("### Summary\n| Stat | Value |\n|------|-------|\n");
    let total_level = format_thousands(u64::from(m.total_level));
    out.push_str(&format!("| Total Level | **{}** |\n", total_level));
    out.push_str(&format!("| Total XP | **{}** |\n", format_number(m.total_xp)));
    out.push_str(&format!("| Combat Level | **{:.2}** |\n", m.combat_level));
    out.push_str(&format!("| 99s | **{}/{}** |\n", m.skills_99, m.num_skills));
    out.push_str(&format!("| 90+ Skills | **{}/{}** |\n", m.skills_90, m.num_skills));
    out.push_str(&format!("| Maxed | **{}** |\n", if m.maxed { "Yes" } else { "No" }));

    out.push_str(&milestones_table(data));

    let mut ordered: Vec<_> = data.skills.iter().filter(|s| s.name != OVERALL).collect();
    ordered.sort_by(|a, b| b.xp.cmp(&a.xp));
    if let Some(overall) = data.skills.iter().find(|s| s.name == OVERALL) {
        ordered.insert(0, overall);
    }

    out.push_str("\n### All Skills\n| Skill | Level | XP | Rank | Progress | EHP |\n");
    out.push_str("|-------|-------|-----|------|----------|-----|\n");
    for skill in ordered {
        let level = if skill.name != OVERALL && skill.level >= 99 {
            format!("**{}**", skill.level)
        } else {
            skill.level.to_string()
        };
        let progress =
            skill.progress.map(|p| format!("{:.1}%", p)).unwrap_or_else(|| "-".to_string());
        let ehp = skill.ehp.map(|e| format!("{:.1}", e)).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            skill.name,
            level,
            format_number(skill.xp),
            format_rank(skill.rank),
            progress,
            ehp
        ));
    }
    out
}

/// Total level in steps of 100 up to the max total, and which skills are at 99.
fn milestones_table(data: &SkillsData) -> String {
    let m = &data.milestones;
    let max_total = m.num_skills * 99;
    let steps = max_total / 100;
    let reached = (m.total_level / 100).min(steps);
    let next = if m.total_level >= max_total {
        "maxed".to_string()
    } else if reached == steps {
        format!("next: {}", format_thousands(u64::from(max_total)))
    } else {
        format!("next: {}", format_thousands(u64::from((reached + 1) * 100)))
    };

    let maxed: Vec<&str> = data
        .skills
        .iter()
        .filter(|s| s.name != OVERALL && s.level >= 99)
        .map(|s| s.name.as_str())
        .collect();
    let maxed = if maxed.is_empty() { "None yet".to_string() } else { maxed.join(", ") };

    let mut out = String::from("\n### Milestones\n| Milestone | Progress |\n");
    out.push_str("|-----------|----------|\n");
    out.push_str(&format!("| Total level steps | {}/{} ({}) |\n", reached, steps, next));
    out.push_str(&format!(
        "| Max total | {}/{} ({:.1}%) |\n",
        format_thousands(u64::from(m.total_level)),
        format_thousands(u64::from(max_total)),
        percent(u64::from(m.total_level), u64::from(max_total))
    ));
    out.push_str(&format!("| Skills at 99 | {} |\n", maxed));
    out
}

fn bosses_section(data: Option<&BossesData>) -> String {
    let Some(data) = data else {
        return placeholder("boss data", "Run `ironlog update-stats`.");
    };
    let mut active: Vec<_> = data.bosses.iter().filter(|b| b.killcount > 0).collect();
    if active.is_empty() {
        return "*No boss kills recorded yet.*\n".to_string();
    }
    active.sort_by(|a, b| b.killcount.cmp(&a.killcount).then_with(|| a.name.cmp(&b.name)));

    let mut out = format!("*Showing {} bosses with kills*\n\n", active.len());
    out.push_str("| Boss | KC | Rank | EHB |\n|------|-----|------|-----|\n");
    for boss in active {
        let ehb = boss.ehb.map(|e| format!("{:.1}", e)).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            boss.name,
            format_thousands(boss.killcount),
            format_rank(boss.rank),
            ehb
        ));
    }
    out
}

fn collection_log_section(data: Option<&CollectionLogData>) -> String {
    let Some(clog) = data else {
        return placeholder(
            "collection log data",
            "Keep `data/collection_log.yaml` or sync the TempleOSRS RuneLite plugin.",
        );
    };

    let mut out = String::from("| Metric | Progress |\n|--------|----------|\n");
    out.push_str(&format!(
        "| Unique Items | **{}** / {} ({:.1}%) |\n",
        format_thousands(u64::from(clog.unique_obtained)),
        format_thousands(u64::from(clog.unique_items)),
        percent(u64::from(clog.unique_obtained), u64::from(clog.unique_items))
    ));
    out.push_str(&format!("| Rank | **{}** |\n", format_rank(clog.rank)));

    if !clog.categories.is_empty() {
        out.push_str("\n### Categories\n| Category | Obtained | Total | % |\n");
        out.push_str("|----------|----------|-------|---|\n");
        for (name, c) in &clog.categories {
            out.push_str(&format!(
                "| {} | {} | {} | {:.0}% |\n",
                name,
                c.obtained,
                c.total,
                percent(u64::from(c.obtained), u64::from(c.total))
            ));
        }
    }

    if !clog.recent_items.is_empty() {
        out.push_str("\n### Recently Obtained\n");
        out.push_str(&recent_list(&clog.recent_items));
    }
    out
}

fn combat_achievements_section(data: Option<&CombatAchievementsData>) -> String {
    let Some(ca) = data else {
        return placeholder("combat achievement data", "Edit `data/combat_achievements.yaml`.");
    };

    let mut out = format!(
        "**{}/{}** tasks completed, **{}** points\n\n",
        ca.completed, ca.total, ca.points
    );
    if !ca.tiers.is_empty() {
        out.push_str("| Tier | Completed | Points |\n|------|-----------|--------|\n");
        for tier in &ca.tiers {
            out.push_str(&format!(
                "| {} | {}/{} | {}/{} |\n",
                tier.tier, tier.completed, tier.total, tier.points, tier.total_points
            ));
        }
    }
    if !ca.recent.is_empty() {
        out.push_str("\n### Recently Completed\n");
        out.push_str(&recent_list(&ca.recent));
    }
    out
}

fn pets_section(data: Option<&PetsData>) -> String {
    let Some(pets) = data else {
        return placeholder("pet data", "Edit `data/pets.yaml`.");
    };

    let mut out = format!("**{}/{}** pets obtained\n", pets.obtained, pets.total);
    let obtained: Vec<_> = pets.pets.iter().filter(|p| p.obtained).collect();
    if !obtained.is_empty() {
        out.push('\n');
        for pet in obtained {
            match &pet.date {
                Some(date) => out.push_str(&format!("- {} ({})\n", pet.name, date)),
                None => out.push_str(&format!("- {}\n", pet.name)),
            }
        }
    }
    out
}

fn quests_section(data: Option<&QuestsData>) -> String {
    let Some(quests) = data else {
        return placeholder("quest data", "Edit `data/quests.yaml`.");
    };
    format!(
        "**{}/{}** quests completed ({:.1}%), **{}** quest points\n",
        quests.completed,
        quests.total,
        percent(u64::from(quests.completed), u64::from(quests.total)),
        quests.quest_points
    )
}

fn bank_section(bank: Option<&BankData>, potions: Option<&PotionStorageData>) -> String {
    let Some(bank) = bank else {
        return placeholder(
            "bank data",
            "Export your bank to `data/bank.txt` and run `ironlog update-bank`.",
        );
    };

    let mut out = format!(
        "**Total value:** {} gp ({} gp)\n\n**Items:** {} stacks, {} total quantity\n",
        format_number(bank.total_value),
        format_thousands(bank.total_value),
        format_thousands(bank.total_items as u64),
        format_thousands(bank.total_quantity)
    );
    if let Some(potions) = potions {
        out.push_str(&format!(
            "\n**Potion storage:** {} doses across {} potions\n",
            format_thousands(potions.total_doses),
            potions.potions.len()
        ));
    }

    if !bank.categories.is_empty() {
        let mut categories: Vec<_> = bank.categories.iter().collect();
        categories.sort_by(|a, b| b.1.value.cmp(&a.1.value).then_with(|| a.0.cmp(b.0)));
        out.push_str("\n### Categories\n| Category | Items | Value |\n");
        out.push_str("|----------|-------|-------|\n");
        for (name, c) in categories {
            out.push_str(&format!("| {} | {} | {} |\n", name, c.count, format_number(c.value)));
        }
    }

    if !bank.top_items.is_empty() {
        out.push_str("\n### Most Valuable Items\n| Item | Quantity | Value |\n");
        out.push_str("|------|----------|-------|\n");
        for item in &bank.top_items {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                item.name,
                format_thousands(item.quantity),
                format_number(item.total_value)
            ));
        }
    }
    out
}

/// Render the full report. Output depends only on `data`.
pub fn render_report(data: &ReportData) -> String {
    let rsn = &data.rsn;
    let profile = rsn.replace(' ', "+");
    let last_update = display_time(data.last_update());

    let sections = [
        ("Goals", goals_section(data.goals.as_ref())),
        ("Skills", skills_section(data.skills.as_ref().map(|s| &s.data))),
        ("Boss Kills", bosses_section(data.bosses.as_ref().map(|s| &s.data))),
        ("Collection Log", collection_log_section(data.collection_log.as_ref().map(|s| &s.data))),
        (
            "Combat Achievements",
            combat_achievements_section(data.combat_achievements.as_ref().map(|s| &s.data)),
        ),
        ("Pets", pets_section(data.pets.as_ref().map(|s| &s.data))),
        ("Quests", quests_section(data.quests.as_ref().map(|s| &s.data))),
        (
            "Bank",
            bank_section(
                data.bank.as_ref().map(|s| &s.data),
                data.potion_storage.as_ref().map(|s| &s.data),
            ),
        ),
    ];

    let mut out = format!("# {} - Ironman Progression Tracker\n\n", rsn);
    out.push_str(&format!("*Last updated: {}*\n\n", last_update));
    out.push_str(&format!(
        "Progress tracked from [TempleOSRS](https://templeosrs.com/player/overview.php?player={}) \
         and the official hiscores.\n",
        profile
    ));

    for (title, body) in sections {
        out.push_str(&format!("\n---\n\n## {}\n\n{}", title, body));
    }

    out.push_str("\n---\n\n## Links\n\n");
    out.push_str(&format!(
        "- [TempleOSRS Profile](https://templeosrs.com/player/overview.php?player={})\n",
        profile
    ));
    out.push_str(&format!(
        "- [Official Hiscores](https://secure.runescape.com/m=hiscore_oldschool_ironman/hiscorepersonal?user1={})\n",
        profile
    ));
    out
}
