//! Parser for the two-level checklist files kept by hand in the data directory.
//!
//! ```text
//! # comments and blank lines are ignored
//! Bosses:
//!   Abyssal Sire:
//!     - [x] Unsired | 2024-01-15
//!     - [ ] Abyssal orphan
//!   Vorkath: []
//! Potions:
//!   Prayer potion(4): 120
//! ```
//!
//! Unindented `key:` lines open a section, indented `key:` lines open a named
//! list inside it (`key: []` is an explicitly empty list, `key: 120` a numeric
//! value). `- ` lines are items: an optional `[x]`/`[ ]` checkbox, the name, an
//! optional `| date` and an optional `| points`. A dated item counts as done.

use crate::error::Result;
use crate::file_utils::read_optional_utf8;
use chrono::NaiveDate;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub name: String,
    pub done: bool,
    pub date: Option<String>,
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistList {
    pub name: String,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSection {
    pub name: String,
    pub lists: Vec<ChecklistList>,
    /// `key: number` lines, in file order.
    pub values: Vec<(String, u64)>,
}

impl ChecklistSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lists: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn list(&self, name: &str) -> Option<&ChecklistList> {
        self.lists.iter().find(|l| l.name == name)
    }
}

/// An item together with the section and list it was listed under.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistEntry<'a> {
    pub section: &'a str,
    pub list: &'a str,
    pub item: &'a ChecklistItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    pub sections: Vec<ChecklistSection>,
}

impl Checklist {
    /// Parse checklist text. Lines that don't fit the format are skipped.
    pub fn parse(content: &str) -> Self {
        let mut sections: Vec<ChecklistSection> = Vec::new();
        // Index of the open list in the last section, if any.
        let mut open_list: Option<usize> = None;

        for (line_no, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let item_text = trimmed
                .strip_prefix("- ")
                .or_else(|| (trimmed == "-").then_some(""));
            if let Some(rest) = item_text {
                let (Some(section), Some(idx)) = (sections.last_mut(), open_list) else {
                    tracing::debug!("line {}: item outside of a list, skipped", line_no + 1);
                    continue;
                };
                match parse_item(rest) {
                    Some(item) => section.lists[idx].items.push(item),
                    None => tracing::debug!("line {}: empty item, skipped", line_no + 1),
                }
                continue;
            }

            let Some((key, value)) = trimmed.rsplit_once(':') else {
                tracing::debug!("line {}: unrecognized line, skipped", line_no + 1);
                continue;
            };
            let key = unquote(key.trim());
            let value = value.trim();
            if key.is_empty() {
                continue;
            }

            let indented = line.len() != trimmed.len();
            if !indented {
                if value.is_empty() {
                    sections.push(ChecklistSection::new(key));
                    open_list = None;
                } else {
                    tracing::debug!("line {}: top-level value, skipped", line_no + 1);
                }
                continue;
            }

            let Some(section) = sections.last_mut() else {
                tracing::debug!("line {}: key outside of a section, skipped", line_no + 1);
                continue;
            };

            match value {
                "" | "[]" => {
                    section.lists.push(ChecklistList {
                        name: key.to_string(),
                        items: Vec::new(),
                    });
                    // An explicitly empty list takes no items.
                    open_list = (value.is_empty()).then(|| section.lists.len() - 1);
                }
                number => {
                    open_list = None;
                    match number.replace(',', "").parse::<u64>() {
                        Ok(n) => section.values.push((key.to_string(), n)),
                        Err(_) => tracing::debug!(
                            "line {}: malformed number {:?} for {}, dropped",
                            line_no + 1,
                            number,
                            key
                        ),
                    }
                }
            }
        }

        Self { sections }
    }

    pub fn section(&self, name: &str) -> Option<&ChecklistSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Every item in file order with its section and list names.
    pub fn entries(&self) -> impl Iterator<Item = ChecklistEntry<'_>> {
        self.sections.iter().flat_map(|section| {
            section.lists.iter().flat_map(move |list| {
                list.items.iter().map(move |item| ChecklistEntry {
                    section: &section.name,
                    list: &list.name,
                    item,
                })
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Load a checklist file. A missing file means no data yet.
pub fn load_checklist(path: &Path) -> Result<Option<Checklist>> {
    Ok(read_optional_utf8(path)?.map(|content| Checklist::parse(&content)))
}

/// Done items that carry a date, newest first, at most `limit` of them.
pub fn recent_items<'a, I>(entries: I, limit: usize) -> Vec<ChecklistEntry<'a>>
where
    I: IntoIterator<Item = ChecklistEntry<'a>>,
{
    let mut dated: Vec<ChecklistEntry<'a>> = entries
        .into_iter()
        .filter(|e| e.item.done && e.item.date.is_some())
        .collect();
    // Stable sort keeps file order among items from the same day.
    dated.sort_by(|a, b| b.item.date.cmp(&a.item.date));
    dated.truncate(limit);
    dated
}

fn parse_item(text: &str) -> Option<ChecklistItem> {
    let mut fields = text.split('|').map(str::trim);
    let head = fields.next().unwrap_or_default();

    let checked_rest = head.strip_prefix("[x]").or_else(|| head.strip_prefix("[X]"));
    let (checked, name) = if let Some(rest) = checked_rest {
        (true, rest.trim())
    } else if let Some(rest) = head.strip_prefix("[ ]") {
        (false, rest.trim())
    } else {
        (false, head)
    };
    let name = unquote(name);
    if name.is_empty() {
        return None;
    }

    let date_field = fields.next().filter(|d| !d.is_empty());
    let date = date_field.and_then(|d| match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
        Ok(parsed) => Some(parsed.format("%Y-%m-%d").to_string()),
        Err(_) => {
            tracing::debug!("Unparseable date {:?} on {}, dropped", d, name);
            None
        }
    });
    let points = fields.next().and_then(|p| p.parse::<u32>().ok());

    Some(ChecklistItem {
        name: name.to_string(),
        done: checked || date.is_some(),
        date,
        points,
    })
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Collection log
Bosses:
  Abyssal Sire:
    - [x] Unsired | 2024-01-15
    - [ ] Abyssal orphan
    - Bludgeon claw
  Vorkath: []

Raids:
  Chambers of Xeric: Challenge Mode:
    - Twisted bow | 2023-11-02
    - [x] Olmlet
"#;

    #[test]
    fn test_parse_sections_and_lists() {
        let cl = Checklist::parse(SAMPLE);
        assert_eq!(cl.sections.len(), 2);

        let bosses = cl.section("Bosses").unwrap();
        assert_eq!(bosses.lists.len(), 2);
        let sire = bosses.list("Abyssal Sire").unwrap();
        assert_eq!(sire.items.len(), 3);
        assert_eq!(sire.items[0].name, "Unsired");
        assert!(sire.items[0].done);
        assert_eq!(sire.items[0].date.as_deref(), Some("2024-01-15"));
        assert!(!sire.items[1].done);
        assert!(!sire.items[2].done);
        assert_eq!(sire.items[2].date, None);

        let raids = cl.section("Raids").unwrap();
        assert_eq!(raids.lists[0].name, "Chambers of Xeric: Challenge Mode");
    }

    #[test]
    fn test_explicit_empty_list() {
        let cl = Checklist::parse("Bosses:\n  Vorkath: []\n    - Vorki\n");
        let vorkath = cl.section("Bosses").unwrap().list("Vorkath").unwrap();
        assert!(vorkath.items.is_empty());
    }

    #[test]
    fn test_dated_item_counts_as_done() {
        let cl = Checklist::parse(SAMPLE);
        let raids = cl.section("Raids").unwrap();
        assert!(raids.lists[0].items[0].done);
        assert!(raids.lists[0].items[1].done);
        assert_eq!(raids.lists[0].items[1].date, None);
    }

    #[test]
    fn test_malformed_date_is_ignored() {
        let cl = Checklist::parse("Pets:\n  Boss:\n    - [ ] Olmlet | tbd\n    - Vorki | soon\n");
        let items = &cl.sections[0].lists[0].items;
        assert!(!items[0].done);
        assert_eq!(items[0].date, None);
        assert!(!items[1].done);
    }

    #[test]
    fn test_numeric_values_and_malformed_numbers() {
        let content = "Potions:\n  Prayer potion(4): 120\n  Super restore(3): lots\n  Ranging potion(2): 1,024\n";
        let cl = Checklist::parse(content);
        let potions = cl.section("Potions").unwrap();
        assert_eq!(
            potions.values,
            vec![
                ("Prayer potion(4)".to_string(), 120),
                ("Ranging potion(2)".to_string(), 1024),
            ]
        );
    }

    #[test]
    fn test_points_and_bad_points() {
        let content = "Quests:\n  Free:\n    - [x] Dragon Slayer I | 2024-02-01 | 2\n    - [x] Cook's Assistant | | one\n";
        let cl = Checklist::parse(content);
        let items = &cl.section("Quests").unwrap().lists[0].items;
        assert_eq!(items[0].points, Some(2));
        assert!(items[1].done);
        assert_eq!(items[1].date, None);
        assert_eq!(items[1].points, None);
    }

    #[test]
    fn test_stray_lines_are_skipped() {
        let content = "- orphan item\n  orphan list:\nBosses:\n  - no list yet\n  Obor:\n    - Hill giant club\nnonsense line\n";
        let cl = Checklist::parse(content);
        let entries: Vec<_> = cl.entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.name, "Hill giant club");
        assert_eq!(entries[0].section, "Bosses");
        assert_eq!(entries[0].list, "Obor");
    }

    #[test]
    fn test_recent_items_orders_dated_and_skips_undated() {
        let content = "Bosses:\n  Sire:\n    - [x] Unsired\n    - Abyssal dagger | 2024-01-15\n  Obor:\n    - Hill giant club | 2023-06-30\n";
        let cl = Checklist::parse(content);
        let recent = recent_items(cl.entries(), 10);
        let names: Vec<&str> = recent.iter().map(|e| e.item.name.as_str()).collect();
        assert_eq!(names, vec!["Abyssal dagger", "Hill giant club"]);
    }

    #[test]
    fn test_recent_items_limit() {
        let cl = Checklist::parse(SAMPLE);
        assert_eq!(recent_items(cl.entries(), 1).len(), 1);
        assert_eq!(recent_items(cl.entries(), 1)[0].item.name, "Unsired");
    }

    #[test]
    fn test_load_missing_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_checklist(&dir.path().join("pets.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.yaml");
        std::fs::write(&path, "Pets:\n  Boss:\n    - Vorki | 2024-03-03\n").unwrap();
        let cl = load_checklist(&path).unwrap().unwrap();
        assert_eq!(cl.entries().count(), 1);
    }
}
