//! Hand-written goals, read from `goals.yaml`.

use crate::error::Result;
use crate::file_utils::read_optional_utf8;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

pub const GOALS_FILE: &str = "goals.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Free-form progress note such as "45/100".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub short_term: Vec<Goal>,
    #[serde(default)]
    pub long_term: Vec<Goal>,
}

/// Lists as written, before each entry is checked.
#[derive(Debug, Default, Deserialize)]
struct RawGoals {
    #[serde(default)]
    short_term: Vec<Value>,
    #[serde(default)]
    long_term: Vec<Value>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A bare string is a goal description; a mapping needs a `description`.
fn goal_from_value(value: &Value) -> Option<Goal> {
    let description = match value {
        Value::Mapping(_) => value.get("description").and_then(scalar_text),
        other => scalar_text(other),
    }
    .filter(|d| !d.is_empty())?;

    Some(Goal {
        description,
        completed: value.get("completed").and_then(Value::as_bool).unwrap_or(false),
        progress: value.get("progress").and_then(scalar_text),
    })
}

fn goal_list(section: &str, values: &[Value]) -> Vec<Goal> {
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| {
            let goal = goal_from_value(v);
            if goal.is_none() {
                tracing::debug!("{}[{}]: not a goal, skipped", section, idx);
            }
            goal
        })
        .collect()
}

impl Goals {
    /// Parse `goals.yaml`. Entries without a description are skipped.
    pub fn from_str(content: &str) -> Result<Self> {
        // An empty document deserializes to null.
        let raw: Option<RawGoals> = serde_yaml::from_str(content)?;
        let raw = raw.unwrap_or_default();
        Ok(Self {
            short_term: goal_list("short_term", &raw.short_term),
            long_term: goal_list("long_term", &raw.long_term),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.short_term.is_empty() && self.long_term.is_empty()
    }
}

/// Load goals. A missing file means no goals set.
pub fn load_goals(path: &Path) -> Result<Option<Goals>> {
    read_optional_utf8(path)?
        .map(|content| Goals::from_str(&content))
        .transpose()
}
