//! Tracker configuration, optionally loaded from a TOML file.

use crate::error::{Result, TrackerError};
use crate::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, Endpoints};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_RSN: &str = "FoolinSlays";

/// Collection log slots in the game, used when no source reports a total.
pub const DEFAULT_CLOG_UNIQUE_TOTAL: u32 = 1615;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub rsn: String,
    pub data_dir: PathBuf,
    pub readme_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub gains_days: u32,
    pub clog_unique_total: u32,
    pub top_items: usize,
    pub endpoints: Endpoints,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            rsn: DEFAULT_RSN.to_string(),
            data_dir: PathBuf::from("data"),
            readme_path: PathBuf::from("README.md"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            gains_days: 30,
            clog_unique_total: DEFAULT_CLOG_UNIQUE_TOTAL,
            top_items: 10,
            endpoints: Endpoints::default(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config from {:?}: {}", path, e),
            ))
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rsn.trim().is_empty() {
            return Err(TrackerError::Config("rsn must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(TrackerError::Config("timeout_secs must be positive".to_string()));
        }
        if self.gains_days == 0 {
            return Err(TrackerError::Config("gains_days must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path of a file inside the data directory.
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = TrackerConfig::from_str("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.rsn, "FoolinSlays");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.data_file("bank.txt"), PathBuf::from("data/bank.txt"));
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
rsn = "Iron Someone"
clog_unique_total = 1700

[endpoints]
hiscores = "http://localhost:8080/hiscores"
"#;
        let config = TrackerConfig::from_str(toml).unwrap();
        assert_eq!(config.rsn, "Iron Someone");
        assert_eq!(config.clog_unique_total, 1700);
        assert_eq!(config.endpoints.hiscores, "http://localhost:8080/hiscores");
        assert_eq!(config.endpoints.ge_prices, Endpoints::default().ge_prices);
        assert_eq!(config.top_items, 10);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            TrackerConfig::from_str("rsn = \"  \""),
            Err(TrackerError::Config(_))
        ));
        assert!(matches!(
            TrackerConfig::from_str("timeout_secs = \"thirty\""),
            Err(TrackerError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ironlog.toml");
        std::fs::write(&path, "gains_days = 7\n").unwrap();
        assert_eq!(TrackerConfig::from_file(&path).unwrap().gains_days, 7);
        assert!(TrackerConfig::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
