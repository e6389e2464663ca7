//! Core library for the ironlog account progress tracker.

pub mod bank;
pub mod categorize;
pub mod checklist;
pub mod config;
pub mod error;
pub mod fetch;
pub mod file_utils;
pub mod format;
pub mod goals;
pub mod merge;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod snapshot;
pub mod xp;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use fetch::Fetcher;
pub use pipeline::{JobSummary, render, run_all, update_bank, update_checklists, update_stats};
