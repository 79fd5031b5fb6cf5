use crate::Config;
use crate::tone::{DEFAULT_BASE_TINT, DEFAULT_TONE_MIX};
use crate::view::ViewSettings;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(tmp_dir: PathBuf, reference_date: NaiveDate) -> Config {
    Config {
        gallery_dir: tmp_dir.clone(),
        state_dir: tmp_dir,
        relationship_start: NaiveDate::from_ymd_opt(2009, 12, 10).expect("valid date"),
        project_start: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
        empty_future_start: NaiveDate::from_ymd_opt(2025, 12, 25).expect("valid date"),
        gated_numbering: false,
        base_tint: DEFAULT_BASE_TINT,
        tone_mix: DEFAULT_TONE_MIX,
        reference_date,
    }
}

/// `ViewSettings` derived from [`mk_config`], with `today` as the reference date.
pub fn mk_settings(today: NaiveDate) -> ViewSettings {
    ViewSettings::from(&mk_config(PathBuf::from("/nonexistent"), today))
}
