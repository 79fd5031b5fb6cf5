use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::keywords::Keywords;
use crate::numbering::NumberingScheme;
use crate::tone::{DEFAULT_BASE_TINT, DEFAULT_TONE_MIX, Rgb};

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `data.json`, the optional `data.js` and `images/`.
    pub gallery_dir: PathBuf,
    /// Directory for the small persisted state file (`state.json`).
    pub state_dir: PathBuf,
    /// "Day 1" of the relationship counter.
    pub relationship_start: NaiveDate,
    /// First day of the public numbering and epoch for repaired dates.
    pub project_start: NaiveDate,
    /// Empty days on or after this date read as "still to come" rather than "past".
    pub empty_future_start: NaiveDate,
    /// Number entries by days since `project_start` once that day has arrived.
    pub gated_numbering: bool,
    /// Background colour the extracted tone is blended toward.
    pub base_tint: Rgb,
    /// Share of the base tint in the blend, 0..=1.
    pub tone_mix: f64,
    /// The date treated as "today". Overridable for testing and previews.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    gallery_dir: Option<PathBuf>,
    relationship_start: Option<NaiveDate>,
    project_start: Option<NaiveDate>,
    empty_future_start: Option<NaiveDate>,
    gated_numbering: Option<bool>,
    base_tint: Option<String>,
    tone_mix: Option<f64>,
    /// Optional table:
    /// [synonyms]
    /// ytd = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global keyword registry with user-defined synonyms.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        Self::load_synonyms(&file_config.synonyms);

        let base_tint = file_config
            .base_tint
            .as_deref()
            .and_then(Rgb::from_hex)
            .unwrap_or(DEFAULT_BASE_TINT);
        let tone_mix = file_config
            .tone_mix
            .filter(|ratio| (0.0..=1.0).contains(ratio))
            .unwrap_or(DEFAULT_TONE_MIX);

        Self {
            gallery_dir: file_config
                .gallery_dir
                .unwrap_or_else(Self::default_data_dir),
            state_dir: Self::default_data_dir(),
            relationship_start: file_config
                .relationship_start
                .unwrap_or_else(default_relationship_start),
            project_start: file_config
                .project_start
                .unwrap_or_else(default_project_start),
            empty_future_start: file_config
                .empty_future_start
                .unwrap_or_else(default_empty_future_start),
            gated_numbering: file_config.gated_numbering.unwrap_or(false),
            base_tint,
            tone_mix,
            reference_date: Local::now().date_naive(),
        }
    }

    pub fn numbering_scheme(&self) -> NumberingScheme {
        if self.gated_numbering {
            NumberingScheme::ProjectDay {
                start: self.project_start,
            }
        } else {
            NumberingScheme::Rank
        }
    }

    /// Default data root: `{data_dir}/keepsake`
    /// - macOS:   `~/Library/Application Support/keepsake`
    /// - Linux:   `$XDG_DATA_HOME/keepsake` or `~/.local/share/keepsake`
    /// - Windows: `%APPDATA%\keepsake`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("keepsake")
        } else {
            PathBuf::from("./keepsake")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(
                b.home_dir()
                    .join(".config")
                    .join("keepsake")
                    .join("config.toml"),
            );
            v.push(b.config_dir().join("keepsake").join("config.toml"));
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            log::debug!("loaded config from {}", path.display());
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global keyword registry, skipping aliases
    /// that would shadow a canonical word.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        if let Some(map) = synonyms {
            let pairs: Vec<(String, String)> = map
                .iter()
                .filter(|(alias, _)| !Keywords::is_canonical(alias))
                .map(|(a, t)| (a.clone(), t.clone()))
                .collect();
            if !pairs.is_empty() {
                Keywords::extend(&pairs);
            }
        }
    }
}

fn default_relationship_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2009, 12, 10).expect("valid date")
}

fn default_project_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
}

fn default_empty_future_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 25).expect("valid date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Keyword;
    use crate::tests::mk_config;
    use crate::view::ViewSettings;
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("keepsake")
                .join("config.toml");
            let expected_native = b.config_dir().join("keepsake").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert_eq!(config.relationship_start, default_relationship_start());
        assert_eq!(config.project_start, default_project_start());
        assert_eq!(config.empty_future_start, default_empty_future_start());
        assert_eq!(config.base_tint, DEFAULT_BASE_TINT);
        assert_eq!(config.tone_mix, DEFAULT_TONE_MIX);
        assert!(!config.gated_numbering);
        assert_eq!(config.numbering_scheme(), NumberingScheme::Rank);
    }

    #[test]
    fn parse_file_reads_dates_tint_and_dir() {
        let toml = r##"
            gallery_dir = "/tmp/my-gallery"
            relationship_start = "2010-02-14"
            gated_numbering = true
            base_tint = "#102030"
            tone_mix = 0.4
        "##;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(config.gallery_dir, Path::new("/tmp/my-gallery"));
        assert_eq!(
            config.relationship_start,
            NaiveDate::from_ymd_opt(2010, 2, 14).unwrap()
        );
        assert_eq!(config.base_tint, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(config.tone_mix, 0.4);
        assert_eq!(
            config.numbering_scheme(),
            NumberingScheme::ProjectDay {
                start: default_project_start()
            }
        );
    }

    #[test]
    fn invalid_tint_and_ratio_fall_back() {
        let toml = r#"
            base_tint = "purple"
            tone_mix = 3.0
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(config.base_tint, DEFAULT_BASE_TINT);
        assert_eq!(config.tone_mix, DEFAULT_TONE_MIX);
    }

    #[test]
    fn view_settings_follow_config() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut config = mk_config(PathBuf::from("/nonexistent"), today);
        let settings = ViewSettings::from(&config);
        assert_eq!(settings.today, today);
        assert_eq!(settings.numbering, NumberingScheme::Rank);
        assert_eq!(settings.project_start, config.project_start);

        config.gated_numbering = true;
        assert_eq!(
            ViewSettings::from(&config).numbering,
            NumberingScheme::ProjectDay {
                start: config.project_start
            }
        );
    }

    #[test]
    fn synonyms_extend_registry_but_not_canonical_words() {
        let toml = r#"
            [synonyms]
            today = "yesterday"
            ayer = "yesterday"
        "#;
        Config::from_file_config(Config::parse_file(toml).unwrap());
        assert!(Keywords::matches(Keyword::Yesterday, "ayer"));
        assert!(!Keywords::matches(Keyword::Yesterday, "today"));
    }
}
