use crate::dates::parse_calendar_date;
use chrono::{NaiveDate, TimeDelta};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Relative day words accepted wherever a date is typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Today,
    Yesterday,
    Tomorrow,
}

impl Keyword {
    fn offset_days(self) -> i64 {
        match self {
            Keyword::Today => 0,
            Keyword::Yesterday => -1,
            Keyword::Tomorrow => 1,
        }
    }
}

pub struct Keywords;

impl Keywords {
    /// Global registry (lowercased input → keyword), seeded with the canonical
    /// words and extended once at startup with the `[synonyms]` config table.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let m = Keyword::iter()
                .map(|k| (k.as_ref().to_string(), k))
                .collect();
            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Adds `(alias, target)` synonyms. Pairs whose target is unknown are ignored.
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = match Self::registry().write() {
            Ok(reg) => reg,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        Keyword::iter().any(|key| key.as_ref() == word.to_ascii_lowercase())
    }

    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = match Self::registry().read() {
            Ok(reg) => reg,
            Err(poisoned) => poisoned.into_inner(),
        };
        reg.get(&input.trim().to_ascii_lowercase()).copied()
    }

    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input) == Some(keyword)
    }
}

/// Turns user input (`today`, a synonym, or an ISO date) into a calendar date.
pub fn parse_date_input(input: &str, reference_date: NaiveDate) -> Option<NaiveDate> {
    match Keywords::lookup(input) {
        Some(keyword) => reference_date.checked_add_signed(TimeDelta::days(keyword.offset_days())),
        None => parse_calendar_date(input),
    }
}
