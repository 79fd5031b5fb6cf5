use crate::error::GalleryResult;
use crate::storage::{KeyValueStore, StorageKey};
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Colour theme of the gallery, one per season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Meteorological season: Mar-May spring, Jun-Aug summer,
    /// Sep-Nov autumn, Dec-Feb winter.
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

/// The stored theme if the user picked one, otherwise today's season.
///
/// The seasonal default is not written back, so it keeps following the
/// calendar until the user chooses explicitly.
pub fn active_theme(store: &dyn KeyValueStore, today: NaiveDate) -> Season {
    store
        .get(StorageKey::Theme)
        .and_then(|value| Season::from_str(&value).ok())
        .unwrap_or_else(|| Season::of(today))
}

pub fn choose_theme(store: &mut dyn KeyValueStore, theme: Season) -> GalleryResult<()> {
    store.set(StorageKey::Theme, theme.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn seasons_follow_months() {
        assert_eq!(Season::of(d(2026, 1, 15)), Season::Winter);
        assert_eq!(Season::of(d(2026, 2, 28)), Season::Winter);
        assert_eq!(Season::of(d(2026, 3, 1)), Season::Spring);
        assert_eq!(Season::of(d(2026, 7, 4)), Season::Summer);
        assert_eq!(Season::of(d(2026, 10, 17)), Season::Autumn);
        assert_eq!(Season::of(d(2026, 12, 1)), Season::Winter);
    }

    #[test]
    fn stored_choice_wins_over_season() {
        let mut store = MemoryStore::default();
        let today = d(2026, 7, 1);
        assert_eq!(active_theme(&store, today), Season::Summer);
        assert_eq!(store.get(StorageKey::Theme), None);

        choose_theme(&mut store, Season::Winter).unwrap();
        assert_eq!(active_theme(&store, today), Season::Winter);
    }

    #[test]
    fn unknown_stored_theme_falls_back_to_season() {
        let mut store = MemoryStore::default();
        store.set(StorageKey::Theme, "neon").unwrap();
        assert_eq!(active_theme(&store, d(2026, 4, 1)), Season::Spring);
        assert_eq!("AUTUMN".parse::<Season>().unwrap(), Season::Autumn);
    }
}
