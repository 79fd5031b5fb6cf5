use crate::gallery::Gallery;
use chrono::NaiveDate;

/// The date shown when the gallery opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialDate {
    /// A date that has an entry.
    Entry(NaiveDate),
    /// There are no entries at all; show `today`'s month as empty.
    Empty(NaiveDate),
}

impl InitialDate {
    pub fn date(self) -> NaiveDate {
        match self {
            InitialDate::Entry(date) | InitialDate::Empty(date) => date,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, InitialDate::Empty(_))
    }
}

/// Picks the opening date, first match wins:
/// 1. today, if it has an entry;
/// 2. the most recent entry before today;
/// 3. the earliest entry (everything is still to come);
/// 4. today, flagged empty, when there are no entries.
pub fn resolve_initial_date(gallery: &Gallery, today: NaiveDate) -> InitialDate {
    if gallery.contains(today) {
        return InitialDate::Entry(today);
    }
    gallery
        .latest_on_or_before(today)
        .or_else(|| gallery.earliest())
        .map(|entry| InitialDate::Entry(entry.date))
        .unwrap_or(InitialDate::Empty(today))
}
