//! Pure text formatting for the gallery's labels.
//!
//! Card prefix:  `Day 5870 · No. 003`
//! Date capsule: `Day 5870 · Jan 3`
//! Detail title: `2026.Jan.3`

use crate::dates::{YearMonth, week_bounds};
use crate::entry::Entry;
use crate::view::{EmptyMode, EmptyScope, EmptyState};
use chrono::{Datelike, NaiveDate};

use crate::calendar::MONTH_NAMES;

/// `Day 05 · No. 003`
pub fn format_card_prefix(day_number: i64, sequence_number: i64) -> String {
    format!("Day {day_number:02} · No. {sequence_number:03}")
}

/// Card title: the entry title, or its date when untitled.
pub fn card_title(entry: &Entry) -> String {
    if entry.title.trim().is_empty() {
        format_day_label(entry.date)
    } else {
        entry.title.trim().to_string()
    }
}

/// `Day 5870 · Jan 3`
pub fn format_capsule(day_number: i64, date: NaiveDate) -> String {
    format!("Day {day_number} · {}", date.format("%b %-d"))
}

/// `2026.Jan.3`
pub fn format_detail_title(date: NaiveDate) -> String {
    date.format("%Y.%b.%-d").to_string()
}

/// `Jan 3, 2026`
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `January 2026`
pub fn format_month_label(month: YearMonth) -> String {
    format!("{} {}", MONTH_NAMES[month.month() as usize - 1], month.year())
}

/// Monday-to-Sunday range around `date`: `Jan 5-Jan 11, 2026`, or
/// `Dec 29, 2025-Jan 4, 2026` when the week spans two years.
pub fn format_week_range(date: NaiveDate) -> String {
    let (start, end) = week_bounds(date);
    let start_label = start.format("%b %-d");
    let end_label = end.format("%b %-d");
    if start.year() == end.year() {
        format!("{start_label}-{end_label}, {}", start.year())
    } else {
        format!("{start_label}, {}-{end_label}, {}", start.year(), end.year())
    }
}

const FUTURE_DAY_PHRASES: &[&str] = &[
    "This day is still on its way.",
    "This day has not opened yet.",
    "Let this day stay blank for now.",
    "The bloom of this day is still closed.",
    "This day is waiting for your light.",
    "This day is quietly drawing near.",
    "This day's story hasn't turned the page.",
    "This day is taking a soft nap.",
];

const FUTURE_WEEK_PHRASES: &[&str] = &[
    "This week is drawing near.",
    "This week is still brewing.",
    "This week is growing slowly.",
    "This week remains blank for now.",
    "This week is preparing to appear.",
    "This week is saved for blooming.",
    "This week is still on its way.",
    "This week is softly folded away.",
];

const FUTURE_MONTH_PHRASES: &[&str] = &[
    "This month is still asleep.",
    "This month has not arrived yet.",
    "The bloom of this month hasn't come.",
    "This month is slowly approaching.",
    "This month keeps its lights tucked away.",
    "The story of this month hasn't unfolded yet.",
    "This month is saved for later.",
    "This month is still brewing.",
];

const PAST_PHRASE: &str = "Those days now glow in memory.";

/// Heading and subline for an empty date, week or month.
///
/// Future phrases rotate by date so neighbouring days read differently
/// while the same date always gets the same line.
pub fn empty_state_text(empty: &EmptyState) -> (&'static str, String) {
    let label = match empty.scope {
        EmptyScope::Day => format_day_label(empty.date),
        EmptyScope::Week => format_week_range(empty.date),
        EmptyScope::Month => format_month_label(YearMonth::of(empty.date)),
    };
    match empty.mode {
        EmptyMode::Past => ("Faint light of old dreams", format!("{label} · {PAST_PHRASE}")),
        EmptyMode::Future => {
            let phrases = match empty.scope {
                EmptyScope::Day => FUTURE_DAY_PHRASES,
                EmptyScope::Week => FUTURE_WEEK_PHRASES,
                EmptyScope::Month => FUTURE_MONTH_PHRASES,
            };
            let index = empty.date.num_days_from_ce().unsigned_abs() as usize % phrases.len();
            ("Not yet in bloom", format!("{label} · {}", phrases[index]))
        }
    }
}

/// Type size for the detail letter; short letters are set larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterSize {
    Normal,
    Large,
    ExtraLarge,
}

pub fn letter_size(text: &str) -> LetterSize {
    match text.chars().count() {
        0..30 => LetterSize::ExtraLarge,
        30..80 => LetterSize::Large,
        _ => LetterSize::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RawEntry;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn card_prefix_pads_numbers() {
        assert_eq!(format_card_prefix(5, 3), "Day 05 · No. 003");
        assert_eq!(format_card_prefix(5870, 1234), "Day 5870 · No. 1234");
    }

    #[test]
    fn dates_format_readably() {
        let date = d(2026, 1, 3);
        assert_eq!(format_capsule(5869, date), "Day 5869 · Jan 3");
        assert_eq!(format_detail_title(date), "2026.Jan.3");
        assert_eq!(format_day_label(date), "Jan 3, 2026");
        assert_eq!(format_month_label(YearMonth::of(date)), "January 2026");
    }

    #[test]
    fn week_range_mentions_both_years_when_needed() {
        assert_eq!(format_week_range(d(2026, 1, 7)), "Jan 5-Jan 11, 2026");
        assert_eq!(format_week_range(d(2026, 1, 1)), "Dec 29, 2025-Jan 4, 2026");
    }

    #[test]
    fn untitled_cards_use_their_date() {
        let mut entry = RawEntry::default().into_entry(d(2026, 2, 14));
        assert_eq!(card_title(&entry), "Feb 14, 2026");
        entry.title = " Roses ".into();
        assert_eq!(card_title(&entry), "Roses");
    }

    #[test]
    fn empty_state_text_depends_on_mode_and_scope() {
        let past = EmptyState {
            mode: EmptyMode::Past,
            scope: EmptyScope::Month,
            date: d(2025, 11, 1),
        };
        let (title, line) = empty_state_text(&past);
        assert_eq!(title, "Faint light of old dreams");
        assert_eq!(line, "November 2025 · Those days now glow in memory.");

        let future = EmptyState {
            mode: EmptyMode::Future,
            scope: EmptyScope::Week,
            date: d(2026, 1, 14),
        };
        let (title, line) = empty_state_text(&future);
        assert_eq!(title, "Not yet in bloom");
        assert!(line.starts_with("Jan 12-Jan 18, 2026 · This week"));
        assert_eq!(empty_state_text(&future), (title, line));
    }

    #[test]
    fn short_letters_are_larger() {
        assert_eq!(letter_size("I love you"), LetterSize::ExtraLarge);
        assert_eq!(letter_size(&"x".repeat(50)), LetterSize::Large);
        assert_eq!(letter_size(&"x".repeat(80)), LetterSize::Normal);
    }
}
