//! Month grid for the calendar sidebar. Weeks start on Sunday.

use crate::dates::YearMonth;
use crate::gallery::Gallery;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Row of the grid the cell sits in, counting the leading blanks.
    pub week_index: u32,
    pub has_content: bool,
    /// After today and without content. Shown with a placeholder glyph.
    pub future: bool,
    pub selected: bool,
    pub today: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    /// Blank cells before day 1 so that it lands under its weekday.
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of seven slots, `None` for the blanks around the month.
    pub fn weeks(&self) -> Vec<[Option<&DayCell>; 7]> {
        let mut slots: Vec<Option<&DayCell>> = vec![None; self.leading_blanks as usize];
        slots.extend(self.cells.iter().map(Some));
        slots
            .chunks(7)
            .map(|chunk| {
                let mut row = [None; 7];
                row[..chunk.len()].copy_from_slice(chunk);
                row
            })
            .collect()
    }
}

pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn build_month_grid(
    month: YearMonth,
    gallery: &Gallery,
    selected: NaiveDate,
    today: NaiveDate,
) -> MonthGrid {
    let leading_blanks = month.first_day().weekday().num_days_from_sunday();
    let cells = (1..=month.days_in_month())
        .filter_map(|day| NaiveDate::from_ymd_opt(month.year(), month.month(), day))
        .map(|date| {
            let has_content = gallery.contains(date);
            DayCell {
                date,
                week_index: (leading_blanks + date.day() - 1) / 7,
                has_content,
                future: date > today && !has_content,
                selected: date == selected,
                today: date == today,
            }
        })
        .collect();

    MonthGrid {
        month,
        leading_blanks,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RawEntry;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn jan_2026() -> YearMonth {
        YearMonth::new(2026, 1).unwrap()
    }

    #[test]
    fn aligns_first_day_under_its_weekday() {
        // 2026-01-01 is a Thursday: four blanks (Su..We).
        let grid = build_month_grid(jan_2026(), &Gallery::default(), d(2026, 1, 1), d(2026, 1, 1));
        assert_eq!(grid.leading_blanks, 4);
        assert_eq!(grid.cells.len(), 31);
        assert_eq!(grid.cells[0].week_index, 0);
        assert_eq!(grid.cells[3].week_index, 1); // Sunday the 4th
        assert_eq!(grid.cells[30].week_index, 4);

        // February 2026 starts on a Sunday.
        let feb = build_month_grid(
            YearMonth::new(2026, 2).unwrap(),
            &Gallery::default(),
            d(2026, 2, 1),
            d(2026, 2, 1),
        );
        assert_eq!(feb.leading_blanks, 0);
        assert_eq!(feb.weeks().len(), 4);
    }

    #[test]
    fn classifies_cells() {
        let gallery = Gallery::from_entries([
            RawEntry::default().into_entry(d(2026, 1, 3)),
            RawEntry::default().into_entry(d(2026, 1, 20)),
        ]);
        let today = d(2026, 1, 10);
        let grid = build_month_grid(jan_2026(), &gallery, d(2026, 1, 3), today);
        let cell = |day: u32| grid.cells[day as usize - 1];

        assert!(cell(3).has_content && cell(3).selected && !cell(3).future);
        assert!(cell(10).today && !cell(10).future && !cell(10).has_content);
        assert!(cell(11).future);
        // Future dates with content are not placeholders.
        assert!(cell(20).has_content && !cell(20).future);
        assert!(!cell(9).future && !cell(9).has_content);

        for c in &grid.cells {
            assert!(!(c.has_content && c.future));
        }
        assert_eq!(grid.cells.iter().filter(|c| c.selected).count(), 1);
    }

    #[test]
    fn weeks_pad_with_blanks() {
        let grid = build_month_grid(jan_2026(), &Gallery::default(), d(2026, 1, 1), d(2026, 1, 1));
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks[0][..4].iter().all(Option::is_none));
        assert_eq!(weeks[0][4].map(DayCell::day), Some(1));
        assert_eq!(weeks[4][6].map(DayCell::day), Some(31));
    }
}
