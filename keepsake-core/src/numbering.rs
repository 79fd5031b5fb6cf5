//! Display counters. Both are derived on demand and never stored.
//!
//! - "Day N": days since the relationship began, counting that day as 1.
//! - "No. N": the entry's position in the gallery.

use crate::dates::diff_days;
use crate::gallery::Gallery;
use chrono::NaiveDate;

/// How "No." values are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingScheme {
    /// Chronological rank among all entries.
    Rank,
    /// Days since `start` (plus one), but only once the real calendar has
    /// reached `start`. Before that, and for entries dated before `start`,
    /// the rank is shown instead.
    ProjectDay { start: NaiveDate },
}

/// `Day N` value for `date`; never below 1.
pub fn relationship_day(relationship_start: NaiveDate, date: NaiveDate) -> i64 {
    (diff_days(relationship_start, date) + 1).max(1)
}

/// `No. N` value for the entry on `date`, or `None` if there is no such entry.
pub fn sequence_number(
    gallery: &Gallery,
    date: NaiveDate,
    real_today: NaiveDate,
    scheme: NumberingScheme,
) -> Option<i64> {
    let rank = gallery.rank_of(date)? as i64;
    match scheme {
        NumberingScheme::Rank => Some(rank),
        NumberingScheme::ProjectDay { start } => {
            if real_today < start {
                return Some(rank);
            }
            let day = diff_days(start, date) + 1;
            Some(if day > 0 { day } else { rank })
        }
    }
}
