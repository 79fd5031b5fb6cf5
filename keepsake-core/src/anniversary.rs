//! Which anniversary effect, if any, should play today.
//!
//! Only the scheduling lives here; drawing the effects is up to the front end.

use crate::error::GalleryResult;
use crate::storage::{KeyValueStore, anniversary_shown_on, mark_anniversary_shown};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnniversaryKind {
    /// A full celebration, played once per day.
    Celebration,
    /// A background atmosphere, played on every visit that day.
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anniversary {
    pub id: &'static str,
    pub month: u32,
    pub day: u32,
    pub name: &'static str,
    pub kind: AnniversaryKind,
    pub title: Option<&'static str>,
    pub effect: &'static str,
    pub colors: &'static [&'static str],
}

pub const ANNIVERSARIES: &[Anniversary] = &[
    Anniversary {
        id: "birthday",
        month: 9,
        day: 22,
        name: "Birthday",
        kind: AnniversaryKind::Celebration,
        title: Some("Happy Birthday, My Minnie"),
        effect: "butterfly",
        colors: &["#E8B4E8", "#FFC7D4", "#B8E8D2", "#FFD700"],
    },
    Anniversary {
        id: "love-anniversary",
        month: 12,
        day: 10,
        name: "Love anniversary",
        kind: AnniversaryKind::Celebration,
        title: Some("16 Years of Love"),
        effect: "golden-shapes",
        colors: &["#D4A574", "#F5DEB3", "#C9A86C", "#FFFAF0"],
    },
    Anniversary {
        id: "wedding",
        month: 12,
        day: 16,
        name: "Wedding anniversary",
        kind: AnniversaryKind::Ambient,
        title: None,
        effect: "rose-petals",
        colors: &["#8B0000", "#A52A2A", "#800020", "#FFD1DC"],
    },
    Anniversary {
        id: "new-year",
        month: 1,
        day: 1,
        name: "New year",
        kind: AnniversaryKind::Ambient,
        title: Some("Happy New Year, My Love"),
        effect: "fireworks",
        colors: &["#FFD700", "#E8B4D8", "#87CEEB"],
    },
    Anniversary {
        id: "valentine",
        month: 2,
        day: 14,
        name: "Valentine's day",
        kind: AnniversaryKind::Celebration,
        title: Some("Be My Valentine, Forever"),
        effect: "neon-hearts",
        colors: &["#FF1493", "#FF6B6B", "#FF69B4", "#E040FB", "#00FFFF"],
    },
];

pub fn anniversary_on(date: NaiveDate) -> Option<&'static Anniversary> {
    ANNIVERSARIES
        .iter()
        .find(|a| a.month == date.month() && a.day == date.day())
}

/// The anniversary to play today, if any. Celebrations are recorded in
/// `store` so they do not repeat on the same day.
pub fn due_anniversary(
    today: NaiveDate,
    store: &mut dyn KeyValueStore,
) -> GalleryResult<Option<&'static Anniversary>> {
    let Some(anniversary) = anniversary_on(today) else {
        return Ok(None);
    };
    if anniversary.kind == AnniversaryKind::Ambient {
        return Ok(Some(anniversary));
    }
    let key = today.format("%Y-%m-%d").to_string();
    if anniversary_shown_on(store, anniversary.id, &key) {
        log::debug!("{} already shown today", anniversary.id);
        return Ok(None);
    }
    mark_anniversary_shown(store, anniversary.id, &key)?;
    Ok(Some(anniversary))
}
