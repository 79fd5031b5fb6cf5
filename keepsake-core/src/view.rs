//! Single-owner view state: which date is selected, which month is shown,
//! and which background tone is current.
//!
//! Every navigation method returns a [`ViewUpdate`] describing what to show;
//! nothing here touches a screen, so the whole flow is testable headless.
//!
//! Tone extraction is slow and may finish out of order, so each request gets a
//! [`ToneTicket`]. Any later selection retires older tickets, and
//! [`GalleryView::complete_tone`] drops results carrying a retired ticket.

use crate::calendar::{MonthGrid, build_month_grid};
use crate::config::Config;
use crate::dates::{YearMonth, week_bounds};
use crate::entry::Entry;
use crate::gallery::Gallery;
use crate::numbering::{NumberingScheme, relationship_day, sequence_number};
use crate::resolve::{InitialDate, resolve_initial_date};
use crate::tone::{Overlay, Rgb, ToneCache};
use chrono::{Days, NaiveDate, TimeDelta};
use strum_macros::{AsRefStr, Display};

/// Number of "still to come" slots after the last timeline entry.
pub const FUTURE_PLACEHOLDERS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_date: NaiveDate,
    pub current_month: YearMonth,
}

/// How much of the calendar around an empty date is empty too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EmptyScope {
    Day,
    Week,
    Month,
}

/// Whether an empty date reads as "still to come" or "already past".
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EmptyMode {
    Past,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub mode: EmptyMode,
    pub scope: EmptyScope,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewContent {
    /// The month's entries (newest first) with the selected one.
    Entries { month: Vec<Entry>, selected: Entry },
    Empty(EmptyState),
}

/// Identifies one tone request; only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneRequest {
    pub ticket: ToneTicket,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToneAction {
    /// Show this overlay now (cached tone, or the neutral base tint).
    Apply(Overlay),
    /// Decode the image, then hand the tone to [`GalleryView::complete_tone`].
    Load(ToneRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    pub selection: SelectionState,
    pub content: ViewContent,
    pub tone: ToneAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineItem {
    Entry { entry: Entry, number: usize },
    Placeholder(NaiveDate),
}

/// The dates and colours the view works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub today: NaiveDate,
    pub relationship_start: NaiveDate,
    pub project_start: NaiveDate,
    pub empty_future_start: NaiveDate,
    pub numbering: NumberingScheme,
    pub base_tint: Rgb,
    pub tone_mix: f64,
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            today: config.reference_date,
            relationship_start: config.relationship_start,
            project_start: config.project_start,
            empty_future_start: config.empty_future_start,
            numbering: config.numbering_scheme(),
            base_tint: config.base_tint,
            tone_mix: config.tone_mix,
        }
    }
}

#[derive(Debug)]
pub struct GalleryView {
    gallery: Gallery,
    settings: ViewSettings,
    selection: SelectionState,
    tones: ToneCache,
    tone_generation: u64,
    overlay: Overlay,
}

impl GalleryView {
    pub fn new(gallery: Gallery, settings: ViewSettings) -> Self {
        Self {
            gallery,
            selection: SelectionState {
                selected_date: settings.project_start,
                current_month: YearMonth::of(settings.project_start),
            },
            tones: ToneCache::default(),
            tone_generation: 0,
            overlay: Overlay::neutral(settings.base_tint, settings.tone_mix),
            settings,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Overlay currently on screen.
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// First render: resolve the opening date and show its month.
    pub fn open(&mut self) -> ViewUpdate {
        match resolve_initial_date(&self.gallery, self.settings.today) {
            InitialDate::Empty(today) => {
                self.selection = SelectionState {
                    selected_date: today,
                    current_month: YearMonth::of(today),
                };
                let empty = EmptyState {
                    mode: self.empty_mode(today),
                    scope: EmptyScope::Month,
                    date: today,
                };
                self.empty_update(empty)
            }
            InitialDate::Entry(date) => {
                self.selection = SelectionState {
                    selected_date: date,
                    current_month: YearMonth::of(date),
                };
                self.show_month(Some(date))
            }
        }
    }

    /// Selects `date` directly (calendar cell, timeline thumbnail, card).
    pub fn select_date(&mut self, date: NaiveDate) -> ViewUpdate {
        self.selection.selected_date = date;
        self.selection.current_month = YearMonth::of(date);

        let Some(entry) = self.gallery.get(date).cloned() else {
            let empty = EmptyState {
                mode: self.empty_mode(date),
                scope: self.empty_scope(date),
                date,
            };
            return self.empty_update(empty);
        };

        let tone = self.request_tone(&entry.filename);
        ViewUpdate {
            selection: self.selection,
            content: ViewContent::Entries {
                month: self.month_entries(),
                selected: entry,
            },
            tone,
        }
    }

    /// Arrow-key navigation: moves the selection by `offset` calendar days.
    ///
    /// Returns `None` and leaves the selection alone when the target falls
    /// outside the representable calendar.
    pub fn navigate_day(&mut self, offset: i64) -> Option<ViewUpdate> {
        let target = TimeDelta::try_days(offset)
            .and_then(|delta| self.selection.selected_date.checked_add_signed(delta))?;
        Some(self.select_date(target))
    }

    /// Pages back one month; stays put on the first representable month.
    pub fn previous_month(&mut self) -> ViewUpdate {
        if let Some(month) = self.selection.current_month.previous() {
            self.selection.current_month = month;
        }
        self.show_month(None)
    }

    /// Pages forward one month; stays put on the last representable month.
    pub fn next_month(&mut self) -> ViewUpdate {
        if let Some(month) = self.selection.current_month.next() {
            self.selection.current_month = month;
        }
        self.show_month(None)
    }

    /// Jumps straight to `month` (month picker).
    pub fn jump_to_month(&mut self, month: YearMonth) -> ViewUpdate {
        self.selection.current_month = month;
        self.show_month(None)
    }

    /// Shows `current_month`: selects `anchor` when it has an entry in the
    /// month, otherwise the month's newest entry. An empty month leaves the
    /// selection alone.
    pub fn show_month(&mut self, anchor: Option<NaiveDate>) -> ViewUpdate {
        let month = self.selection.current_month;
        let entries = self.gallery.in_month(month);
        let Some(newest) = entries.first().map(|e| e.date) else {
            let empty = EmptyState {
                mode: self.empty_mode(month.first_day()),
                scope: EmptyScope::Month,
                date: month.first_day(),
            };
            return self.empty_update(empty);
        };
        let target = anchor
            .filter(|date| month.contains(*date) && self.gallery.contains(*date))
            .unwrap_or(newest);
        self.select_date(target)
    }

    /// Applies a finished tone extraction. Returns the overlay to show, or
    /// `None` when `ticket` has been superseded and the result was dropped.
    pub fn complete_tone(
        &mut self,
        ticket: ToneTicket,
        filename: &str,
        tone: Option<Rgb>,
    ) -> Option<Overlay> {
        if ticket.0 != self.tone_generation {
            log::debug!(
                "dropping stale tone for {filename} (ticket {}, current {})",
                ticket.0,
                self.tone_generation
            );
            return None;
        }
        self.overlay = match tone {
            Some(tone) => {
                self.tones.insert(filename, tone);
                Overlay::new(tone, self.settings.base_tint, self.settings.tone_mix)
            }
            None => self.neutral_overlay(),
        };
        Some(self.overlay)
    }

    /// Calendar grid for the current month.
    pub fn grid(&self) -> MonthGrid {
        build_month_grid(
            self.selection.current_month,
            &self.gallery,
            self.selection.selected_date,
            self.settings.today,
        )
    }

    /// All entries oldest first, numbered 1.., then a few future slots.
    pub fn timeline(&self) -> Vec<TimelineItem> {
        let mut items: Vec<TimelineItem> = self
            .gallery
            .iter_ascending()
            .enumerate()
            .map(|(i, entry)| TimelineItem::Entry {
                entry: entry.clone(),
                number: i + 1,
            })
            .collect();
        let last = self
            .gallery
            .latest()
            .map(|e| e.date)
            .unwrap_or(self.settings.project_start);
        items.extend(
            (1..=FUTURE_PLACEHOLDERS)
                .filter_map(|i| last.checked_add_days(Days::new(i)))
                .map(TimelineItem::Placeholder),
        );
        items
    }

    pub fn day_number(&self, date: NaiveDate) -> i64 {
        relationship_day(self.settings.relationship_start, date)
    }

    pub fn sequence_number(&self, date: NaiveDate) -> Option<i64> {
        sequence_number(
            &self.gallery,
            date,
            self.settings.today,
            self.settings.numbering,
        )
    }

    fn month_entries(&self) -> Vec<Entry> {
        self.gallery
            .in_month(self.selection.current_month)
            .into_iter()
            .cloned()
            .collect()
    }

    fn empty_update(&mut self, empty: EmptyState) -> ViewUpdate {
        ViewUpdate {
            selection: self.selection,
            content: ViewContent::Empty(empty),
            tone: ToneAction::Apply(self.reset_tone()),
        }
    }

    fn empty_mode(&self, date: NaiveDate) -> EmptyMode {
        if date >= self.settings.empty_future_start {
            EmptyMode::Future
        } else {
            EmptyMode::Past
        }
    }

    fn empty_scope(&self, date: NaiveDate) -> EmptyScope {
        if self.gallery.in_month(YearMonth::of(date)).is_empty() {
            return EmptyScope::Month;
        }
        let (start, end) = week_bounds(date);
        if self.gallery.in_range(start, end).is_empty() {
            EmptyScope::Week
        } else {
            EmptyScope::Day
        }
    }

    fn request_tone(&mut self, filename: &str) -> ToneAction {
        self.tone_generation += 1;
        match self.tones.get(filename) {
            Some(tone) => {
                self.overlay = Overlay::new(tone, self.settings.base_tint, self.settings.tone_mix);
                ToneAction::Apply(self.overlay)
            }
            None => ToneAction::Load(ToneRequest {
                ticket: ToneTicket(self.tone_generation),
                filename: filename.to_string(),
            }),
        }
    }

    fn reset_tone(&mut self) -> Overlay {
        self.tone_generation += 1;
        self.overlay = self.neutral_overlay();
        self.overlay
    }

    fn neutral_overlay(&self) -> Overlay {
        Overlay::neutral(self.settings.base_tint, self.settings.tone_mix)
    }
}
