//! The `Gallery` entry set and the loader that builds it from the data files.

use crate::dates::{YearMonth, parse_calendar_date};
use crate::entry::{Entry, RawEntry};
use crate::error::{GalleryError, GalleryResult};
use crate::paths::{data_path, embedded_data_path};
use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// All entries, at most one per calendar date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    entries: BTreeMap<NaiveDate, Entry>,
}

/// Where the loaded records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    DataFile,
    Embedded,
    /// Nothing could be read; the gallery is empty.
    Unavailable,
}

/// A recoverable problem found while loading. The gallery is still usable.
#[derive(Debug)]
pub enum LoadIssue {
    SourceFailed {
        path: PathBuf,
        error: GalleryError,
    },
    /// A record had no usable date and was given a synthetic one.
    RepairedDate {
        index: usize,
        input: Option<String>,
        assigned: NaiveDate,
    },
    /// Two records shared a date; the later one was kept.
    DuplicateDate {
        date: NaiveDate,
        dropped_filename: String,
    },
}

/// The complete result of a load: the gallery plus any issues met on the way.
#[derive(Debug)]
pub struct LoadReport {
    pub gallery: Gallery,
    pub source: DataSource,
    pub issues: Vec<LoadIssue>,
}

static EMBEDDED_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)__GALLERY_DATA__\s*=\s*(\[.*\])\s*;?\s*$").expect("valid regex")
});

impl Gallery {
    /// Builds a gallery from entries; for a repeated date the last one wins.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut gallery = Self::default();
        for entry in entries {
            gallery.upsert(entry);
        }
        gallery
    }

    /// Reads `data.json` from `root`, falling back to the embedded `data.js`.
    ///
    /// Never fails: unreadable sources are reported in [`LoadReport::issues`]
    /// and leave the gallery empty. Records without a valid date are placed at
    /// `epoch + index`.
    pub fn load(root: &Path, epoch: NaiveDate) -> LoadReport {
        let mut issues = Vec::new();

        let json_path = data_path(root);
        let records = match read_data_file(&json_path) {
            Ok(records) => Some((records, DataSource::DataFile)),
            Err(error) => {
                log::warn!("{error}; trying embedded data");
                issues.push(LoadIssue::SourceFailed {
                    path: json_path,
                    error,
                });
                let js_path = embedded_data_path(root);
                match read_embedded_file(&js_path) {
                    Ok(records) => Some((records, DataSource::Embedded)),
                    Err(error) => {
                        log::warn!("{error}; gallery is empty");
                        issues.push(LoadIssue::SourceFailed {
                            path: js_path,
                            error,
                        });
                        None
                    }
                }
            }
        };

        let Some((records, source)) = records else {
            return LoadReport {
                gallery: Gallery::default(),
                source: DataSource::Unavailable,
                issues,
            };
        };

        let (gallery, record_issues) = Self::from_records(records, epoch);
        issues.extend(record_issues);
        log::info!("loaded {} entries from {:?}", gallery.len(), source);
        LoadReport {
            gallery,
            source,
            issues,
        }
    }

    /// Turns raw records into a gallery, repairing dates and dropping duplicates.
    pub fn from_records(records: Vec<RawEntry>, epoch: NaiveDate) -> (Self, Vec<LoadIssue>) {
        let mut gallery = Self::default();
        let mut issues = Vec::new();

        for (index, mut raw) in records.into_iter().enumerate() {
            let input = raw.date.take();
            let date = match input.as_deref().and_then(parse_calendar_date) {
                Some(date) => date,
                None => {
                    let assigned = epoch.checked_add_days(Days::new(index as u64)).unwrap_or(epoch);
                    log::debug!("record {index} has date {input:?}; using {assigned}");
                    issues.push(LoadIssue::RepairedDate {
                        index,
                        input,
                        assigned,
                    });
                    assigned
                }
            };
            if let Some(previous) = gallery.upsert(raw.into_entry(date)) {
                issues.push(LoadIssue::DuplicateDate {
                    date,
                    dropped_filename: previous.filename,
                });
            }
        }
        (gallery, issues)
    }

    /// Inserts `entry`, replacing and returning any entry on the same date.
    pub fn upsert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.date, entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Oldest first.
    pub fn iter_ascending(&self) -> impl DoubleEndedIterator<Item = &Entry> {
        self.entries.values()
    }

    /// Newest first, the display order.
    pub fn iter_descending(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values().rev()
    }

    pub fn earliest(&self) -> Option<&Entry> {
        self.entries.values().next()
    }

    pub fn latest(&self) -> Option<&Entry> {
        self.entries.values().next_back()
    }

    /// Most recent entry dated on or before `date`.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.range(..=date).next_back().map(|(_, e)| e)
    }

    /// Entries of `month`, newest first.
    pub fn in_month(&self, month: YearMonth) -> Vec<&Entry> {
        self.in_range(month.first_day(), month.last_day())
    }

    /// Entries between `start` and `end` inclusive, newest first.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Entry> {
        if start > end {
            return Vec::new();
        }
        self.entries
            .range(start..=end)
            .rev()
            .map(|(_, e)| e)
            .collect()
    }

    /// 1-based chronological position of the entry on `date`.
    pub fn rank_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some(self.entries.range(..date).count() + 1)
    }

    /// Serialises the entries newest first, in the `data.json` shape.
    pub fn to_json(&self) -> GalleryResult<String> {
        let entries: Vec<&Entry> = self.iter_descending().collect();
        serde_json::to_string_pretty(&entries).map_err(|source| GalleryError::Json {
            path: PathBuf::from(crate::paths::DATA_FILE),
            source,
        })
    }
}

fn read_data_file(path: &Path) -> GalleryResult<Vec<RawEntry>> {
    let content = fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&content, path)
}

fn read_embedded_file(path: &Path) -> GalleryResult<Vec<RawEntry>> {
    let content = fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let array = EMBEDDED_DATA
        .captures(&content)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| GalleryError::EmbeddedDataMissing {
            path: path.to_path_buf(),
        })?;
    parse_records(array.as_str(), path)
}

fn parse_records(content: &str, path: &Path) -> GalleryResult<Vec<RawEntry>> {
    serde_json::from_str(content).map_err(|source| GalleryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn epoch() -> NaiveDate {
        d(2026, 1, 1)
    }

    fn raw(date: Option<&str>, filename: &str) -> RawEntry {
        RawEntry {
            date: date.map(str::to_string),
            filename: filename.to_string(),
            ..Default::default()
        }
    }

    const SAMPLE: &str = r#"[
        {"date": "2026-01-03", "filename": "c.webp", "title": "Third"},
        {"date": "2026-01-01", "filename": "a.webp", "title": "First", "loveLetter": "hi"}
    ]"#;

    #[test]
    fn from_records_sorts_and_indexes() {
        let (gallery, issues) = Gallery::from_records(
            vec![
                raw(Some("2026-01-03"), "c"),
                raw(Some("2026-01-01"), "a"),
                raw(Some("2026-01-02"), "b"),
            ],
            epoch(),
        );
        assert!(issues.is_empty());
        let desc: Vec<_> = gallery.iter_descending().map(|e| e.filename.as_str()).collect();
        assert_eq!(desc, ["c", "b", "a"]);
        assert_eq!(gallery.earliest().unwrap().filename, "a");
        assert_eq!(gallery.latest().unwrap().filename, "c");
        assert_eq!(gallery.rank_of(d(2026, 1, 2)), Some(2));
        assert_eq!(gallery.rank_of(d(2026, 1, 9)), None);
    }

    #[test]
    fn missing_and_malformed_dates_get_epoch_plus_index() {
        let (gallery, issues) = Gallery::from_records(
            vec![
                raw(Some("2025-06-01"), "ok"),
                raw(None, "missing"),
                raw(Some("not a date"), "broken"),
            ],
            epoch(),
        );
        assert_eq!(gallery.get(d(2026, 1, 2)).unwrap().filename, "missing");
        assert_eq!(gallery.get(d(2026, 1, 3)).unwrap().filename, "broken");
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            &issues[1],
            LoadIssue::RepairedDate { index: 2, input: Some(s), .. } if s == "not a date"
        ));
    }

    #[test]
    fn non_string_dates_and_null_text_do_not_drop_the_file() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("data.json"),
            r#"[
                {"date": 20260105, "filename": "number.webp", "title": null},
                {"date": "2026-01-02", "filename": "ok.webp", "loveLetter": null}
            ]"#,
        )
        .unwrap();
        let report = Gallery::load(tmp.path(), epoch());
        assert_eq!(report.source, DataSource::DataFile);
        assert_eq!(report.gallery.len(), 2);
        // Index 0 is repaired to the epoch itself.
        assert_eq!(report.gallery.get(epoch()).unwrap().filename, "number.webp");
        assert_eq!(report.gallery.get(d(2026, 1, 2)).unwrap().filename, "ok.webp");
        assert!(matches!(
            &report.issues[..],
            [LoadIssue::RepairedDate { index: 0, input: Some(s), .. }] if s == "20260105"
        ));
    }

    #[test]
    fn duplicate_dates_keep_the_last_record() {
        let (gallery, issues) = Gallery::from_records(
            vec![raw(Some("2026-01-01"), "old"), raw(Some("2026-01-01"), "new")],
            epoch(),
        );
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.get(epoch()).unwrap().filename, "new");
        assert!(matches!(
            &issues[0],
            LoadIssue::DuplicateDate { dropped_filename, .. } if dropped_filename == "old"
        ));
    }

    #[test]
    fn range_queries_are_newest_first() {
        let gallery = Gallery::from_records(
            vec![
                raw(Some("2025-12-31"), "dec"),
                raw(Some("2026-01-05"), "jan5"),
                raw(Some("2026-01-20"), "jan20"),
                raw(Some("2026-02-01"), "feb"),
            ],
            epoch(),
        )
        .0;
        let jan: Vec<_> = gallery
            .in_month(YearMonth::new(2026, 1).unwrap())
            .into_iter()
            .map(|e| e.filename.as_str())
            .collect();
        assert_eq!(jan, ["jan20", "jan5"]);
        assert_eq!(
            gallery.latest_on_or_before(d(2026, 1, 19)).unwrap().filename,
            "jan5"
        );
        assert!(gallery.latest_on_or_before(d(2025, 1, 1)).is_none());
        assert!(gallery.in_range(d(2026, 2, 1), d(2026, 1, 1)).is_empty());
    }

    #[test]
    fn load_reads_data_file() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("data.json"), SAMPLE).unwrap();

        let report = Gallery::load(tmp.path(), epoch());
        assert_eq!(report.source, DataSource::DataFile);
        assert!(report.issues.is_empty());
        assert_eq!(report.gallery.len(), 2);
        assert_eq!(report.gallery.get(epoch()).unwrap().love_letter, "hi");
    }

    #[test]
    fn load_falls_back_to_embedded_data() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("data.json"), "{ not json").unwrap();
        fs::write(
            tmp.path().join("data.js"),
            format!("window.__GALLERY_DATA__ = {};\n", SAMPLE.replace('\n', "")),
        )
        .unwrap();

        let report = Gallery::load(tmp.path(), epoch());
        assert_eq!(report.source, DataSource::Embedded);
        assert_eq!(report.gallery.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            &report.issues[0],
            LoadIssue::SourceFailed { error: GalleryError::Json { .. }, .. }
        ));
    }

    #[test]
    fn load_with_nothing_available_is_empty_not_fatal() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("data.js"), "console.log('hi');").unwrap();

        let report = Gallery::load(tmp.path(), epoch());
        assert_eq!(report.source, DataSource::Unavailable);
        assert!(report.gallery.is_empty());
        assert_eq!(report.issues.len(), 2);
        assert!(matches!(
            &report.issues[1],
            LoadIssue::SourceFailed { error: GalleryError::EmbeddedDataMissing { .. }, .. }
        ));
    }

    #[test]
    fn upsert_replaces_and_json_is_newest_first() {
        let mut gallery = Gallery::from_records(
            vec![raw(Some("2026-01-01"), "a"), raw(Some("2026-01-02"), "b")],
            epoch(),
        )
        .0;
        let replaced = gallery.upsert(raw(None, "a2").into_entry(epoch()));
        assert_eq!(replaced.unwrap().filename, "a");

        let json = gallery.to_json().unwrap();
        let back: Vec<RawEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0].date.as_deref(), Some("2026-01-02"));
        assert_eq!(back[1].filename, "a2");
        assert!(json.contains("\"loveLetter\""));
    }
}
