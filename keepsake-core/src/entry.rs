use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One dated gallery item: a photo with its title, description and letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub date: NaiveDate,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub love_letter: String,
}

/// An entry as it appears in `data.json`, before its date has been checked.
///
/// Reading a record never fails on a single field: a non-string date is kept
/// as its JSON text so the loader can repair it, and `null` text reads as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntry {
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub filename: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub love_letter: String,
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl RawEntry {
    pub fn into_entry(self, date: NaiveDate) -> Entry {
        Entry {
            date,
            filename: self.filename,
            title: self.title,
            description: self.description,
            love_letter: self.love_letter,
        }
    }
}

impl Entry {
    /// Text shown in the detail letter: the letter, else the description,
    /// else a fixed dedication.
    pub fn letter_text(&self) -> &str {
        [self.love_letter.trim(), self.description.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .unwrap_or(DEFAULT_LETTER)
    }
}

pub const DEFAULT_LETTER: &str = "A special day, worth remembering forever.";
