//! Conversion of domain objects into protocol field records.
//!
//! A [`FieldRecord`] is the ordered list of `Key: value` pairs a client sees
//! for one song. Key names and their order are part of the wire contract.

pub mod format;
pub mod path;
pub mod playlist;
pub mod track;

use chrono::NaiveDate;
use std::fmt;

pub use format::{date_value, duration_seconds, joined_artist_names, track_number};
pub use path::{basename, file_uri, relative_path};
pub use playlist::{playlist_records, queue_records};
pub use track::track_record;

/// Protocol field names.
pub mod keys {
    pub const FILE: &str = "file";
    pub const TIME: &str = "Time";
    pub const ARTIST: &str = "Artist";
    pub const TITLE: &str = "Title";
    pub const ALBUM: &str = "Album";
    pub const TRACK: &str = "Track";
    pub const DATE: &str = "Date";
    pub const POS: &str = "Pos";
    pub const ID: &str = "Id";
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(u64),
    Date(NaiveDate),
}

impl Value {
    /// Returns the string payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(u64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Int(n as u64)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// Ordered key/value metadata for one track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: Vec<(&'static str, Value)>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Each key may appear only once per record.
    pub fn push(&mut self, key: &'static str, value: impl Into<Value>) {
        debug_assert!(!self.contains(key), "duplicate field {key}");
        self.fields.push((key, value.into()));
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (&'static str, Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldRecord {
    type Item = &'a (&'static str, Value);
    type IntoIter = std::slice::Iter<'a, (&'static str, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for FieldRecord {
    type Item = (&'static str, Value);
    type IntoIter = std::vec::IntoIter<(&'static str, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Renders `Key: value` lines, one per field.
impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.fields {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Render a multi-song response body.
pub fn render_records(records: &[FieldRecord]) -> String {
    records.iter().map(FieldRecord::to_string).collect()
}
