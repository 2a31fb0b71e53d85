//! Tag cache file format.
//!
//! A tag cache is a line oriented snapshot of the library:
//!
//! ```text
//! info_begin
//! mpd_version: 0.16.0
//! fs_charset: utf-8
//! info_end
//! songList begin
//! key: song.mp3
//! file: /music/song.mp3
//! Time: 137
//! ...
//! songList end
//! ```
//!
//! Each song block opens with a `key` line holding the file name, followed by
//! the same fields a client gets for that song.

mod parse;

use std::fmt;

pub use parse::{parse_tag_cache, TagCache};

use crate::error::AppResult;
use crate::models::Track;
use crate::translator::{basename, keys, track_record, Value};

pub const INFO_BEGIN: &str = "info_begin";
pub const INFO_END: &str = "info_end";
pub const MPD_VERSION: &str = "mpd_version";
pub const FS_CHARSET: &str = "fs_charset";
pub const SONG_LIST_BEGIN: &str = "songList begin";
pub const SONG_LIST_END: &str = "songList end";
pub const SONG_KEY: &str = "key";

/// One line of a tag cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLine {
    /// A section marker, written as the bare key.
    Marker(&'static str),
    /// A `key: value` pair.
    Field(&'static str, Value),
}

impl CacheLine {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Marker(key) | Self::Field(key, _) => key,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Marker(_) => None,
            Self::Field(_, value) => Some(value),
        }
    }
}

impl fmt::Display for CacheLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker(key) => f.write_str(key),
            Self::Field(key, value) => write!(f, "{}: {}", key, value),
        }
    }
}

/// A complete tag cache, ready to be written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheDocument {
    lines: Vec<CacheLine>,
}

impl CacheDocument {
    fn marker(&mut self, key: &'static str) {
        self.lines.push(CacheLine::Marker(key));
    }

    fn field(&mut self, key: &'static str, value: impl Into<Value>) {
        self.lines.push(CacheLine::Field(key, value.into()));
    }

    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for CacheDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Build the tag cache for `tracks`, in input order.
///
/// # Errors
/// Fails if a track has a local file uri and `library_root` is empty.
pub fn tag_cache_document(
    tracks: &[Track],
    library_root: &str,
    protocol_version: &str,
    charset: &str,
) -> AppResult<CacheDocument> {
    let mut doc = CacheDocument::default();

    doc.marker(INFO_BEGIN);
    doc.field(MPD_VERSION, protocol_version);
    doc.field(FS_CHARSET, charset);
    doc.marker(INFO_END);

    doc.marker(SONG_LIST_BEGIN);
    for track in tracks {
        let record = track_record(track, library_root, None, None)?;
        let key = record
            .get(keys::FILE)
            .and_then(Value::as_text)
            .map(basename)
            .unwrap_or_default()
            .to_string();

        doc.field(SONG_KEY, key);
        doc.lines
            .extend(record.into_iter().map(|(key, value)| CacheLine::Field(key, value)));
    }
    doc.marker(SONG_LIST_END);

    tracing::debug!(songs = tracks.len(), lines = doc.len(), "Built tag cache");

    Ok(doc)
}
