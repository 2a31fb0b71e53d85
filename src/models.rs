//! Music domain model.
//!
//! These are read-only inputs to the serializers; nothing in this crate
//! mutates a track once it has been built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A performing artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An album a track belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    /// Total number of tracks on the album, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_tracks: Option<u32>,
}

impl Album {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_tracks: None,
        }
    }

    /// Set the declared track total.
    pub fn with_num_tracks(mut self, num_tracks: u32) -> Self {
        self.num_tracks = Some(num_tracks);
        self
    }
}

/// A single playable track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Storage uri, e.g. `file:///music/song.mp3` or a stream url. May be empty.
    pub uri: String,
    /// Track title.
    pub name: String,
    /// Performing artists, in credit order.
    pub artists: Vec<Artist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<Album>,
    /// Position on the album, 0 when unknown.
    pub track_no: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Length in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

impl Track {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.artists.push(artist);
        self
    }

    pub fn with_album(mut self, album: Album) -> Self {
        self.album = Some(album);
        self
    }

    pub fn with_track_no(mut self, track_no: u32) -> Self {
        self.track_no = track_no;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_length(mut self, length_ms: u64) -> Self {
        self.length = Some(length_ms);
        self
    }
}

/// An ordered list of tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A track in the current playlist, carrying the id clients use to refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedTrack {
    pub id: u32,
    pub track: Track,
}

impl QueuedTrack {
    pub fn new(id: u32, track: Track) -> Self {
        Self { id, track }
    }
}
