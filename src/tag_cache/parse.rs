//! Reading a tag cache back into tracks.

use chrono::NaiveDate;

use super::{
    FS_CHARSET, INFO_BEGIN, INFO_END, MPD_VERSION, SONG_KEY, SONG_LIST_BEGIN, SONG_LIST_END,
};
use crate::error::{AppError, AppResult};
use crate::models::{Album, Artist, Track};
use crate::translator::file_uri;

/// Contents of a parsed tag cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCache {
    pub mpd_version: Option<String>,
    pub fs_charset: Option<String>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Info,
    Songs,
}

/// Fields collected for one song block.
#[derive(Debug, Default)]
struct SongFields {
    file: Option<String>,
    length_ms: Option<u64>,
    artist: Option<String>,
    title: Option<String>,
    album: Option<String>,
    track_no: u32,
    num_tracks: Option<u32>,
    date: Option<NaiveDate>,
}

impl SongFields {
    fn set(&mut self, key: &str, value: &str, line: usize) -> AppResult<()> {
        match key.to_ascii_lowercase().as_str() {
            "file" => self.file = Some(value.to_string()),
            "time" => {
                let length_ms = value
                    .parse::<u64>()
                    .ok()
                    .and_then(|seconds| seconds.checked_mul(1000))
                    .ok_or_else(|| {
                        AppError::parse(line, format!("invalid Time value {:?}", value))
                    })?;
                self.length_ms = Some(length_ms);
            }
            "artist" => self.artist = Some(value.to_string()),
            "title" => self.title = Some(value.to_string()),
            "album" => self.album = Some(value.to_string()),
            "track" => {
                let invalid = || AppError::parse(line, format!("invalid Track value {:?}", value));
                match value.split_once('/') {
                    Some((number, total)) => {
                        self.track_no = number.trim().parse().map_err(|_| invalid())?;
                        self.num_tracks = Some(total.trim().parse().map_err(|_| invalid())?);
                    }
                    None => self.track_no = value.trim().parse().map_err(|_| invalid())?,
                }
            }
            "date" => self.date = parse_date(value, line)?,
            _ => {}
        }
        Ok(())
    }

    fn into_track(self, library_root: &str) -> AppResult<Track> {
        let uri = match self.file {
            None => String::new(),
            Some(file) if file.is_empty() || has_scheme(&file) => file,
            Some(file) => {
                if library_root.is_empty() {
                    return Err(AppError::missing_library_root(&file));
                }
                file_uri(library_root, &file)
            }
        };

        let artists = self
            .artist
            .filter(|name| !name.is_empty())
            .map(|name| vec![Artist::new(name)])
            .unwrap_or_default();

        let album_name = self.album.unwrap_or_default();
        let album = (!album_name.is_empty() || self.num_tracks.is_some()).then(|| Album {
            name: album_name,
            num_tracks: self.num_tracks,
        });

        Ok(Track {
            uri,
            name: self.title.unwrap_or_default(),
            artists,
            album,
            track_no: self.track_no,
            date: self.date,
            length: self.length_ms.filter(|&ms| ms > 0),
        })
    }
}

/// `YYYY-MM-DD`, or a bare year taken as January 1st. Empty means no date.
fn parse_date(value: &str, line: usize) -> AppResult<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    value
        .parse::<i32>()
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(Some)
        .ok_or_else(|| AppError::parse(line, format!("invalid Date value {:?}", value)))
}

/// Schemes stored without an authority part, e.g. `spotify:track:...`.
const OPAQUE_SCHEMES: &[&str] = &["spotify", "urn"];

/// True for values like `http://...` or `spotify:track:...`.
fn has_scheme(value: &str) -> bool {
    value.split_once(':').is_some_and(|(scheme, rest)| {
        let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

        let opaque = OPAQUE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str());

        valid && (rest.starts_with("//") || opaque)
    })
}

/// Split a `key: value` line. A bare `key:` has an empty value.
fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(": ")
        .or_else(|| line.strip_suffix(':').map(|key| (key, "")))
        .filter(|(key, _)| !key.is_empty())
}

/// Parse tag cache text.
///
/// Song `file` values that are not uris are resolved against `library_root`
/// into `file://` uris. Unknown fields are skipped.
///
/// # Errors
/// Returns [`AppError::Parse`] for malformed lines, bad numeric or date values
/// and an unterminated song list, and [`AppError::Configuration`] if a local
/// file has to be resolved without a library root.
pub fn parse_tag_cache(text: &str, library_root: &str) -> AppResult<TagCache> {
    let mut cache = TagCache::default();
    let mut section = Section::None;
    let mut current: Option<SongFields> = None;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end_matches('\r');
        last_line = line_no;

        match (section, line) {
            (_, "") => continue,
            (Section::None, INFO_BEGIN) => section = Section::Info,
            (Section::Info, INFO_END) => section = Section::None,
            (Section::None, SONG_LIST_BEGIN) => section = Section::Songs,
            (Section::Songs, SONG_LIST_END) => {
                if let Some(song) = current.take() {
                    cache.tracks.push(song.into_track(library_root)?);
                }
                section = Section::None;
            }
            (Section::None, _) => {}
            (Section::Info, _) => {
                if let Some((key, value)) = split_field(line) {
                    match key {
                        MPD_VERSION => cache.mpd_version = Some(value.to_string()),
                        FS_CHARSET => cache.fs_charset = Some(value.to_string()),
                        _ => {}
                    }
                }
            }
            (Section::Songs, _) => {
                let (key, value) = split_field(line).ok_or_else(|| {
                    AppError::parse(line_no, format!("expected 'key: value', found {:?}", line))
                })?;

                if key == SONG_KEY {
                    if let Some(song) = current.replace(SongFields::default()) {
                        cache.tracks.push(song.into_track(library_root)?);
                    }
                    continue;
                }

                let song = current
                    .as_mut()
                    .ok_or_else(|| AppError::parse(line_no, format!("{:?} before first key line", key)))?;
                song.set(key, value, line_no)?;
            }
        }
    }

    match section {
        Section::Songs => Err(AppError::parse(last_line, "missing 'songList end'")),
        Section::Info => Err(AppError::parse(last_line, "missing 'info_end'")),
        Section::None => {
            tracing::debug!(songs = cache.tracks.len(), "Parsed tag cache");
            Ok(cache)
        }
    }
}
