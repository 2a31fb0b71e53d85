//! Single track field records.

use super::format::{date_value, duration_seconds, joined_artist_names, track_number};
use super::path::relative_path;
use super::{keys, FieldRecord};
use crate::error::AppResult;
use crate::models::Track;

/// Build the field record for one track.
///
/// Fields are emitted in the order `file, Time, Artist, Title, Album, Track,
/// Date`, all of them always present. `Pos` and `Id` follow only when the
/// caller supplies them, independently of each other.
///
/// # Errors
/// Fails only if the track has a local file uri and `library_root` is empty.
pub fn track_record(
    track: &Track,
    library_root: &str,
    position: Option<usize>,
    id: Option<u32>,
) -> AppResult<FieldRecord> {
    let mut record = FieldRecord::new();

    record.push(keys::FILE, relative_path(Some(track.uri.as_str()), library_root)?);
    record.push(keys::TIME, duration_seconds(track.length));
    record.push(keys::ARTIST, joined_artist_names(&track.artists));
    record.push(keys::TITLE, track.name.as_str());
    record.push(
        keys::ALBUM,
        track
            .album
            .as_ref()
            .map(|album| album.name.as_str())
            .unwrap_or_default(),
    );
    record.push(keys::TRACK, track_number(track.track_no, track.album.as_ref()));
    record.push(keys::DATE, date_value(track.date));

    if let Some(position) = position {
        record.push(keys::POS, position);
    }
    if let Some(id) = id {
        record.push(keys::ID, id);
    }

    Ok(record)
}
