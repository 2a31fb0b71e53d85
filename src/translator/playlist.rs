//! Multi-track field records for playlist queries.

use std::ops::Range;

use super::track::track_record;
use super::FieldRecord;
use crate::error::AppResult;
use crate::models::{Playlist, QueuedTrack};

/// Clamp optional `[start, end)` bounds to a slice of `len` items.
fn slice_range(len: usize, start: Option<usize>, end: Option<usize>) -> Option<Range<usize>> {
    let start = start.unwrap_or(0);
    let end = end.map_or(len, |end| end.min(len));

    (start < end).then_some(start..end)
}

/// Field records for the tracks of `playlist` within `[start, end)`.
///
/// Missing bounds default to the whole playlist. Bounds past the end or an
/// empty range produce no records. No `Pos`/`Id` fields are added.
pub fn playlist_records(
    playlist: &Playlist,
    library_root: &str,
    start: Option<usize>,
    end: Option<usize>,
) -> AppResult<Vec<FieldRecord>> {
    let Some(range) = slice_range(playlist.len(), start, end) else {
        tracing::debug!(len = playlist.len(), ?start, ?end, "Empty playlist range");
        return Ok(Vec::new());
    };

    tracing::debug!(len = playlist.len(), ?range, "Serializing playlist");

    playlist.tracks[range]
        .iter()
        .map(|track| track_record(track, library_root, None, None))
        .collect()
}

/// Field records for the current playlist, each tagged with its queue
/// position and id.
///
/// `Pos` is the absolute index in `entries`, so a sliced response still
/// reports where each song sits in the full queue.
pub fn queue_records(
    entries: &[QueuedTrack],
    library_root: &str,
    start: Option<usize>,
    end: Option<usize>,
) -> AppResult<Vec<FieldRecord>> {
    let Some(range) = slice_range(entries.len(), start, end) else {
        return Ok(Vec::new());
    };

    entries[range.clone()]
        .iter()
        .zip(range)
        .map(|(entry, position)| {
            track_record(&entry.track, library_root, Some(position), Some(entry.id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;
    use crate::translator::Value;

    const ROOT: &str = "/dir/subdir";

    fn three_track_playlist() -> Playlist {
        Playlist::new(vec![
            Track::default().with_track_no(1),
            Track::default().with_track_no(2),
            Track::default().with_track_no(3),
        ])
    }

    #[test]
    fn test_playlist_without_range() {
        let records = playlist_records(&three_track_playlist(), ROOT, None, None).unwrap();
        assert_eq!(records.len(), 3);

        let tracks: Vec<_> = records.iter().map(|r| r.get("Track").cloned()).collect();
        assert_eq!(
            tracks,
            vec![Some(Value::Int(1)), Some(Value::Int(2)), Some(Value::Int(3))]
        );
        assert!(records.iter().all(|r| !r.contains("Pos") && !r.contains("Id")));
    }

    #[test]
    fn test_playlist_with_range() {
        let records = playlist_records(&three_track_playlist(), ROOT, Some(1), Some(2)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Track"), Some(&Value::Int(2)));
        assert!(!records[0].contains("Pos"));
    }

    #[test]
    fn test_playlist_with_open_ended_range() {
        let records = playlist_records(&three_track_playlist(), ROOT, Some(1), None).unwrap();
        assert_eq!(records.len(), 2);

        let records = playlist_records(&three_track_playlist(), ROOT, None, Some(1)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Track"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_playlist_out_of_range_is_empty() {
        let playlist = three_track_playlist();
        assert!(playlist_records(&playlist, ROOT, Some(5), Some(9)).unwrap().is_empty());
        assert!(playlist_records(&playlist, ROOT, Some(2), Some(1)).unwrap().is_empty());
        assert!(playlist_records(&playlist, ROOT, Some(1), Some(1)).unwrap().is_empty());
        assert_eq!(
            playlist_records(&playlist, ROOT, Some(2), Some(99)).unwrap().len(),
            1
        );
        assert!(playlist_records(&Playlist::default(), ROOT, None, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_queue_records_carry_absolute_positions() {
        let entries: Vec<_> = three_track_playlist()
            .tracks
            .into_iter()
            .zip([10, 11, 12])
            .map(|(track, id)| QueuedTrack::new(id, track))
            .collect();

        let records = queue_records(&entries, ROOT, Some(1), None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Pos"), Some(&Value::Int(1)));
        assert_eq!(records[0].get("Id"), Some(&Value::Int(11)));
        assert_eq!(records[1].get("Pos"), Some(&Value::Int(2)));
        assert_eq!(records[1].get("Id"), Some(&Value::Int(12)));
        assert_eq!(records[1].get("Track"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_queue_records_empty_range() {
        let entries = vec![QueuedTrack::new(1, Track::default())];
        assert!(queue_records(&entries, ROOT, Some(3), None).unwrap().is_empty());
    }
}
