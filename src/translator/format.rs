//! Scalar field formatting.

use chrono::NaiveDate;

use super::Value;
use crate::models::{Album, Artist};

/// Track length in whole seconds, truncating. Unknown length is 0.
pub fn duration_seconds(length_ms: Option<u64>) -> u64 {
    length_ms.map(|ms| ms / 1000).unwrap_or(0)
}

/// Artist names joined with `", "`.
pub fn joined_artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"<track_no>/<total>"` when the album knows its track count, otherwise the
/// bare track number. A declared total of 0 counts as unknown.
pub fn track_number(track_no: u32, album: Option<&Album>) -> Value {
    match album.and_then(|album| album.num_tracks) {
        Some(total) if total > 0 => Value::Text(format!("{}/{}", track_no, total)),
        _ => Value::from(track_no),
    }
}

pub fn date_value(date: Option<NaiveDate>) -> Value {
    date.map(Value::Date).unwrap_or_else(|| Value::Text(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_seconds() {
        assert_eq!(duration_seconds(None), 0);
        assert_eq!(duration_seconds(Some(137000)), 137);
        assert_eq!(duration_seconds(Some(137999)), 137);
        assert_eq!(duration_seconds(Some(999)), 0);
    }

    #[test]
    fn test_joined_artist_names() {
        let artists = [Artist::new("ABBA"), Artist::new("Beatles")];
        assert_eq!(joined_artist_names(&artists), "ABBA, Beatles");
        assert_eq!(joined_artist_names(&[Artist::new("an artist")]), "an artist");
        assert_eq!(joined_artist_names(&[]), "");
    }

    #[test]
    fn test_track_number_with_album_total() {
        let album = Album::new("an album").with_num_tracks(13);
        assert_eq!(track_number(7, Some(&album)), Value::Text("7/13".to_string()));
    }

    #[test]
    fn test_track_number_without_total() {
        assert_eq!(track_number(7, None), Value::Int(7));
        assert_eq!(track_number(7, Some(&Album::new("an album"))), Value::Int(7));
        assert_eq!(
            track_number(7, Some(&Album::new("an album").with_num_tracks(0))),
            Value::Int(7)
        );
    }

    #[test]
    fn test_date_value() {
        assert_eq!(date_value(None), Value::Text(String::new()));

        let date = NaiveDate::from_ymd_opt(1977, 1, 1).unwrap();
        assert_eq!(date_value(Some(date)), Value::Date(date));
    }
}
