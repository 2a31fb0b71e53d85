//! Music folder scanning.

use chrono::NaiveDate;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::prelude::Accessor;
use lofty::read_from_path;
use lofty::tag::{ItemKey, Tag};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{AppError, AppResult};
use crate::models::{Album, Artist, Track};
use crate::translator::file_uri;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "wav", "m4a", "aac", "wma", "opus", "aiff", "ape",
];

/// Outcome of a library scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Tracks read successfully, ordered by path.
    pub tracks: Vec<Track>,
    /// Audio files whose tags could not be read.
    pub skipped: Vec<PathBuf>,
}

/// Check if a file has a supported audio extension.
fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recording date from the tag, falling back to the year alone.
fn tag_date(tag: &Tag) -> Option<NaiveDate> {
    tag.get_string(&ItemKey::RecordingDate)
        .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok())
        .or_else(|| {
            tag.year()
                .and_then(|year| NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1))
        })
}

/// Read one audio file into a track.
///
/// Returns `None` if lofty cannot make sense of the file.
fn read_track(path: &Path, music_folder: &Path) -> Option<Track> {
    let tagged_file = match read_from_path(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read audio file");
            return None;
        }
    };
    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
    let properties = tagged_file.properties();

    let relative = path.strip_prefix(music_folder).unwrap_or(path);
    let mut track = Track::new(file_uri(
        &music_folder.to_string_lossy(),
        &relative.to_string_lossy(),
    ))
    .with_length(properties.duration().as_millis() as u64);

    let Some(tag) = tag else {
        return Some(track);
    };

    track.name = tag.title().map(|s| s.to_string()).unwrap_or_default();
    if let Some(artist) = tag.artist() {
        track.artists.push(Artist::new(artist));
    }
    track.track_no = tag.track().unwrap_or(0);
    track.date = tag_date(tag);

    let album_name = tag.album().map(|s| s.to_string());
    let num_tracks = tag.track_total().filter(|&total| total > 0);
    if album_name.is_some() || num_tracks.is_some() {
        track.album = Some(Album {
            name: album_name.unwrap_or_default(),
            num_tracks,
        });
    }

    Some(track)
}

/// Scan `music_folder` recursively for audio files.
///
/// Files are visited in file name order so repeated scans produce the same
/// tag cache. Unreadable audio files are reported in
/// [`ScanReport::skipped`] rather than failing the scan.
///
/// # Errors
/// Returns [`AppError::Configuration`] if the music folder does not exist or
/// is not a directory.
pub fn scan_library(music_folder: &Path) -> AppResult<ScanReport> {
    if !music_folder.is_dir() {
        return Err(AppError::Configuration(format!(
            "Music folder is not a readable directory: {}",
            music_folder.display()
        )));
    }

    let mut report = ScanReport::default();

    for entry in WalkDir::new(music_folder)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio_file(path) {
            continue;
        }

        match read_track(path, music_folder) {
            Some(track) => report.tracks.push(track),
            None => report.skipped.push(path.to_path_buf()),
        }
    }

    tracing::info!(
        music_folder = %music_folder.display(),
        tracks = report.tracks.len(),
        skipped = report.skipped.len(),
        "Library scan complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::config::WriteOptions;
    use lofty::prelude::TagExt;
    use lofty::tag::TagType;
    use std::fs;

    /// Write one second of 8 kHz mono 8-bit PCM silence.
    fn write_silent_wav(path: &Path) {
        const SAMPLE_RATE: u32 = 8000;
        let data = vec![0x80u8; SAMPLE_RATE as usize];

        let mut wav = Vec::with_capacity(44 + data.len());
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate
        wav.extend_from_slice(&1u16.to_le_bytes()); // block align
        wav.extend_from_slice(&8u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data.len() as u32).to_le_bytes());
        wav.extend_from_slice(&data);

        fs::write(path, wav).unwrap();
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("song.mp3")));
        assert!(is_audio_file(Path::new("song.FLAC")));
        assert!(is_audio_file(Path::new("music/album/song.opus")));
        assert!(!is_audio_file(Path::new("image.jpg")));
        assert!(!is_audio_file(Path::new("noextension")));
    }

    #[test]
    fn test_scan_missing_folder_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = scan_library(&missing).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_scan_file_instead_of_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"").unwrap();

        assert!(scan_library(&file).is_err());
    }

    #[test]
    fn test_scan_skips_non_audio_and_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("album")).unwrap();
        fs::write(dir.path().join("cover.jpg"), b"not audio").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        fs::write(dir.path().join("album/broken.ogg"), b"definitely not an ogg stream").unwrap();

        let report = scan_library(dir.path()).unwrap();

        assert!(report.tracks.is_empty());
        assert_eq!(report.skipped, vec![dir.path().join("album/broken.ogg")]);
    }

    #[test]
    fn test_scan_untagged_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("album")).unwrap();
        write_silent_wav(&dir.path().join("album/silence.wav"));

        let report = scan_library(dir.path()).unwrap();

        assert!(report.skipped.is_empty());
        assert_eq!(report.tracks.len(), 1);

        let track = &report.tracks[0];
        let root = dir.path().to_string_lossy();
        assert_eq!(track.uri, file_uri(&root, "album/silence.wav"));
        assert_eq!(track.length, Some(1000));
        assert!(track.name.is_empty());
        assert!(track.artists.is_empty());
        assert!(track.album.is_none());
        assert_eq!(track.track_no, 0);
    }

    #[test]
    fn test_scan_reads_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.wav");
        write_silent_wav(&path);

        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_title("a name".to_string());
        tag.set_artist("an artist".to_string());
        tag.set_album("an album".to_string());
        tag.set_track(7);
        tag.set_track_total(13);
        tag.set_year(1977);
        tag.save_to_path(&path, WriteOptions::default()).unwrap();

        let report = scan_library(dir.path()).unwrap();
        assert_eq!(report.tracks.len(), 1);

        let track = &report.tracks[0];
        assert_eq!(track.uri, file_uri(&dir.path().to_string_lossy(), "song.wav"));
        assert_eq!(track.name, "a name");
        assert_eq!(track.artists, vec![Artist::new("an artist")]);
        assert_eq!(
            track.album,
            Some(Album::new("an album").with_num_tracks(13))
        );
        assert_eq!(track.track_no, 7);
        assert_eq!(track.date, NaiveDate::from_ymd_opt(1977, 1, 1));
        assert_eq!(track.length, Some(1000));
    }

    #[test]
    fn test_scan_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let report = scan_library(dir.path()).unwrap();
        assert!(report.tracks.is_empty());
        assert!(report.skipped.is_empty());
    }
}
