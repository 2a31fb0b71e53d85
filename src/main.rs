//! Cadence - writes a tag cache for a local music folder.
//!
//! Scans the configured music folder, reads tags from every audio file and
//! writes the resulting tag cache to `TAG_CACHE_FILE`, or stdout.

use std::io::{self, Write};
use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cadence::config::{self, Config, LogFormat};
use cadence::{library, tag_cache, AppError, PROTOCOL_VERSION};

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so stdout can carry the tag cache.
fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => {
            subscriber
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            subscriber
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
                .init();
        }
    }
}

/// Log an application error and turn it into an IO error for the exit status.
fn fail(error: AppError) -> io::Error {
    tracing::error!(error_code = %error.error_code(), error = %error, "Failed to build tag cache");

    match error {
        AppError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

fn main() -> io::Result<()> {
    // Initialize configuration
    let config = config::init();

    // Initialize logging
    init_tracing(config);

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuration validation failed");
        return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
    }

    let library_root = config.library_root().map_err(|e| {
        tracing::error!(error = %e, "Configuration validation failed");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    tracing::info!(music_folder = %library_root, "Scanning music library");

    let report = library::scan_library(Path::new(&library_root)).map_err(fail)?;
    let document = tag_cache::tag_cache_document(
        &report.tracks,
        &library_root,
        PROTOCOL_VERSION,
        &config.fs_charset,
    )
    .map_err(fail)?;
    let text = document.to_string();

    match &config.tag_cache_file {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| fail(e.into()))?;
            tracing::info!(
                path = %path.display(),
                songs = report.tracks.len(),
                "Wrote tag cache"
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
