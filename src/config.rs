//! Application configuration management.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The serializers never read this directly; callers pass the music folder
//! in as the library root.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::DEFAULT_FS_CHARSET;

/// Global configuration instance.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the music folder (the library root).
    pub music_folder: PathBuf,
    /// Where to write the tag cache. `None` writes to stdout.
    pub tag_cache_file: Option<PathBuf>,
    /// Filesystem charset recorded in the tag cache header.
    pub fs_charset: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json or pretty).
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable colored output.
    Pretty,
    /// JSON structured logging.
    Json,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let music_folder = PathBuf::from(
            std::env::var("MUSIC_FOLDER").unwrap_or_else(|_| "./music".to_string()),
        );

        let tag_cache_file = std::env::var("TAG_CACHE_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let fs_charset =
            std::env::var("FS_CHARSET").unwrap_or_else(|_| DEFAULT_FS_CHARSET.to_string());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            music_folder,
            tag_cache_file,
            fs_charset,
            log_level,
            log_format,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.music_folder.as_os_str().is_empty() {
            return Err(ConfigError::MusicFolderNotSet);
        }

        if !self.music_folder.exists() {
            return Err(ConfigError::MusicFolderNotFound(
                self.music_folder.display().to_string(),
            ));
        }

        if !self.music_folder.is_dir() {
            return Err(ConfigError::MusicFolderNotDirectory(
                self.music_folder.display().to_string(),
            ));
        }

        if self.fs_charset.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "FS_CHARSET",
                "must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The music folder as an absolute path string, for use as the library root.
    ///
    /// # Errors
    /// Returns an error if the folder cannot be resolved.
    pub fn library_root(&self) -> Result<String, ConfigError> {
        let root = self.music_folder.canonicalize().map_err(|e| {
            ConfigError::MusicFolderUnresolvable(self.music_folder.display().to_string(), e)
        })?;

        Ok(root.to_string_lossy().into_owned())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Music folder is not set")]
    MusicFolderNotSet,

    #[error("Music folder not found: {0}")]
    MusicFolderNotFound(String),

    #[error("Music folder is not a directory: {0}")]
    MusicFolderNotDirectory(String),

    #[error("Failed to resolve music folder '{0}': {1}")]
    MusicFolderUnresolvable(String, std::io::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Initialize the global configuration.
///
/// Should be called once at application startup.
pub fn init() -> &'static Config {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        Config::from_env()
    })
}
