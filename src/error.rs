//! Application error types.
//!
//! Serializers only ever fail on configuration; the tag cache reader and the
//! library scanner add parse and I/O failures on top.

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required configuration is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed tag cache input.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get the error code string.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Create a configuration error for a file uri mapped without a library root.
    pub fn missing_library_root(uri: &str) -> Self {
        Self::Configuration(format!(
            "Music folder is not configured, cannot map local file uri: {}",
            uri
        ))
    }

    /// Create a parse error for a given 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
