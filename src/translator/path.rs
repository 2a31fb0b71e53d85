//! Mapping between storage uris and protocol relative paths.

use std::borrow::Cow;

use crate::error::{AppError, AppResult};

const FILE_SCHEME: &str = "file://";

/// Rewrite a storage uri into the path clients see.
///
/// Local `file://` uris below `library_root` lose the scheme and the root,
/// keeping the leading `/`. Anything else (streams, other schemes) is passed
/// through untouched. An absent or empty uri maps to the empty string.
///
/// # Errors
/// Returns [`AppError::Configuration`] if a local file uri has to be mapped
/// while `library_root` is empty.
pub fn relative_path(uri: Option<&str>, library_root: &str) -> AppResult<String> {
    let uri = match uri {
        Some(uri) if !uri.is_empty() => uri,
        _ => return Ok(String::new()),
    };

    let Some(encoded) = uri.strip_prefix(FILE_SCHEME) else {
        return Ok(uri.to_string());
    };

    if library_root.is_empty() {
        return Err(AppError::missing_library_root(uri));
    }

    let path = urlencoding::decode(encoded)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| encoded.to_string());
    let root = library_root.trim_end_matches('/');

    if let Some(rest) = path.strip_prefix(root) {
        if rest.is_empty() || rest.starts_with('/') {
            return Ok(rest.to_string());
        }
    }

    tracing::debug!(uri = %uri, library_root = %library_root, "File is outside the music folder");
    Ok(path)
}

/// Build a `file://` uri for a path relative to `library_root`.
pub fn file_uri(library_root: &str, relative: &str) -> String {
    let path = format!(
        "{}/{}",
        library_root.trim_end_matches('/'),
        relative.trim_start_matches('/')
    );
    let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();

    format!("{}{}", FILE_SCHEME, encoded.join("/"))
}

/// Final segment of a `/`-separated path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
