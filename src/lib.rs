//! Cadence - metadata serialization for an MPD-style music server.
//!
//! Turns tracks and playlists into the ordered `Key: value` records returned
//! to protocol clients, and into the tag cache file used to persist and
//! reload the library index.

pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod tag_cache;
pub mod translator;

pub use error::{AppError, AppResult};

/// Protocol version advertised in the tag cache header.
pub const PROTOCOL_VERSION: &str = "0.16.0";

/// Filesystem charset recorded in the tag cache header unless configured.
pub const DEFAULT_FS_CHARSET: &str = "utf-8";
