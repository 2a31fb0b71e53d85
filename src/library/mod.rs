//! Local music library indexing.

pub mod scanner;

pub use scanner::{scan_library, ScanReport};
