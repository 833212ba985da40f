//! Dump File Loader Domain
//!
//! Handles file I/O for `.syx` and `.bin` dumps, including format
//! auto-detection.

pub mod loader;

pub use loader::{read_all_bytes, write_all_bytes, DumpFileLoader};

use crate::{Dump, Result};
use std::path::Path;

/// Convenience function to load a dump file from disk
pub fn load_file(path: impl AsRef<Path>) -> Result<Dump> {
    DumpFileLoader::load(path.as_ref())
}

/// Convenience function to write a dump file, format chosen by extension
pub fn save_file(path: impl AsRef<Path>, dump: &Dump) -> Result<()> {
    DumpFileLoader::save(path.as_ref(), dump)
}
