//! Dump Formats
//!
//! Assemblers turning interchange files into a [`Dump`] and back:
//! - [`syx`]: SysEx streams through the virtual parameter memory
//! - [`bin`]: bank dump files with flat patch records

#[cfg(feature = "bin-format")]
pub mod bin;
#[cfg(feature = "syx-format")]
pub mod syx;

use crate::{Dump, Result};
use std::path::Path;

/// Codec between a file format and [`Dump`]
pub trait DumpFormat {
    /// Decode a complete file
    fn decode(&self, data: &[u8]) -> Result<Dump>;

    /// Encode a dump into a complete file
    fn encode(&self, dump: &Dump) -> Result<Vec<u8>>;

    /// Human readable format name
    fn name(&self) -> &str;
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// MIDI System Exclusive stream (`.syx`)
    Syx,
    /// Bank dump file (`.bin`)
    Bin,
}

/// Bank dump file signature
pub const BANK_SIGNATURE: &[u8] = b"KoaBankFile00003PG-D50";

impl FormatKind {
    /// Detect the format from leading bytes
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(BANK_SIGNATURE) {
            Some(FormatKind::Bin)
        } else if data.first() == Some(&0xF0) {
            Some(FormatKind::Syx)
        } else {
            None
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "syx" => Some(FormatKind::Syx),
            "bin" => Some(FormatKind::Bin),
            _ => None,
        }
    }

    /// Format name as shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Syx => "SysEx",
            FormatKind::Bin => "Bank dump",
        }
    }
}
