//! Roland D-50 parameter memory emulation and dump codecs
//!
//! Reconstructs the D-50's internal parameter memory from the two common
//! interchange formats and serializes it back:
//!
//! - MIDI System Exclusive streams (`.syx`): DT1 frames are written into an
//!   address-mapped [`VirtualMemory`] and decoded from there.
//! - Bank dump files (`.bin`): a signature followed by 64 flat patch records.
//!
//! Both paths produce the same typed [`Dump`] (64 [`Patch`]es plus optional
//! opaque reverb blocks).
//!
//! # Crate feature flags
//! - `syx-format` (default): SysEx splitter/frame parser and [`SyxFormat`]
//! - `bin-format` (default): bank dump codec and [`BinFormat`]
//! - `cli` (default): the `d50` command line tool (`clap`, `tracing-subscriber`)
//!
//! # Quick start
//! ```no_run
//! # #[cfg(feature = "syx-format")]
//! # {
//! use d50::formats::DumpFormat;
//! use d50::SyxFormat;
//! let data = std::fs::read("factory.syx").unwrap();
//! let dump = SyxFormat::default().decode(&data).unwrap();
//! println!("{}", dump.patches[0].common.name);
//! # }
//! ```

#![warn(missing_docs)]

use std::path::PathBuf;

pub mod dump; // Dump root structure
pub mod formats; // SysEx / bank dump assemblers
pub mod loader; // File I/O
pub mod memory; // Address space & virtual memory
pub mod patch; // Patch model & field codec
#[cfg(feature = "syx-format")]
pub mod sysex; // SysEx framing

/// Error types for D-50 dump operations
#[derive(thiserror::Error, Debug)]
pub enum D50Error {
    /// Malformed input: bad signature, frame framing, truncated data or wrong counts
    #[error("Format error: {0}")]
    Format(String),

    /// Address or index outside the addressable/allocated region
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A decoded field value exceeds its declared maximum
    #[error("Value {value} of {unit} field '{field}' exceeds maximum {max}")]
    Range {
        /// Parameter block kind (`patch`, `tone` or `partial`)
        unit: &'static str,
        /// Field name
        field: &'static str,
        /// Offending byte value
        value: u8,
        /// Declared maximum
        max: u8,
    },

    /// IO error from the filesystem
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for dump operations
pub type Result<T> = std::result::Result<T, D50Error>;

// Public API exports
pub use dump::{Dump, ReverbData};
pub use memory::{address_to_offset, offset_to_address, Address, VirtualMemory};
pub use patch::{Patch, PatchCommon, PatchLayout, PatchTone, TextEncoding, ToneCommon, TonePartial};

#[cfg(feature = "bin-format")]
pub use formats::bin::{join_bank, split_bank, BinFormat};
#[cfg(feature = "syx-format")]
pub use formats::syx::SyxFormat;
pub use formats::{DumpFormat, FormatKind};
pub use loader::{load_file, save_file, DumpFileLoader};
#[cfg(feature = "syx-format")]
pub use sysex::{split_sysex, SysexFrame};
