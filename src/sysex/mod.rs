//! SysEx Domain
//!
//! Framing of Roland System Exclusive messages: stream splitting, header
//! parsing, checksum verification and DT1 frame construction.

pub mod frame;
pub mod splitter;

pub use frame::{build_dt1, checksum, SysexFrame, COMMAND_DT1, D50_MODEL_ID, ROLAND_ID};
pub use splitter::split_sysex;
