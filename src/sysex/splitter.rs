//! SysEx stream splitter
//!
//! Cuts a raw `.syx` byte stream into frames. Each frame runs from the byte
//! after the previous 0xF7 terminator up to and including the next one.
//! Bytes after the last terminator are ignored.

use super::frame::{SYSEX_END, SYSEX_START};
use crate::{D50Error, Result};

/// Split `data` into raw frames, terminator included.
///
/// Fails with [`D50Error::Format`] when a frame does not begin with 0xF0.
pub fn split_sysex(data: &[u8]) -> Result<Vec<&[u8]>> {
    let mut frames = Vec::new();
    let mut start = 0usize;

    for (i, _) in data.iter().enumerate().filter(|&(_, &b)| b == SYSEX_END) {
        let frame = &data[start..=i];
        if frame[0] != SYSEX_START {
            return Err(D50Error::Format(format!(
                "Wrong SYX file format: frame at byte {} starts with 0x{:02X}",
                start, frame[0]
            )));
        }
        frames.push(frame);
        start = i + 1;
    }

    Ok(frames)
}
