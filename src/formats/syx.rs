//! SysEx (.syx) format
//!
//! Decoding replays every frame of the stream into a [`VirtualMemory`] in
//! stream order, then reads the 64 patch windows and 32 reverb windows back
//! out of it. Encoding renders a dump into a fresh memory image and cuts it
//! into DT1 frames.

use super::DumpFormat;
use crate::memory::{
    address_to_offset, offset_to_address, Address, VirtualMemory, PATCH_BASE_ADDRESS, PATCH_COUNT,
    PATCH_DATA_LEN, REVERB_BASE_ADDRESS, REVERB_COUNT, REVERB_DATA_LEN,
};
use crate::patch::{Patch, PatchLayout, TextEncoding};
use crate::sysex::{build_dt1, split_sysex, SysexFrame};
use crate::{D50Error, Dump, Result};

/// Default payload bytes per encoded DT1 frame
pub const DEFAULT_CHUNK_LEN: usize = 256;

/// SysEx stream codec
#[derive(Debug, Clone, Copy)]
pub struct SyxFormat {
    /// Placement of the parameter blocks inside each patch window
    pub layout: PatchLayout,
    /// Device id written into encoded frames (0x00 = unit 1)
    pub device_id: u8,
    /// Payload bytes per encoded frame
    pub chunk_len: usize,
    /// Run [`Dump::validate`] before encoding
    pub validate_on_encode: bool,
}

impl Default for SyxFormat {
    fn default() -> Self {
        SyxFormat {
            layout: PatchLayout::D50,
            device_id: 0x00,
            chunk_len: DEFAULT_CHUNK_LEN,
            validate_on_encode: true,
        }
    }
}

fn patch_address(index: usize) -> Result<Address> {
    offset_to_address(address_to_offset(PATCH_BASE_ADDRESS)? + index * PATCH_DATA_LEN)
}

fn reverb_address(index: usize) -> Result<Address> {
    offset_to_address(address_to_offset(REVERB_BASE_ADDRESS)? + index * REVERB_DATA_LEN)
}

impl SyxFormat {
    /// Apply every frame of `data` to a fresh memory image
    pub fn load_memory(&self, data: &[u8]) -> Result<VirtualMemory> {
        let mut memory = VirtualMemory::new();
        let frames = split_sysex(data)?;

        for raw in &frames {
            let frame = SysexFrame::parse(raw)?;
            if !frame.checksum_valid {
                tracing::warn!(
                    address = %frame.address,
                    expected = frame.expected_checksum(),
                    found = frame.checksum,
                    "SysEx checksum mismatch"
                );
            }
            memory.write(frame.address, frame.payload)?;
        }

        tracing::debug!(frames = frames.len(), "applied SysEx stream");
        Ok(memory)
    }

    /// Decode the patches and reverb blocks held by `memory`
    pub fn decode_memory(&self, memory: &VirtualMemory) -> Result<Dump> {
        let patches = (0..PATCH_COUNT)
            .map(|i| {
                memory
                    .patch(i)
                    .and_then(|record| Patch::parse(record, &self.layout, TextEncoding::Device))
            })
            .collect::<Result<Vec<_>>>()?;

        let reverbs = (0..REVERB_COUNT)
            .map(|i| memory.reverb(i).map(<[u8]>::to_vec))
            .collect::<Result<Vec<_>>>()?;

        Ok(Dump {
            patches,
            reverb_data: Some(reverbs),
        })
    }

    /// Render `dump` into a memory image
    pub fn render_memory(&self, dump: &Dump) -> Result<VirtualMemory> {
        if dump.patches.len() > PATCH_COUNT {
            return Err(D50Error::OutOfRange(format!(
                "Dump holds {} patches, memory holds {}",
                dump.patches.len(),
                PATCH_COUNT
            )));
        }

        let mut memory = VirtualMemory::new();
        for (i, patch) in dump.patches.iter().enumerate() {
            let record = patch.encode(&self.layout, TextEncoding::Device)?;
            memory.write(patch_address(i)?, &record)?;
        }

        for (i, reverb) in dump.reverb_data.iter().flatten().enumerate() {
            if i >= REVERB_COUNT || reverb.len() > REVERB_DATA_LEN {
                return Err(D50Error::OutOfRange(format!(
                    "Reverb block {} ({} bytes) does not fit the reverb area",
                    i,
                    reverb.len()
                )));
            }
            memory.write(reverb_address(i)?, reverb)?;
        }

        Ok(memory)
    }
}

impl DumpFormat for SyxFormat {
    fn decode(&self, data: &[u8]) -> Result<Dump> {
        let memory = self.load_memory(data)?;
        self.decode_memory(&memory)
    }

    fn encode(&self, dump: &Dump) -> Result<Vec<u8>> {
        if self.chunk_len == 0 {
            return Err(D50Error::Format("SysEx chunk length must be non-zero".to_string()));
        }
        if self.validate_on_encode {
            dump.validate()?;
        }

        let memory = self.render_memory(dump)?;
        let end = if dump.reverb_data.is_some() {
            address_to_offset(REVERB_BASE_ADDRESS)? + REVERB_COUNT * REVERB_DATA_LEN
        } else {
            address_to_offset(PATCH_BASE_ADDRESS)? + PATCH_COUNT * PATCH_DATA_LEN
        };
        let image = &memory.as_bytes()[..end];
        if let Some(pos) = image.iter().position(|&b| b > 0x7F) {
            return Err(D50Error::Format(format!(
                "Byte 0x{:02X} at offset {} cannot be sent as SysEx data",
                image[pos], pos
            )));
        }

        let mut data = Vec::new();
        for (i, chunk) in image.chunks(self.chunk_len).enumerate() {
            let address = offset_to_address(i * self.chunk_len)?;
            data.extend(build_dt1(self.device_id, address, chunk));
        }

        tracing::debug!(
            frames = image.len().div_ceil(self.chunk_len),
            bytes = data.len(),
            "encoded SysEx stream"
        );
        Ok(data)
    }

    fn name(&self) -> &str {
        "SysEx"
    }
}
