//! Sub-block placement inside a patch record
//!
//! Positions are stored as the device addresses of patch 0's sub-blocks and
//! turned into record offsets through [`address_to_offset`].

use crate::memory::{address_to_offset, Address, BLOCK_LEN};
use crate::{D50Error, Result};

/// Sub-block addresses of one tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneLayout {
    /// Partial 1 block
    pub partial1: Address,
    /// Partial 2 block
    pub partial2: Address,
    /// Tone common block
    pub common: Address,
}

/// Sub-block addresses of one patch record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchLayout {
    /// Upper tone blocks
    pub upper: ToneLayout,
    /// Lower tone blocks
    pub lower: ToneLayout,
    /// Patch common block
    pub common: Address,
}

impl PatchLayout {
    /// D-50 memory order: UP1, UP2, UCommon, LP1, LP2, LCommon, Patch
    pub const D50: PatchLayout = PatchLayout {
        upper: ToneLayout {
            partial1: Address::new(0x02, 0x00, 0x00),
            partial2: Address::new(0x02, 0x00, 0x40),
            common: Address::new(0x02, 0x01, 0x00),
        },
        lower: ToneLayout {
            partial1: Address::new(0x02, 0x01, 0x40),
            partial2: Address::new(0x02, 0x02, 0x00),
            common: Address::new(0x02, 0x02, 0x40),
        },
        common: Address::new(0x02, 0x03, 0x00),
    };

    /// The 64-byte block at `at` within `record`
    pub fn block<'a>(&self, record: &'a [u8], at: Address) -> Result<&'a [u8]> {
        let offset = address_to_offset(at)?;
        record.get(offset..offset + BLOCK_LEN).ok_or_else(|| {
            D50Error::OutOfRange(format!(
                "Sub-block {} at offset {} exceeds record of {} bytes",
                at,
                offset,
                record.len()
            ))
        })
    }

    /// Mutable counterpart of [`PatchLayout::block`]
    pub fn block_mut<'a>(&self, record: &'a mut [u8], at: Address) -> Result<&'a mut [u8]> {
        let offset = address_to_offset(at)?;
        let len = record.len();
        record.get_mut(offset..offset + BLOCK_LEN).ok_or_else(|| {
            D50Error::OutOfRange(format!(
                "Sub-block {} at offset {} exceeds record of {} bytes",
                at, offset, len
            ))
        })
    }
}

impl Default for PatchLayout {
    fn default() -> Self {
        PatchLayout::D50
    }
}
