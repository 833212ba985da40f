//! D-50 Address Space
//!
//! The D-50 addresses its parameter memory with three 7-bit components
//! (`[msb, mid, lsb]`). Every fixed location used by the codecs is expressed
//! as an [`Address`] and converted through [`address_to_offset`].

use crate::{D50Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of values held by one 7-bit address component
pub const COMPONENT_SPAN: usize = 128;

/// Size of one parameter sub-block (partial, tone common or patch common)
pub const BLOCK_LEN: usize = 64;
/// Sub-blocks per patch: UP1, UP2, UCommon, LP1, LP2, LCommon, Patch
pub const PATCH_BLOCKS: usize = 7;
/// Bytes of parameter data per patch
pub const PATCH_DATA_LEN: usize = PATCH_BLOCKS * BLOCK_LEN;
/// Bytes of data per reverb block
pub const REVERB_DATA_LEN: usize = 376;
/// Number of patches held by the device
pub const PATCH_COUNT: usize = 64;
/// Number of reverb blocks held by the device
pub const REVERB_COUNT: usize = 32;
/// Length of the emulated memory region (all patches, then all reverb blocks)
pub const MEMORY_LEN: usize = PATCH_DATA_LEN * PATCH_COUNT + REVERB_DATA_LEN * REVERB_COUNT;

/// Address of the first mapped byte (patch 0, upper partial 1)
pub const PATCH_BASE_ADDRESS: Address = Address::new(0x02, 0x00, 0x00);
/// Address of the first reverb block
pub const REVERB_BASE_ADDRESS: Address = Address::new(0x03, 0x60, 0x00);

/// Three-component device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 3]);

impl Address {
    /// Create an address from its components (not validated until mapped)
    pub const fn new(msb: u8, mid: u8, lsb: u8) -> Self {
        Address([msb, mid, lsb])
    }

    /// Address components, most significant first
    pub fn components(&self) -> [u8; 3] {
        self.0
    }

    /// Whether every component fits in 7 bits
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|&c| (c as usize) < COMPONENT_SPAN)
    }

    /// Linear position in the device's full 21-bit address space
    const fn linear(&self) -> usize {
        (self.0[0] as usize) * COMPONENT_SPAN * COMPONENT_SPAN
            + (self.0[1] as usize) * COMPONENT_SPAN
            + self.0[2] as usize
    }
}

impl From<[u8; 3]> for Address {
    fn from(components: [u8; 3]) -> Self {
        Address(components)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:02X} {:02X} {:02X}]", self.0[0], self.0[1], self.0[2])
    }
}

/// Map an address to a byte offset inside the emulated memory region.
///
/// Fails with [`D50Error::OutOfRange`] when a component exceeds 7 bits or the
/// address lies before [`PATCH_BASE_ADDRESS`] or past [`MEMORY_LEN`].
pub fn address_to_offset(address: Address) -> Result<usize> {
    if !address.is_valid() {
        return Err(D50Error::OutOfRange(format!(
            "Address {} has a component above 0x7F",
            address
        )));
    }

    let offset = address
        .linear()
        .checked_sub(PATCH_BASE_ADDRESS.linear())
        .ok_or_else(|| {
            D50Error::OutOfRange(format!(
                "Address {} lies before the mapped region at {}",
                address, PATCH_BASE_ADDRESS
            ))
        })?;

    if offset >= MEMORY_LEN {
        return Err(D50Error::OutOfRange(format!(
            "Address {} maps to offset {} beyond memory length {}",
            address, offset, MEMORY_LEN
        )));
    }

    Ok(offset)
}

/// Inverse of [`address_to_offset`].
pub fn offset_to_address(offset: usize) -> Result<Address> {
    if offset >= MEMORY_LEN {
        return Err(D50Error::OutOfRange(format!(
            "Offset {} is beyond memory length {}",
            offset, MEMORY_LEN
        )));
    }

    let linear = PATCH_BASE_ADDRESS.linear() + offset;
    Ok(Address::new(
        (linear / (COMPONENT_SPAN * COMPONENT_SPAN)) as u8,
        ((linear / COMPONENT_SPAN) % COMPONENT_SPAN) as u8,
        (linear % COMPONENT_SPAN) as u8,
    ))
}
