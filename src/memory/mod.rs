//! Memory Domain
//!
//! Address-mapped emulation of the D-50 parameter memory: the 7-bit address
//! space and the byte buffer SysEx frames are written into.

pub mod address;
pub mod virtual_memory;

pub use address::{
    address_to_offset, offset_to_address, Address, BLOCK_LEN, MEMORY_LEN, PATCH_BASE_ADDRESS,
    PATCH_BLOCKS, PATCH_COUNT, PATCH_DATA_LEN, REVERB_BASE_ADDRESS, REVERB_COUNT, REVERB_DATA_LEN,
};
pub use virtual_memory::VirtualMemory;
