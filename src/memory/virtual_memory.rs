//! Virtual Parameter Memory
//!
//! Zero-initialized byte image of the D-50 patch and reverb memory.
//! SysEx payloads are written at their device address; later writes to
//! overlapping ranges replace earlier ones.

use super::address::{
    address_to_offset, Address, MEMORY_LEN, PATCH_BASE_ADDRESS, PATCH_COUNT, PATCH_DATA_LEN,
    REVERB_BASE_ADDRESS, REVERB_COUNT, REVERB_DATA_LEN,
};
use crate::{D50Error, Result};

/// Emulated D-50 parameter memory
#[derive(Debug, Clone)]
pub struct VirtualMemory {
    memory: Vec<u8>,
}

impl VirtualMemory {
    /// Create a zeroed memory image
    pub fn new() -> Self {
        VirtualMemory {
            memory: vec![0u8; MEMORY_LEN],
        }
    }

    /// Length of the memory image in bytes
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Always false; the image has a fixed, non-zero length
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Whole memory image
    pub fn as_bytes(&self) -> &[u8] {
        &self.memory
    }

    /// Overwrite the bytes starting at `address` with `block`
    pub fn write(&mut self, address: Address, block: &[u8]) -> Result<()> {
        let offset = address_to_offset(address)?;
        let end = offset.checked_add(block.len()).filter(|&end| end <= self.memory.len());
        let Some(end) = end else {
            return Err(D50Error::OutOfRange(format!(
                "Memory cannot be updated with block of length {} at offset {}",
                block.len(),
                offset
            )));
        };

        tracing::trace!(%address, offset, len = block.len(), "memory write");
        self.memory[offset..end].copy_from_slice(block);
        Ok(())
    }

    fn block(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.memory
            .get(offset..offset.saturating_add(len))
            .filter(|block| block.len() == len)
            .ok_or_else(|| {
                D50Error::OutOfRange(format!(
                    "Cannot read memory block of length {} at offset {}",
                    len, offset
                ))
            })
    }

    /// Raw 448-byte parameter window of patch `index` (0-63)
    pub fn patch(&self, index: usize) -> Result<&[u8]> {
        if index >= PATCH_COUNT {
            return Err(D50Error::OutOfRange(format!(
                "Patch index {} exceeds {}",
                index,
                PATCH_COUNT - 1
            )));
        }
        let offset = address_to_offset(PATCH_BASE_ADDRESS)? + index * PATCH_DATA_LEN;
        self.block(offset, PATCH_DATA_LEN)
    }

    /// Raw 376-byte window of reverb block `index` (0-31)
    pub fn reverb(&self, index: usize) -> Result<&[u8]> {
        if index >= REVERB_COUNT {
            return Err(D50Error::OutOfRange(format!(
                "Reverb index {} exceeds {}",
                index,
                REVERB_COUNT - 1
            )));
        }
        let offset = address_to_offset(REVERB_BASE_ADDRESS)? + index * REVERB_DATA_LEN;
        self.block(offset, REVERB_DATA_LEN)
    }
}

impl Default for VirtualMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_is_zeroed() {
        let memory = VirtualMemory::new();
        assert_eq!(memory.len(), MEMORY_LEN);
        assert!(memory.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_then_read_patch() {
        let mut memory = VirtualMemory::new();
        // Patch 1 starts 448 bytes in: [02 03 40]
        memory.write(Address::new(0x02, 0x03, 0x40), &[1, 2, 3]).unwrap();

        let patch = memory.patch(1).unwrap();
        assert_eq!(patch.len(), PATCH_DATA_LEN);
        assert_eq!(&patch[..3], &[1, 2, 3]);
        assert!(memory.patch(0).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_later_write_wins() {
        let mut memory = VirtualMemory::new();
        memory.write(Address::new(0x02, 0x00, 0x00), &[0xAA; 8]).unwrap();
        memory.write(Address::new(0x02, 0x00, 0x04), &[0x55; 8]).unwrap();

        let patch = memory.patch(0).unwrap();
        assert_eq!(&patch[..4], &[0xAA; 4]);
        assert_eq!(&patch[4..12], &[0x55; 8]);
    }

    #[test]
    fn test_write_across_memory_end() {
        let mut memory = VirtualMemory::new();
        let last = crate::memory::offset_to_address(MEMORY_LEN - 2).unwrap();
        assert!(memory.write(last, &[1, 2]).is_ok());

        let result = memory.write(last, &[1, 2, 3]);
        assert!(matches!(result, Err(D50Error::OutOfRange(_))));
    }

    #[test]
    fn test_write_invalid_address() {
        let mut memory = VirtualMemory::new();
        assert!(memory.write(Address::new(0x00, 0x00, 0x00), &[1]).is_err());
        assert!(memory.write(Address::new(0x02, 0x00, 0x80), &[1]).is_err());
    }

    #[test]
    fn test_patch_bounds() {
        let memory = VirtualMemory::new();
        assert!(memory.patch(63).is_ok());
        assert!(matches!(memory.patch(64), Err(D50Error::OutOfRange(_))));
    }

    #[test]
    fn test_reverb_bounds() {
        let memory = VirtualMemory::new();
        assert_eq!(memory.reverb(31).unwrap().len(), REVERB_DATA_LEN);
        assert!(matches!(memory.reverb(32), Err(D50Error::OutOfRange(_))));
    }

    #[test]
    fn test_reverb_window_position() {
        let mut memory = VirtualMemory::new();
        memory.write(REVERB_BASE_ADDRESS, &[0x11; REVERB_DATA_LEN]).unwrap();
        assert!(memory.reverb(0).unwrap().iter().all(|&b| b == 0x11));
        assert!(memory.reverb(1).unwrap().iter().all(|&b| b == 0));
        assert!(memory.patch(63).unwrap().iter().all(|&b| b == 0));
    }
}
