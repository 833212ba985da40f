//! Positional access to one 64-byte parameter block

use super::text::{decode_text, encode_text, TextEncoding};
use crate::memory::BLOCK_LEN;
use crate::{D50Error, Result};

/// Range-checked reader over a parameter block
pub struct BlockReader<'a> {
    data: &'a [u8],
    unit: &'static str,
}

impl<'a> BlockReader<'a> {
    /// Wrap `data`, which must hold at least one full block
    pub fn new(data: &'a [u8], unit: &'static str) -> Result<Self> {
        if data.len() < BLOCK_LEN {
            return Err(D50Error::Format(format!(
                "{} block of {} bytes is shorter than {}",
                unit,
                data.len(),
                BLOCK_LEN
            )));
        }
        Ok(BlockReader {
            data: &data[..BLOCK_LEN],
            unit,
        })
    }

    /// Byte at `index`, failing with [`D50Error::Range`] above `max`
    pub fn field(&self, index: usize, name: &'static str, max: u8) -> Result<u8> {
        let value = self.data[index];
        if value > max {
            return Err(D50Error::Range {
                unit: self.unit,
                field: name,
                value,
                max,
            });
        }
        Ok(value)
    }

    /// `N` consecutive fields sharing one name and maximum
    pub fn fields<const N: usize>(
        &self,
        start: usize,
        name: &'static str,
        max: u8,
    ) -> Result<[u8; N]> {
        let mut values = [0u8; N];
        for (i, value) in values.iter_mut().enumerate() {
            *value = self.field(start + i, name, max)?;
        }
        Ok(values)
    }

    /// Name field of `width` bytes at `start`
    pub fn text(&self, start: usize, width: usize, encoding: TextEncoding) -> String {
        decode_text(&self.data[start..start + width], encoding)
    }
}

/// Writer producing one zero-filled parameter block
pub struct BlockWriter {
    block: [u8; BLOCK_LEN],
}

impl BlockWriter {
    /// Start an all-zero block
    pub fn new() -> Self {
        BlockWriter {
            block: [0u8; BLOCK_LEN],
        }
    }

    /// Store `value` at `index` as-is
    pub fn put(&mut self, index: usize, value: u8) -> &mut Self {
        self.block[index] = value;
        self
    }

    /// Store `values` starting at `start`
    pub fn put_all(&mut self, start: usize, values: &[u8]) -> &mut Self {
        self.block[start..start + values.len()].copy_from_slice(values);
        self
    }

    /// Store `text` padded/truncated to `width` at `start`
    pub fn text(
        &mut self,
        start: usize,
        width: usize,
        text: &str,
        encoding: TextEncoding,
    ) -> &mut Self {
        let bytes = encode_text(text, width, encoding);
        self.put_all(start, &bytes)
    }

    /// Finished block
    pub fn finish(&self) -> [u8; BLOCK_LEN] {
        self.block
    }
}

impl Default for BlockWriter {
    fn default() -> Self {
        Self::new()
    }
}
