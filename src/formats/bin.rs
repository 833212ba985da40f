//! Bank dump (.bin) format
//!
//! File layout:
//! - Signature: `KoaBankFile00003PG-D50` (22 bytes, ASCII)
//! - 64 patch records of 468 bytes each, back to back:
//!   - 0-17: patch name (plain text)
//!   - 18-19: reserved (zero)
//!   - 20-467: the seven 64-byte parameter blocks in memory order
//!
//! There is no reverb section.

use super::{DumpFormat, BANK_SIGNATURE};
use crate::memory::{PATCH_COUNT, PATCH_DATA_LEN};
use crate::patch::{decode_text, encode_text, Patch, PatchLayout, TextEncoding};
use crate::{D50Error, Dump, Result};
use nom::bytes::complete::tag;
use nom::IResult;

/// Width of the record name field
pub const RECORD_NAME_LEN: usize = 18;
/// Reserved bytes between name and parameter blocks
pub const RECORD_RESERVED_LEN: usize = 2;
/// Offset of the parameter blocks inside a record
pub const RECORD_DATA_OFFSET: usize = RECORD_NAME_LEN + RECORD_RESERVED_LEN;
/// Length of one patch record
pub const RECORD_LEN: usize = RECORD_DATA_OFFSET + PATCH_DATA_LEN;
/// Length of a complete bank dump file
pub const BANK_LEN: usize = BANK_SIGNATURE.len() + PATCH_COUNT * RECORD_LEN;

fn signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(BANK_SIGNATURE)(input)
}

/// Validate the signature and cut the remainder into 64 records.
///
/// The remainder must be exactly `64 × 468` bytes.
pub fn split_bank(data: &[u8]) -> Result<Vec<&[u8]>> {
    let (records, _) = signature(data).map_err(|_| {
        D50Error::Format("Wrong BIN file format: missing bank signature".to_string())
    })?;

    let expected = PATCH_COUNT * RECORD_LEN;
    if records.len() != expected {
        let kind = if records.len() < expected {
            "truncated"
        } else {
            "oversized"
        };
        return Err(D50Error::Format(format!(
            "Bank dump is {}: {} bytes of records, expected {}",
            kind,
            records.len(),
            expected
        )));
    }

    Ok(records.chunks_exact(RECORD_LEN).collect())
}

/// Write the signature followed by the records in order
pub fn join_bank<R: AsRef<[u8]>>(records: &[R]) -> Result<Vec<u8>> {
    if records.len() != PATCH_COUNT {
        return Err(D50Error::Format(format!(
            "Bank dump needs {} records, got {}",
            PATCH_COUNT,
            records.len()
        )));
    }

    let mut data = Vec::with_capacity(BANK_LEN);
    data.extend_from_slice(BANK_SIGNATURE);
    for (i, record) in records.iter().enumerate() {
        let record = record.as_ref();
        if record.len() != RECORD_LEN {
            return Err(D50Error::Format(format!(
                "Record {} is {} bytes, expected {}",
                i,
                record.len(),
                RECORD_LEN
            )));
        }
        data.extend_from_slice(record);
    }
    Ok(data)
}

/// Bank dump codec
#[derive(Debug, Clone, Copy)]
pub struct BinFormat {
    /// Placement of the parameter blocks after the record header
    pub layout: PatchLayout,
    /// Run [`Dump::validate`] before encoding
    pub validate_on_encode: bool,
}

impl Default for BinFormat {
    fn default() -> Self {
        BinFormat {
            layout: PatchLayout::D50,
            validate_on_encode: true,
        }
    }
}

impl BinFormat {
    /// Decode one 468-byte record
    pub fn decode_record(&self, record: &[u8]) -> Result<Patch> {
        if record.len() < RECORD_LEN {
            return Err(D50Error::Format(format!(
                "Record of {} bytes is shorter than {}",
                record.len(),
                RECORD_LEN
            )));
        }
        let mut patch = Patch::parse(
            &record[RECORD_DATA_OFFSET..RECORD_LEN],
            &self.layout,
            TextEncoding::Plain,
        )?;
        patch.name = Some(decode_text(&record[..RECORD_NAME_LEN], TextEncoding::Plain));
        Ok(patch)
    }

    /// Encode one patch as a 468-byte record
    pub fn encode_record(&self, patch: &Patch) -> Result<Vec<u8>> {
        let mut record = Vec::with_capacity(RECORD_LEN);
        record.extend(encode_text(
            patch.display_name(),
            RECORD_NAME_LEN,
            TextEncoding::Plain,
        ));
        record.extend_from_slice(&[0u8; RECORD_RESERVED_LEN]);
        record.extend(patch.encode(&self.layout, TextEncoding::Plain)?);
        Ok(record)
    }
}

impl DumpFormat for BinFormat {
    fn decode(&self, data: &[u8]) -> Result<Dump> {
        let records = split_bank(data)?;
        let patches = records
            .iter()
            .map(|record| self.decode_record(record))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(patches = patches.len(), "decoded bank dump");
        Ok(Dump {
            patches,
            reverb_data: None,
        })
    }

    fn encode(&self, dump: &Dump) -> Result<Vec<u8>> {
        if self.validate_on_encode {
            dump.validate()?;
        }
        if dump.reverb_data.is_some() {
            tracing::debug!("bank dumps carry no reverb section; reverb data dropped");
        }

        let records = dump
            .patches
            .iter()
            .map(|patch| self.encode_record(patch))
            .collect::<Result<Vec<_>>>()?;
        join_bank(&records)
    }

    fn name(&self) -> &str {
        "Bank dump"
    }
}
