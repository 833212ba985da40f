//! Roland SysEx frame parser
//!
//! Frame layout (DT1 and friends):
//! - `[0]` 0xF0 start marker
//! - `[1]` manufacturer id (0x41 for Roland)
//! - `[2]` device id
//! - `[3]` model id (0x14 for the D-50)
//! - `[4]` command id (0x12 for DT1)
//! - `[5..8]` address
//! - `[8..len-2]` payload
//! - `[len-2]` checksum over address and payload
//! - `[len-1]` 0xF7 end marker

use crate::memory::Address;
use crate::{D50Error, Result};
use nom::bytes::complete::take;
use nom::number::complete::u8 as byte;
use nom::sequence::tuple;
use nom::IResult;

/// System exclusive status byte
pub const SYSEX_START: u8 = 0xF0;
/// End of exclusive
pub const SYSEX_END: u8 = 0xF7;
/// Roland manufacturer id
pub const ROLAND_ID: u8 = 0x41;
/// D-50 model id
pub const D50_MODEL_ID: u8 = 0x14;
/// Data set (DT1) command
pub const COMMAND_DT1: u8 = 0x12;

/// Shortest frame carrying header, one payload byte, checksum and terminator
const MIN_FRAME_LEN: usize = 10;
/// Bytes before the payload: start marker, four ids, three address bytes
const HEADER_LEN: usize = 8;
/// Offset of the first address byte (start of the checksummed range)
const ADDRESS_OFFSET: usize = 5;

/// One parsed SysEx message borrowing its payload from the input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysexFrame<'a> {
    /// Manufacturer id
    pub vendor_id: u8,
    /// Device id
    pub device_id: u8,
    /// Model id
    pub model_id: u8,
    /// Command id
    pub command_id: u8,
    /// Target address of the payload
    pub address: Address,
    /// Data bytes
    pub payload: &'a [u8],
    /// Transmitted checksum
    pub checksum: u8,
    /// Whether the transmitted checksum matches the computed one
    pub checksum_valid: bool,
}

struct FrameHeader {
    vendor_id: u8,
    device_id: u8,
    model_id: u8,
    command_id: u8,
    address: Address,
}

fn frame_header(input: &[u8]) -> IResult<&[u8], FrameHeader> {
    // Start marker is checked by the splitter
    let (input, _start) = byte(input)?;
    let (input, (vendor_id, device_id, model_id, command_id)) =
        tuple((byte, byte, byte, byte))(input)?;
    let (input, address) = take(3usize)(input)?;
    Ok((
        input,
        FrameHeader {
            vendor_id,
            device_id,
            model_id,
            command_id,
            address: Address::new(address[0], address[1], address[2]),
        },
    ))
}

/// Roland checksum: the value that brings the 7-bit sum of `bytes` to zero
pub fn checksum(bytes: &[u8]) -> u8 {
    let sum: u32 = bytes.iter().map(|&b| u32::from(b)).sum();
    ((128 - sum % 128) % 128) as u8
}

impl<'a> SysexFrame<'a> {
    /// Parse one complete frame (start marker through terminator).
    ///
    /// A checksum mismatch does not fail the parse; it clears
    /// [`SysexFrame::checksum_valid`].
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < MIN_FRAME_LEN {
            return Err(D50Error::Format(format!(
                "SysEx frame of {} bytes is shorter than the {}-byte minimum",
                data.len(),
                MIN_FRAME_LEN
            )));
        }

        let (_, header) = frame_header(data)
            .map_err(|e| D50Error::Format(format!("Wrong SysEx header format: {:?}", e)))?;

        let payload = &data[HEADER_LEN..data.len() - 2];
        let transmitted = data[data.len() - 2];
        let computed = checksum(&data[ADDRESS_OFFSET..data.len() - 2]);

        Ok(SysexFrame {
            vendor_id: header.vendor_id,
            device_id: header.device_id,
            model_id: header.model_id,
            command_id: header.command_id,
            address: header.address,
            payload,
            checksum: transmitted,
            checksum_valid: transmitted == computed,
        })
    }

    /// Checksum this frame should have carried
    pub fn expected_checksum(&self) -> u8 {
        let mut sum = self.address.components().to_vec();
        sum.extend_from_slice(self.payload);
        checksum(&sum)
    }
}

/// Build a D-50 DT1 frame writing `payload` at `address`
pub fn build_dt1(device_id: u8, address: Address, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len() + 2);
    frame.extend_from_slice(&[SYSEX_START, ROLAND_ID, device_id, D50_MODEL_ID, COMMAND_DT1]);
    frame.extend_from_slice(&address.components());
    frame.extend_from_slice(payload);
    frame.push(checksum(&frame[ADDRESS_OFFSET..]));
    frame.push(SYSEX_END);
    frame
}
