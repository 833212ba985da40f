//! Patch common parameters
//!
//! Block layout (one byte per field unless noted):
//! - 0-17: patch name (18 characters)
//! - 18-39: key mode, split, portamento, hold, tone shifts/tunes, bender,
//!   output/reverb, volume/balance, chase, MIDI settings

use super::block::{BlockReader, BlockWriter};
use super::text::TextEncoding;
use crate::memory::BLOCK_LEN;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Width of the patch name field
pub const PATCH_NAME_LEN: usize = 18;

/// Settings shared by both tones of a patch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchCommon {
    /// Patch name (18 characters)
    pub name: String,
    /// Key mode (0-8: whole, dual, split, separate, whole-S, dual-S, split-US, split-LS, separate-S)
    pub key_mode: u8,
    /// Split point (0-60, C2-C7)
    pub split_point: u8,
    /// Portamento mode (0-2: upper, lower, both)
    pub portamento_mode: u8,
    /// Hold mode (0-2: upper, lower, both)
    pub hold_mode: u8,
    /// Upper tone key shift (0-48, -24..+24 semitones)
    pub upper_tone_key_shift: u8,
    /// Lower tone key shift (0-48)
    pub lower_tone_key_shift: u8,
    /// Upper tone fine tune (0-100, -50..+50)
    pub upper_tone_fine_tune: u8,
    /// Lower tone fine tune (0-100)
    pub lower_tone_fine_tune: u8,
    /// Bender range (0-12 semitones)
    pub bender_range: u8,
    /// After touch bend range (0-24, -12..+12)
    pub after_touch_bend_range: u8,
    /// Portamento time (0-100)
    pub portamento_time: u8,
    /// Output mode (0-3)
    pub output_mode: u8,
    /// Reverb type (0-31)
    pub reverb_type: u8,
    /// Reverb balance (0-100)
    pub reverb_balance: u8,
    /// Total volume (0-100)
    pub total_volume: u8,
    /// Tone balance (0-100)
    pub tone_balance: u8,
    /// Chase mode (0-2)
    pub chase_mode: u8,
    /// Chase level (0-100)
    pub chase_level: u8,
    /// Chase time (0-100)
    pub chase_time: u8,
    /// MIDI transmit channel (0-16)
    pub midi_transmit_channel: u8,
    /// MIDI separate receive channel (0-16)
    pub midi_separate_rcv_channel: u8,
    /// MIDI transmit program change (0-100)
    pub midi_prog_change: u8,
}

impl PatchCommon {
    /// Decode a patch common block, range-checking every field
    pub fn parse(data: &[u8], encoding: TextEncoding) -> Result<Self> {
        let r = BlockReader::new(data, "patch")?;
        Ok(PatchCommon {
            name: r.text(0, PATCH_NAME_LEN, encoding),
            key_mode: r.field(18, "key_mode", 8)?,
            split_point: r.field(19, "split_point", 60)?,
            portamento_mode: r.field(20, "portamento_mode", 2)?,
            hold_mode: r.field(21, "hold_mode", 2)?,
            upper_tone_key_shift: r.field(22, "upper_tone_key_shift", 48)?,
            lower_tone_key_shift: r.field(23, "lower_tone_key_shift", 48)?,
            upper_tone_fine_tune: r.field(24, "upper_tone_fine_tune", 100)?,
            lower_tone_fine_tune: r.field(25, "lower_tone_fine_tune", 100)?,
            bender_range: r.field(26, "bender_range", 12)?,
            after_touch_bend_range: r.field(27, "after_touch_bend_range", 24)?,
            portamento_time: r.field(28, "portamento_time", 100)?,
            output_mode: r.field(29, "output_mode", 3)?,
            reverb_type: r.field(30, "reverb_type", 31)?,
            reverb_balance: r.field(31, "reverb_balance", 100)?,
            total_volume: r.field(32, "total_volume", 100)?,
            tone_balance: r.field(33, "tone_balance", 100)?,
            chase_mode: r.field(34, "chase_mode", 2)?,
            chase_level: r.field(35, "chase_level", 100)?,
            chase_time: r.field(36, "chase_time", 100)?,
            midi_transmit_channel: r.field(37, "midi_transmit_channel", 16)?,
            midi_separate_rcv_channel: r.field(38, "midi_separate_rcv_channel", 16)?,
            midi_prog_change: r.field(39, "midi_prog_change", 100)?,
        })
    }

    /// Encode into a block. Values are written unchecked.
    pub fn encode(&self, encoding: TextEncoding) -> [u8; BLOCK_LEN] {
        let mut w = BlockWriter::new();
        w.text(0, PATCH_NAME_LEN, &self.name, encoding)
            .put(18, self.key_mode)
            .put(19, self.split_point)
            .put(20, self.portamento_mode)
            .put(21, self.hold_mode)
            .put(22, self.upper_tone_key_shift)
            .put(23, self.lower_tone_key_shift)
            .put(24, self.upper_tone_fine_tune)
            .put(25, self.lower_tone_fine_tune)
            .put(26, self.bender_range)
            .put(27, self.after_touch_bend_range)
            .put(28, self.portamento_time)
            .put(29, self.output_mode)
            .put(30, self.reverb_type)
            .put(31, self.reverb_balance)
            .put(32, self.total_volume)
            .put(33, self.tone_balance)
            .put(34, self.chase_mode)
            .put(35, self.chase_level)
            .put(36, self.chase_time)
            .put(37, self.midi_transmit_channel)
            .put(38, self.midi_separate_rcv_channel)
            .put(39, self.midi_prog_change);
        w.finish()
    }

    /// Check every field against its maximum
    pub fn validate(&self) -> Result<()> {
        Self::parse(&self.encode(TextEncoding::Plain), TextEncoding::Plain).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::D50Error;

    fn sample() -> PatchCommon {
        PatchCommon {
            name: "Fantasia          ".to_string(),
            key_mode: 1,
            split_point: 60,
            portamento_mode: 2,
            hold_mode: 2,
            upper_tone_key_shift: 24,
            lower_tone_key_shift: 36,
            upper_tone_fine_tune: 50,
            lower_tone_fine_tune: 55,
            bender_range: 12,
            after_touch_bend_range: 24,
            portamento_time: 0,
            output_mode: 3,
            reverb_type: 31,
            reverb_balance: 40,
            total_volume: 100,
            tone_balance: 50,
            chase_mode: 0,
            chase_level: 100,
            chase_time: 20,
            midi_transmit_channel: 16,
            midi_separate_rcv_channel: 0,
            midi_prog_change: 100,
        }
    }

    #[test]
    fn test_field_positions() {
        let block = sample().encode(TextEncoding::Plain);
        assert_eq!(&block[..8], b"Fantasia");
        assert_eq!(block[18], 1);
        assert_eq!(block[19], 60);
        assert_eq!(block[30], 31);
        assert_eq!(block[39], 100);
        assert!(block[40..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parse_encoded() {
        let common = sample();
        for encoding in [TextEncoding::Plain, TextEncoding::Device] {
            let parsed = PatchCommon::parse(&common.encode(encoding), encoding).unwrap();
            assert_eq!(parsed, common);
        }
    }

    #[test]
    fn test_key_mode_out_of_range() {
        let mut block = sample().encode(TextEncoding::Plain);
        block[18] = 9;
        let result = PatchCommon::parse(&block, TextEncoding::Plain);
        assert!(matches!(
            result,
            Err(D50Error::Range {
                field: "key_mode",
                value: 9,
                max: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_validate() {
        let mut common = sample();
        assert!(common.validate().is_ok());
        common.bender_range = 13;
        let err = common.validate().unwrap_err();
        assert!(err.to_string().contains("bender_range"));
    }
}
