//! Tone common parameters
//!
//! Settings shared by the two partials of a tone: name, structure, pitch
//! envelope, LFOs, EQ and chorus.

use super::block::{BlockReader, BlockWriter};
use super::text::TextEncoding;
use crate::memory::BLOCK_LEN;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Width of the tone name field
pub const TONE_NAME_LEN: usize = 10;

/// Pitch envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchEnvelope {
    /// Velocity range (0-2)
    pub velocity_range: u8,
    /// Time key follow (0-4)
    pub time_key_follow: u8,
    /// Times T1-T4 (0-50)
    pub time: [u8; 4],
    /// Levels L0-L2 (0-100)
    pub level: [u8; 3],
    /// Sustain level (0-100)
    pub sustain_level: u8,
    /// End level (0-100)
    pub end_level: u8,
}

/// Pitch modulation sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchModulation {
    /// LFO depth (0-100)
    pub lfo_depth: u8,
    /// Lever depth (0-100)
    pub pitch_lever: u8,
    /// After touch depth (0-100)
    pub pitch_after_touch: u8,
}

/// Low frequency oscillator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lfo {
    /// Waveform (0-3: triangle, saw, square, random)
    pub waveform: u8,
    /// Rate (0-100)
    pub rate: u8,
    /// Delay time (0-100)
    pub delay_time: u8,
    /// Sync mode (0-2 for LFO 1, 0-1 for LFO 2 and 3)
    pub sync: u8,
}

/// Two-band equalizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equalizer {
    /// Low frequency (0-15)
    pub low_frequency: u8,
    /// Low gain (0-24)
    pub low_gain: u8,
    /// High frequency (0-21)
    pub high_frequency: u8,
    /// High Q (0-8)
    pub high_q: u8,
    /// High gain (0-24)
    pub high_gain: u8,
}

/// Chorus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chorus {
    /// Chorus type (0-7)
    #[serde(rename = "type")]
    pub kind: u8,
    /// Rate (0-100)
    pub rate: u8,
    /// Depth (0-100)
    pub depth: u8,
    /// Balance (0-100)
    pub balance: u8,
}

/// Tone common parameter block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneCommon {
    /// Tone name (10 characters)
    pub name: String,
    /// Partial structure (0-6)
    pub structure: u8,
    /// Pitch envelope
    pub p_env: PitchEnvelope,
    /// Pitch modulation
    pub modulation: PitchModulation,
    /// LFO 1
    pub lfo1: Lfo,
    /// LFO 2
    pub lfo2: Lfo,
    /// LFO 3
    pub lfo3: Lfo,
    /// Equalizer
    pub eq: Equalizer,
    /// Chorus
    pub chorus: Chorus,
    /// Partial mute (0-3)
    pub partial_mute: u8,
    /// Partial balance (0-100)
    pub partial_balance: u8,
}

fn parse_lfo(r: &BlockReader<'_>, start: usize, sync_max: u8) -> Result<Lfo> {
    Ok(Lfo {
        waveform: r.field(start, "lfo.waveform", 3)?,
        rate: r.field(start + 1, "lfo.rate", 100)?,
        delay_time: r.field(start + 2, "lfo.delay_time", 100)?,
        sync: r.field(start + 3, "lfo.sync", sync_max)?,
    })
}

fn put_lfo(w: &mut BlockWriter, start: usize, lfo: &Lfo) {
    w.put_all(start, &[lfo.waveform, lfo.rate, lfo.delay_time, lfo.sync]);
}

impl ToneCommon {
    /// Decode a tone common block, range-checking every field
    pub fn parse(data: &[u8], encoding: TextEncoding) -> Result<Self> {
        let r = BlockReader::new(data, "tone")?;
        Ok(ToneCommon {
            name: r.text(0, TONE_NAME_LEN, encoding),
            structure: r.field(10, "structure", 6)?,
            p_env: PitchEnvelope {
                velocity_range: r.field(11, "p_env.velocity_range", 2)?,
                time_key_follow: r.field(12, "p_env.time_key_follow", 4)?,
                time: r.fields(13, "p_env.time", 50)?,
                level: r.fields(17, "p_env.level", 100)?,
                sustain_level: r.field(20, "p_env.sustain_level", 100)?,
                end_level: r.field(21, "p_env.end_level", 100)?,
            },
            modulation: PitchModulation {
                lfo_depth: r.field(22, "modulation.lfo_depth", 100)?,
                pitch_lever: r.field(23, "modulation.pitch_lever", 100)?,
                pitch_after_touch: r.field(24, "modulation.pitch_after_touch", 100)?,
            },
            lfo1: parse_lfo(&r, 25, 2)?,
            lfo2: parse_lfo(&r, 29, 1)?,
            lfo3: parse_lfo(&r, 33, 1)?,
            eq: Equalizer {
                low_frequency: r.field(37, "eq.low_frequency", 15)?,
                low_gain: r.field(38, "eq.low_gain", 24)?,
                high_frequency: r.field(39, "eq.high_frequency", 21)?,
                high_q: r.field(40, "eq.high_q", 8)?,
                high_gain: r.field(41, "eq.high_gain", 24)?,
            },
            chorus: Chorus {
                kind: r.field(42, "chorus.type", 7)?,
                rate: r.field(43, "chorus.rate", 100)?,
                depth: r.field(44, "chorus.depth", 100)?,
                balance: r.field(45, "chorus.balance", 100)?,
            },
            partial_mute: r.field(46, "partial_mute", 3)?,
            partial_balance: r.field(47, "partial_balance", 100)?,
        })
    }

    /// Encode into a block. Values are written unchecked.
    pub fn encode(&self, encoding: TextEncoding) -> [u8; BLOCK_LEN] {
        let mut w = BlockWriter::new();
        w.text(0, TONE_NAME_LEN, &self.name, encoding)
            .put(10, self.structure)
            .put(11, self.p_env.velocity_range)
            .put(12, self.p_env.time_key_follow)
            .put_all(13, &self.p_env.time)
            .put_all(17, &self.p_env.level)
            .put(20, self.p_env.sustain_level)
            .put(21, self.p_env.end_level)
            .put(22, self.modulation.lfo_depth)
            .put(23, self.modulation.pitch_lever)
            .put(24, self.modulation.pitch_after_touch);
        put_lfo(&mut w, 25, &self.lfo1);
        put_lfo(&mut w, 29, &self.lfo2);
        put_lfo(&mut w, 33, &self.lfo3);
        w.put_all(
            37,
            &[
                self.eq.low_frequency,
                self.eq.low_gain,
                self.eq.high_frequency,
                self.eq.high_q,
                self.eq.high_gain,
            ],
        )
        .put_all(
            42,
            &[
                self.chorus.kind,
                self.chorus.rate,
                self.chorus.depth,
                self.chorus.balance,
            ],
        )
        .put(46, self.partial_mute)
        .put(47, self.partial_balance);
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

    fn sample() -> ToneCommon {
        ToneCommon {
            name: "Soundtrack".to_string(),
            structure: 6,
            p_env: PitchEnvelope {
                velocity_range: 2,
                time_key_follow: 4,
                time: [50, 10, 20, 30],
                level: [100, 50, 0],
                sustain_level: 50,
                end_level: 50,
            },
            modulation: PitchModulation {
                lfo_depth: 10,
                pitch_lever: 20,
                pitch_after_touch: 30,
            },
            lfo1: Lfo {
                waveform: 3,
                rate: 40,
                delay_time: 0,
                sync: 2,
            },
            lfo2: Lfo {
                waveform: 1,
                rate: 100,
                delay_time: 5,
                sync: 1,
            },
            lfo3: Lfo {
                waveform: 0,
                rate: 1,
                delay_time: 2,
                sync: 0,
            },
            eq: Equalizer {
                low_frequency: 15,
                low_gain: 24,
                high_frequency: 21,
                high_q: 8,
                high_gain: 12,
            },
            chorus: Chorus {
                kind: 7,
                rate: 30,
                depth: 60,
                balance: 90,
            },
            partial_mute: 3,
            partial_balance: 50,
        }
    }

    #[test]
    fn test_field_positions() {
        let block = sample().encode(TextEncoding::Plain);
        assert_eq!(&block[..10], b"Soundtrack");
        assert_eq!(block[10], 6);
        assert_eq!(&block[13..17], &[50, 10, 20, 30]);
        assert_eq!(&block[25..29], &[3, 40, 0, 2]);
        assert_eq!(&block[37..42], &[15, 24, 21, 8, 12]);
        assert_eq!(block[42], 7);
        assert_eq!(block[47], 50);
        assert!(block[48..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parse_encoded() {
        let tone = sample();
        let parsed = ToneCommon::parse(&tone.encode(TextEncoding::Device), TextEncoding::Device)
            .unwrap();
        assert_eq!(parsed, tone);
    }

    #[test]
    fn test_lfo2_sync_limit() {
        let mut block = sample().encode(TextEncoding::Plain);
        block[32] = 2; // LFO 2 sync only goes to 1
        let result = ToneCommon::parse(&block, TextEncoding::Plain);
        assert!(matches!(
            result,
            Err(D50Error::Range {
                unit: "tone",
                field: "lfo.sync",
                value: 2,
                max: 1,
            })
        ));
    }

    #[test]
    fn test_pitch_envelope_time_limit() {
        let mut block = sample().encode(TextEncoding::Plain);
        block[15] = 51;
        assert!(ToneCommon::parse(&block, TextEncoding::Plain).is_err());
    }
}
