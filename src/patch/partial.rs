//! Tone partial parameters: wave generator (WG), filter (TVF), amplifier (TVA)

use super::block::{BlockReader, BlockWriter};
use crate::memory::BLOCK_LEN;
use crate::Result;
use serde::{Deserialize, Serialize};

/// WG pitch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WgPitch {
    /// Coarse pitch (0-72, C1-C7)
    pub coarse: u8,
    /// Fine pitch (0-100, -50..+50)
    pub fine: u8,
    /// Key follow (0-16)
    pub key_follow: u8,
}

/// WG pitch modulation switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WgModulation {
    /// LFO mode (0-3)
    pub lfo_mode: u8,
    /// Pitch envelope mode (0-2)
    pub p_env_mode: u8,
    /// Bender mode (0-2)
    pub bend_mode: u8,
}

/// WG pulse width
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseWidth {
    /// Pulse width (0-100)
    pub amount: u8,
    /// Velocity range (0-14)
    pub velocity_range: u8,
    /// LFO select (0-5)
    pub lfo_select: u8,
    /// LFO depth (0-100)
    pub lfo_depth: u8,
    /// After touch range (0-14)
    pub after_touch_range: u8,
}

/// Wave generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveGenerator {
    /// Pitch
    pub pitch: WgPitch,
    /// Modulation
    pub modulation: WgModulation,
    /// Waveform (0 square, 1 sawtooth)
    pub waveform: u8,
    /// PCM wave number (0-99)
    pub pcm_wave: u8,
    /// Pulse width
    pub pulse_width: PulseWidth,
}

/// LFO and after touch modulation of TVF or TVA
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LfoModulation {
    /// LFO select (0-5)
    pub lfo_select: u8,
    /// LFO depth (0-100)
    pub lfo_depth: u8,
    /// After touch range (0-14)
    pub after_touch_range: u8,
}

/// TVF envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvfEnvelope {
    /// Depth (0-100)
    pub depth: u8,
    /// Velocity range (0-100)
    pub velocity_range: u8,
    /// Depth key follow (0-4)
    pub depth_key_follow: u8,
    /// Time key follow (0-4)
    pub time_key_follow: u8,
    /// Times T1-T5 (0-100)
    pub time: [u8; 5],
    /// Levels L1-L3 (0-100)
    pub level: [u8; 3],
    /// Sustain level (0-100)
    pub sustain_level: u8,
    /// End level (0-1)
    pub end_level: u8,
}

/// Time variant filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tvf {
    /// Cutoff frequency (0-100)
    pub cutoff_frequency: u8,
    /// Resonance (0-30)
    pub resonance: u8,
    /// Key follow (0-14)
    pub key_follow: u8,
    /// Bias point (0-127)
    pub bias_point: u8,
    /// Bias level (0-14)
    pub bias_level: u8,
    /// Envelope
    pub env: TvfEnvelope,
    /// Modulation
    pub modulation: LfoModulation,
}

/// TVA envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvaEnvelope {
    /// Times T1-T5 (0-100)
    pub time: [u8; 5],
    /// Levels L1-L3 (0-100)
    pub level: [u8; 3],
    /// Sustain level (0-100)
    pub sustain_level: u8,
    /// End level (0-1)
    pub end_level: u8,
    /// Velocity follow (0-4)
    pub velocity_follow: u8,
    /// Time key follow (0-4)
    pub time_key_follow: u8,
}

/// Time variant amplifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tva {
    /// Level (0-100)
    pub level: u8,
    /// Velocity range (0-100)
    pub velocity_range: u8,
    /// Bias point (0-127)
    pub bias_point: u8,
    /// Bias level (0-12)
    pub bias_level: u8,
    /// Envelope
    pub env: TvaEnvelope,
    /// Modulation
    pub modulation: LfoModulation,
}

/// One partial of a tone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonePartial {
    /// Wave generator
    pub wg: WaveGenerator,
    /// Filter
    pub tvf: Tvf,
    /// Amplifier
    pub tva: Tva,
}

fn parse_modulation(r: &BlockReader<'_>, start: usize) -> Result<LfoModulation> {
    Ok(LfoModulation {
        lfo_select: r.field(start, "modulation.lfo_select", 5)?,
        lfo_depth: r.field(start + 1, "modulation.lfo_depth", 100)?,
        after_touch_range: r.field(start + 2, "modulation.after_touch_range", 14)?,
    })
}

impl LfoModulation {
    fn bytes(&self) -> [u8; 3] {
        [self.lfo_select, self.lfo_depth, self.after_touch_range]
    }
}

impl TonePartial {
    /// Decode a partial block, range-checking every field
    pub fn parse(data: &[u8]) -> Result<Self> {
        let r = BlockReader::new(data, "partial")?;
        Ok(TonePartial {
            wg: WaveGenerator {
                pitch: WgPitch {
                    coarse: r.field(0, "wg.pitch.coarse", 72)?,
                    fine: r.field(1, "wg.pitch.fine", 100)?,
                    key_follow: r.field(2, "wg.pitch.key_follow", 16)?,
                },
                modulation: WgModulation {
                    lfo_mode: r.field(3, "wg.modulation.lfo_mode", 3)?,
                    p_env_mode: r.field(4, "wg.modulation.p_env_mode", 2)?,
                    bend_mode: r.field(5, "wg.modulation.bend_mode", 2)?,
                },
                waveform: r.field(6, "wg.waveform", 1)?,
                pcm_wave: r.field(7, "wg.pcm_wave", 99)?,
                pulse_width: PulseWidth {
                    amount: r.field(8, "wg.pulse_width.amount", 100)?,
                    velocity_range: r.field(9, "wg.pulse_width.velocity_range", 14)?,
                    lfo_select: r.field(10, "wg.pulse_width.lfo_select", 5)?,
                    lfo_depth: r.field(11, "wg.pulse_width.lfo_depth", 100)?,
                    after_touch_range: r.field(12, "wg.pulse_width.after_touch_range", 14)?,
                },
            },
            tvf: Tvf {
                cutoff_frequency: r.field(13, "tvf.cutoff_frequency", 100)?,
                resonance: r.field(14, "tvf.resonance", 30)?,
                key_follow: r.field(15, "tvf.key_follow", 14)?,
                bias_point: r.field(16, "tvf.bias_point", 127)?,
                bias_level: r.field(17, "tvf.bias_level", 14)?,
                env: TvfEnvelope {
                    depth: r.field(18, "tvf.env.depth", 100)?,
                    velocity_range: r.field(19, "tvf.env.velocity_range", 100)?,
                    depth_key_follow: r.field(20, "tvf.env.depth_key_follow", 4)?,
                    time_key_follow: r.field(21, "tvf.env.time_key_follow", 4)?,
                    time: r.fields(22, "tvf.env.time", 100)?,
                    level: r.fields(27, "tvf.env.level", 100)?,
                    sustain_level: r.field(30, "tvf.env.sustain_level", 100)?,
                    end_level: r.field(31, "tvf.env.end_level", 1)?,
                },
                modulation: parse_modulation(&r, 32)?,
            },
            tva: Tva {
                level: r.field(35, "tva.level", 100)?,
                velocity_range: r.field(36, "tva.velocity_range", 100)?,
                bias_point: r.field(37, "tva.bias_point", 127)?,
                bias_level: r.field(38, "tva.bias_level", 12)?,
                env: TvaEnvelope {
                    time: r.fields(39, "tva.env.time", 100)?,
                    level: r.fields(44, "tva.env.level", 100)?,
                    sustain_level: r.field(47, "tva.env.sustain_level", 100)?,
                    end_level: r.field(48, "tva.env.end_level", 1)?,
                    velocity_follow: r.field(49, "tva.env.velocity_follow", 4)?,
                    time_key_follow: r.field(50, "tva.env.time_key_follow", 4)?,
                },
                modulation: parse_modulation(&r, 51)?,
            },
        })
    }

    /// Encode into a block. Values are written unchecked.
    pub fn encode(&self) -> [u8; BLOCK_LEN] {
        let wg = &self.wg;
        let tvf = &self.tvf;
        let tva = &self.tva;

        let mut w = BlockWriter::new();
        w.put_all(
            0,
            &[
                wg.pitch.coarse,
                wg.pitch.fine,
                wg.pitch.key_follow,
                wg.modulation.lfo_mode,
                wg.modulation.p_env_mode,
                wg.modulation.bend_mode,
                wg.waveform,
                wg.pcm_wave,
                wg.pulse_width.amount,
                wg.pulse_width.velocity_range,
                wg.pulse_width.lfo_select,
                wg.pulse_width.lfo_depth,
                wg.pulse_width.after_touch_range,
            ],
        )
        .put_all(
            13,
            &[
                tvf.cutoff_frequency,
                tvf.resonance,
                tvf.key_follow,
                tvf.bias_point,
                tvf.bias_level,
                tvf.env.depth,
                tvf.env.velocity_range,
                tvf.env.depth_key_follow,
                tvf.env.time_key_follow,
            ],
        )
        .put_all(22, &tvf.env.time)
        .put_all(27, &tvf.env.level)
        .put(30, tvf.env.sustain_level)
        .put(31, tvf.env.end_level)
        .put_all(32, &tvf.modulation.bytes())
        .put_all(35, &[tva.level, tva.velocity_range, tva.bias_point, tva.bias_level])
        .put_all(39, &tva.env.time)
        .put_all(44, &tva.env.level)
        .put_all(
            47,
            &[
                tva.env.sustain_level,
                tva.env.end_level,
                tva.env.velocity_follow,
                tva.env.time_key_follow,
            ],
        )
        .put_all(51, &tva.modulation.bytes());
        w.finish()
    }

    /// Check every field against its maximum
    pub fn validate(&self) -> Result<()> {
        Self::parse(&self.encode()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::D50Error;

    /// Block with a distinct legal value in every used position
    fn sample_block() -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        let values: [u8; 54] = [
            72, 50, 16, 3, 2, 2, 1, 99, 100, 14, 5, 100, 14, // WG
            100, 30, 14, 127, 14, 100, 100, 4, 4, // TVF
            10, 20, 30, 40, 50, 60, 70, 80, 90, 1, // TVF env
            5, 100, 14, // TVF modulation
            100, 100, 127, 12, // TVA
            1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 4, 4, // TVA env
            5, 100, 14, // TVA modulation
        ];
        block[..54].copy_from_slice(&values);
        block
    }

    #[test]
    fn test_parse_maxima() {
        let partial = TonePartial::parse(&sample_block()).unwrap();
        assert_eq!(partial.wg.pitch.coarse, 72);
        assert_eq!(partial.wg.pcm_wave, 99);
        assert_eq!(partial.tvf.bias_point, 127);
        assert_eq!(partial.tvf.env.time, [10, 20, 30, 40, 50]);
        assert_eq!(partial.tvf.env.level, [60, 70, 80]);
        assert_eq!(partial.tvf.env.end_level, 1);
        assert_eq!(partial.tva.bias_level, 12);
        assert_eq!(partial.tva.env.time, [1, 2, 3, 4, 5]);
        assert_eq!(partial.tva.env.level, [6, 7, 8]);
        assert_eq!(partial.tva.modulation.after_touch_range, 14);
    }

    #[test]
    fn test_encode_reproduces_block() {
        let block = sample_block();
        let partial = TonePartial::parse(&block).unwrap();
        assert_eq!(partial.encode(), block);
    }

    #[test]
    fn test_unused_tail_is_ignored_on_parse() {
        let mut block = sample_block();
        block[60] = 0xFF;
        let partial = TonePartial::parse(&block).unwrap();
        assert_eq!(partial.encode()[60], 0);
    }

    #[test]
    fn test_resonance_out_of_range() {
        let mut block = sample_block();
        block[14] = 31;
        let err = TonePartial::parse(&block).unwrap_err();
        assert!(matches!(
            err,
            D50Error::Range {
                unit: "partial",
                field: "tvf.resonance",
                ..
            }
        ));
        assert!(err.to_string().contains("exceeds maximum 30"));
    }

    #[test]
    fn test_validate_rejects_bad_waveform() {
        let mut partial = TonePartial::default();
        assert!(partial.validate().is_ok());
        partial.wg.waveform = 2;
        assert!(partial.validate().is_err());
    }
}
