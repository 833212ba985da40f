//! Patch Domain
//!
//! Typed D-50 patch model and the fixed-layout field codec translating it to
//! and from 64-byte parameter blocks.

pub mod block;
pub mod common;
pub mod layout;
pub mod partial;
pub mod text;
pub mod tone;

pub use common::{PatchCommon, PATCH_NAME_LEN};
pub use layout::{PatchLayout, ToneLayout};
pub use partial::TonePartial;
pub use text::{decode_text, encode_text, TextEncoding, DEVICE_ALPHABET};
pub use tone::{ToneCommon, TONE_NAME_LEN};

use crate::memory::PATCH_DATA_LEN;
use crate::Result;
use serde::{Deserialize, Serialize};

/// One tone: common settings plus two partials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchTone {
    /// Tone common block
    pub common: ToneCommon,
    /// Partial 1
    pub partial1: TonePartial,
    /// Partial 2
    pub partial2: TonePartial,
}

impl PatchTone {
    fn parse(
        record: &[u8],
        layout: &ToneLayout,
        owner: &PatchLayout,
        encoding: TextEncoding,
    ) -> Result<Self> {
        Ok(PatchTone {
            common: ToneCommon::parse(owner.block(record, layout.common)?, encoding)?,
            partial1: TonePartial::parse(owner.block(record, layout.partial1)?)?,
            partial2: TonePartial::parse(owner.block(record, layout.partial2)?)?,
        })
    }

    fn encode_into(
        &self,
        record: &mut [u8],
        layout: &ToneLayout,
        owner: &PatchLayout,
        encoding: TextEncoding,
    ) -> Result<()> {
        owner
            .block_mut(record, layout.common)?
            .copy_from_slice(&self.common.encode(encoding));
        owner
            .block_mut(record, layout.partial1)?
            .copy_from_slice(&self.partial1.encode());
        owner
            .block_mut(record, layout.partial2)?
            .copy_from_slice(&self.partial2.encode());
        Ok(())
    }

    /// Check every field of the tone against its maximum
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        self.partial1.validate()?;
        self.partial2.validate()
    }
}

/// A complete sound: shared settings plus upper and lower tones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    /// Name carried outside the parameter blocks (bank dump records only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Patch common block
    pub common: PatchCommon,
    /// Upper tone
    pub upper_tone: PatchTone,
    /// Lower tone
    pub lower_tone: PatchTone,
}

impl Patch {
    /// Decode the seven parameter blocks of `record` placed per `layout`.
    ///
    /// The returned patch has no outer [`Patch::name`].
    pub fn parse(record: &[u8], layout: &PatchLayout, encoding: TextEncoding) -> Result<Self> {
        Ok(Patch {
            name: None,
            common: PatchCommon::parse(layout.block(record, layout.common)?, encoding)?,
            upper_tone: PatchTone::parse(record, &layout.upper, layout, encoding)?,
            lower_tone: PatchTone::parse(record, &layout.lower, layout, encoding)?,
        })
    }

    /// Encode the seven parameter blocks into a zero-filled 448-byte record
    pub fn encode(&self, layout: &PatchLayout, encoding: TextEncoding) -> Result<Vec<u8>> {
        let mut record = vec![0u8; PATCH_DATA_LEN];
        layout
            .block_mut(&mut record, layout.common)?
            .copy_from_slice(&self.common.encode(encoding));
        self.upper_tone
            .encode_into(&mut record, &layout.upper, layout, encoding)?;
        self.lower_tone
            .encode_into(&mut record, &layout.lower, layout, encoding)?;
        Ok(record)
    }

    /// Check every field against its maximum
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        self.upper_tone.validate()?;
        self.lower_tone.validate()
    }

    /// Display name: the outer name when present, else the common block's
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.common.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::BLOCK_LEN;

    fn named_patch() -> Patch {
        let mut patch = Patch::default();
        patch.common.name = "Digital Native Dan".to_string();
        patch.common.total_volume = 80;
        patch.upper_tone.common.name = "Upper Tone".to_string();
        patch.upper_tone.partial2.wg.pcm_wave = 42;
        patch.lower_tone.common.name = "Lower Tone".to_string();
        patch.lower_tone.partial1.tva.level = 90;
        patch
    }

    #[test]
    fn test_encode_places_blocks() {
        let record = named_patch()
            .encode(&PatchLayout::D50, TextEncoding::Plain)
            .unwrap();
        assert_eq!(record.len(), PATCH_DATA_LEN);
        // Upper partial 2, pcm wave
        assert_eq!(record[BLOCK_LEN + 7], 42);
        // Upper common name
        assert_eq!(&record[2 * BLOCK_LEN..2 * BLOCK_LEN + 10], b"Upper Tone");
        // Lower partial 1, TVA level
        assert_eq!(record[3 * BLOCK_LEN + 35], 90);
        // Patch common
        assert_eq!(&record[6 * BLOCK_LEN..6 * BLOCK_LEN + 7], b"Digital");
        assert_eq!(record[6 * BLOCK_LEN + 32], 80);
    }

    #[test]
    fn test_parse_encode_is_stable() {
        let layout = PatchLayout::D50;
        for encoding in [TextEncoding::Plain, TextEncoding::Device] {
            let once = named_patch().encode(&layout, encoding).unwrap();
            let parsed = Patch::parse(&once, &layout, encoding).unwrap();
            assert_eq!(parsed, named_patch());
            assert_eq!(parsed.encode(&layout, encoding).unwrap(), once);
        }
    }

    #[test]
    fn test_parse_fails_on_first_bad_block() {
        let mut record = named_patch()
            .encode(&PatchLayout::D50, TextEncoding::Plain)
            .unwrap();
        record[4 * BLOCK_LEN + 6] = 2; // lower partial 2 waveform
        let err = Patch::parse(&record, &PatchLayout::D50, TextEncoding::Plain).unwrap_err();
        assert!(err.to_string().contains("wg.waveform"));
    }

    #[test]
    fn test_display_name() {
        let mut patch = named_patch();
        assert_eq!(patch.display_name(), "Digital Native Dan");
        patch.name = Some("Bank Name".to_string());
        assert_eq!(patch.display_name(), "Bank Name");
    }
}
