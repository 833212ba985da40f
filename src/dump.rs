//! Dump root structure
//!
//! A [`Dump`] is the full content of one transfer: 64 patches and, for SysEx
//! transfers, the 32 reverb blocks kept as raw bytes.

use crate::memory::{PATCH_COUNT, REVERB_COUNT, REVERB_DATA_LEN};
use crate::patch::Patch;
use crate::{D50Error, Result};
use serde::{Deserialize, Serialize};

/// Opaque 376-byte reverb parameter block
pub type ReverbData = Vec<u8>;

/// Decoded D-50 memory content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dump {
    /// Exactly 64 patches, in memory order
    pub patches: Vec<Patch>,
    /// Exactly 32 reverb blocks when the source carried them
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reverb_data: Option<Vec<ReverbData>>,
}

impl Dump {
    /// Check patch/reverb counts, reverb block sizes and every field range
    pub fn validate(&self) -> Result<()> {
        if self.patches.len() != PATCH_COUNT {
            return Err(D50Error::Format(format!(
                "Dump holds {} patches, expected {}",
                self.patches.len(),
                PATCH_COUNT
            )));
        }

        if let Some(reverbs) = &self.reverb_data {
            if reverbs.len() != REVERB_COUNT {
                return Err(D50Error::Format(format!(
                    "Dump holds {} reverb blocks, expected {}",
                    reverbs.len(),
                    REVERB_COUNT
                )));
            }
            if let Some((i, reverb)) = reverbs
                .iter()
                .enumerate()
                .find(|(_, r)| r.len() != REVERB_DATA_LEN)
            {
                return Err(D50Error::Format(format!(
                    "Reverb block {} is {} bytes, expected {}",
                    i,
                    reverb.len(),
                    REVERB_DATA_LEN
                )));
            }
        }

        self.patches.iter().try_for_each(Patch::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_dump() -> Dump {
        Dump {
            patches: vec![Patch::default(); PATCH_COUNT],
            reverb_data: Some(vec![vec![0u8; REVERB_DATA_LEN]; REVERB_COUNT]),
        }
    }

    #[test]
    fn test_valid_dump() {
        assert!(empty_dump().validate().is_ok());
    }

    #[test]
    fn test_wrong_patch_count() {
        let mut dump = empty_dump();
        dump.patches.pop();
        let err = dump.validate().unwrap_err();
        assert!(err.to_string().contains("63 patches"));
    }

    #[test]
    fn test_short_reverb_block() {
        let mut dump = empty_dump();
        if let Some(reverbs) = dump.reverb_data.as_mut() {
            reverbs[7].truncate(100);
        }
        let err = dump.validate().unwrap_err();
        assert!(err.to_string().contains("Reverb block 7"));
    }

    #[test]
    fn test_field_range_checked() {
        let mut dump = empty_dump();
        dump.patches[10].lower_tone.common.eq.high_q = 9;
        assert!(matches!(dump.validate(), Err(D50Error::Range { .. })));
    }

    #[test]
    fn test_json_omits_missing_reverb() {
        let dump = Dump {
            patches: vec![Patch::default()],
            reverb_data: None,
        };
        let json = serde_json::to_string(&dump).unwrap();
        assert!(!json.contains("reverbData"));
        let back: Dump = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dump);
    }
}
