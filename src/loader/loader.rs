//! Dump File Loader
//!
//! Reads and writes dump files, choosing the codec from the file content
//! (falling back to the extension).

#[cfg(feature = "bin-format")]
use crate::formats::bin::BinFormat;
#[cfg(feature = "syx-format")]
use crate::formats::syx::SyxFormat;
use crate::formats::{DumpFormat, FormatKind};
use crate::{D50Error, Dump, Result};
use std::fs;
use std::path::Path;

/// Read a whole file
pub fn read_all_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| D50Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Create or replace a file with `bytes`
pub fn write_all_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| D50Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and saves dump files
pub struct DumpFileLoader;

impl DumpFileLoader {
    /// Load a dump, auto-detecting its format
    pub fn load(path: &Path) -> Result<Dump> {
        let data = read_all_bytes(path)?;
        let kind = Self::detect_format(path, &data)?;
        tracing::debug!(
            path = %path.display(),
            format = kind.as_str(),
            bytes = data.len(),
            "loading dump"
        );
        Self::codec(kind)?.decode(&data)
    }

    /// Save a dump in the format named by the path's extension
    pub fn save(path: &Path, dump: &Dump) -> Result<()> {
        let kind = FormatKind::from_path(path).ok_or_else(|| {
            D50Error::Format(format!(
                "Cannot choose an output format for '{}'. Supported: .syx, .bin",
                path.display()
            ))
        })?;
        let data = Self::codec(kind)?.encode(dump)?;
        tracing::debug!(
            path = %path.display(),
            format = kind.as_str(),
            bytes = data.len(),
            "saving dump"
        );
        write_all_bytes(path, &data)
    }

    /// Detect the format from content, then from the file extension
    pub fn detect_format(path: &Path, data: &[u8]) -> Result<FormatKind> {
        FormatKind::detect(data)
            .or_else(|| FormatKind::from_path(path))
            .ok_or_else(|| {
                D50Error::Format(
                    "Unsupported file format. Supported: SysEx (.syx), bank dump (.bin)"
                        .to_string(),
                )
            })
    }

    /// Codec handling `kind`
    pub fn codec(kind: FormatKind) -> Result<Box<dyn DumpFormat>> {
        match kind {
            #[cfg(feature = "syx-format")]
            FormatKind::Syx => Ok(Box::new(SyxFormat::default())),
            #[cfg(feature = "bin-format")]
            FormatKind::Bin => Ok(Box::new(BinFormat::default())),
            #[allow(unreachable_patterns)]
            other => Err(D50Error::Format(format!(
                "{} support is not enabled in this build",
                other.as_str()
            ))),
        }
    }
}

#[cfg(all(test, feature = "syx-format", feature = "bin-format"))]
mod tests {
    use super::*;
    use crate::memory::PATCH_COUNT;
    use crate::Patch;

    fn sample_dump() -> Dump {
        let mut patches = vec![Patch::default(); PATCH_COUNT];
        for (i, patch) in patches.iter_mut().enumerate() {
            patch.name = Some(format!("Bank {:<13}", i));
            patch.common.name = format!("Common {:<11}", i);
            patch.upper_tone.common.name = "Upper Tone".to_string();
            patch.lower_tone.common.name = "Lower Tone".to_string();
        }
        Dump {
            patches,
            reverb_data: None,
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DumpFileLoader::load(&dir.path().join("missing.syx"));
        assert!(matches!(result, Err(D50Error::Io { .. })));
        assert!(result.unwrap_err().to_string().contains("missing.syx"));
    }

    #[test]
    fn test_bank_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.bin");
        let dump = sample_dump();

        DumpFileLoader::save(&path, &dump).unwrap();
        assert_eq!(read_all_bytes(&path).unwrap().len(), crate::formats::bin::BANK_LEN);
        assert_eq!(DumpFileLoader::load(&path).unwrap(), dump);
    }

    #[test]
    fn test_sysex_detected_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let syx = dir.path().join("dump.syx");
        let mut dump = sample_dump();
        DumpFileLoader::save(&syx, &dump).unwrap();

        // Misleading extension; content wins
        let renamed = dir.path().join("dump.bin");
        fs::rename(&syx, &renamed).unwrap();
        let loaded = DumpFileLoader::load(&renamed).unwrap();

        // SysEx carries no outer names; the reverb area comes back zeroed
        for patch in dump.patches.iter_mut() {
            patch.name = None;
        }
        assert_eq!(loaded.patches, dump.patches);
        assert!(loaded.reverb_data.is_some());
    }

    #[test]
    fn test_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        write_all_bytes(&path, b"hello").unwrap();
        let result = DumpFileLoader::load(&path);
        assert!(matches!(result, Err(D50Error::Format(_))));

        assert!(DumpFileLoader::save(&path, &sample_dump()).is_err());
    }
}
