//! The persisted run record handed from interact to analyze.
//!
//! A single flat JSON document written wholesale after a fully successful
//! scripted run, and read wholesale by the analyzer. Each run overwrites the
//! previous one; there is exactly one writer and one reader, never at the
//! same time, so no locking or versioning is needed.

use std::path::Path;

use alloy::primitives::{Address, B256};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default run file name, relative to the working directory.
pub const DEFAULT_RUN_FILE: &str = "txhashes.json";

/// The complete, successful transaction triple of one interact run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub token: Address,
    pub recipient: Address,
    pub tx1: B256,
    pub tx2: B256,
    pub tx3: B256,
}

impl RunRecord {
    /// Write the record as pretty JSON, replacing any prior run.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).wrap_err("failed to encode run record")?;
        std::fs::write(path, json)
            .wrap_err_with(|| format!("failed to write run file {}", path.display()))?;
        Ok(())
    }

    /// Read a previously saved record.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read run file {}", path.display()))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("malformed run file {}", path.display()))
    }

    /// The recorded hashes in submission order.
    pub fn tx_hashes(&self) -> [B256; 3] {
        [self.tx1, self.tx2, self.tx3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: u8) -> RunRecord {
        RunRecord {
            token: Address::repeat_byte(0x11),
            recipient: Address::repeat_byte(0x22),
            tx1: B256::repeat_byte(seed),
            tx2: B256::repeat_byte(seed + 1),
            tx3: B256::repeat_byte(seed + 2),
        }
    }

    #[test]
    fn round_trip_reproduces_the_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("txhashes.json");

        let original = record(0xa0);
        original.save(&path).expect("save");
        let loaded = RunRecord::load(&path).expect("load");

        assert_eq!(loaded, original);
    }

    #[test]
    fn save_overwrites_previous_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("txhashes.json");

        record(0x01).save(&path).expect("first save");
        let second = record(0x42);
        second.save(&path).expect("second save");

        assert_eq!(RunRecord::load(&path).expect("load"), second);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = RunRecord::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn hashes_keep_submission_order() {
        let r = record(0x10);
        assert_eq!(r.tx_hashes(), [r.tx1, r.tx2, r.tx3]);
    }
}
