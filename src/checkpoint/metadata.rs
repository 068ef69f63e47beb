use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// Per-epoch metric mapping, e.g. `{"loss": 0.42, "val_loss": 0.51}`.
pub type EpochLogs = BTreeMap<String, f64>;

/// Comparison key used when the epoch ran with a validation set.
pub const VAL_LOSS_KEY: &str = "val_loss";
/// Fallback comparison key.
pub const LOSS_KEY: &str = "loss";

/// File name of the metadata document inside the output directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Training metadata written to metadata.json after every epoch.
///
/// `best_epoch` always indexes a valid element of `epochs`. The document is
/// fully overwritten on each write, so on disk it is at most one epoch stale
/// and never contains partial-epoch state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub epochs: Vec<EpochLogs>,
    pub best_epoch: usize,
}

impl TrainingMetadata {
    /// An empty record: no epochs yet, best epoch 0.
    pub fn new() -> Self {
        TrainingMetadata {
            epochs: Vec::new(),
            best_epoch: 0,
        }
    }

    /// Read and parse a metadata document.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let json = fs::read_to_string(path).map_err(|e| MetadataError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| MetadataError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Overwrite the metadata document with the current record.
    pub fn save(&self, path: &Path) -> Result<(), MetadataError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| MetadataError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl Default for TrainingMetadata {
    fn default() -> Self {
        Self::new()
    }
}
