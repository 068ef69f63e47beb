use std::fs;
use std::path::{Path, PathBuf};

use crate::checkpoint::metadata::TrainingMetadata;
use crate::error::{CheckpointError, MetadataError};
use crate::model::PricePredictor;

/// Checkpoint file name for a given epoch, e.g. `weights.00007.h5`.
///
/// The `.h5` extension is the historical convention for these files; the
/// payload is the model's own weight serialization.
pub fn checkpoint_file_name(epoch: usize) -> String {
    format!("weights.{epoch:05}.h5")
}

/// Resolve the checkpoint path for the best epoch recorded in `meta_file`.
///
/// Returns `None` if the metadata file does not exist. The returned path is
/// not verified: if the checkpoint was deleted since the metadata was
/// written, the caller's weight load fails instead.
pub fn best_weights_path(meta_file: &Path) -> Result<Option<PathBuf>, MetadataError> {
    if !meta_file.exists() {
        return Ok(None);
    }
    let metadata = TrainingMetadata::load(meta_file)?;
    let dir = meta_file.parent().unwrap_or_else(|| Path::new(""));
    Ok(Some(dir.join(checkpoint_file_name(metadata.best_epoch))))
}

/// Writes one weight checkpoint per epoch into the output directory.
pub struct CheckpointWriter {
    dir: PathBuf,
}

impl CheckpointWriter {
    pub fn new(dir: PathBuf) -> Self {
        fs::create_dir_all(&dir).ok();
        CheckpointWriter { dir }
    }

    /// Save the model weights for `epoch` and return the checkpoint path.
    pub fn save(
        &self,
        model: &dyn PricePredictor,
        epoch: usize,
    ) -> Result<PathBuf, CheckpointError> {
        let path = self.dir.join(checkpoint_file_name(epoch));
        model.save_weights(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::metadata::{EpochLogs, METADATA_FILE};

    #[test]
    fn test_checkpoint_file_name_zero_padded() {
        assert_eq!(checkpoint_file_name(0), "weights.00000.h5");
        assert_eq!(checkpoint_file_name(7), "weights.00007.h5");
        assert_eq!(checkpoint_file_name(12345), "weights.12345.h5");
    }

    #[test]
    fn test_resolver_returns_best_epoch_path() {
        let dir = tempfile::tempdir().unwrap();
        let meta_file = dir.path().join(METADATA_FILE);

        let mut metadata = TrainingMetadata::new();
        for _ in 0..8 {
            metadata.epochs.push(EpochLogs::new());
        }
        metadata.best_epoch = 7;
        metadata.save(&meta_file).unwrap();

        let path = best_weights_path(&meta_file).unwrap().unwrap();
        assert!(path.ends_with("weights.00007.h5"));
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_resolver_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let meta_file = dir.path().join(METADATA_FILE);
        assert!(best_weights_path(&meta_file).unwrap().is_none());
    }

    #[test]
    fn test_resolver_does_not_verify_checkpoint_exists() {
        let dir = tempfile::tempdir().unwrap();
        let meta_file = dir.path().join(METADATA_FILE);

        let mut metadata = TrainingMetadata::new();
        metadata.epochs.push(EpochLogs::new());
        metadata.best_epoch = 0;
        metadata.save(&meta_file).unwrap();

        // No weights.00000.h5 on disk; the resolver still hands back the path.
        let path = best_weights_path(&meta_file).unwrap().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_resolver_propagates_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let meta_file = dir.path().join(METADATA_FILE);
        std::fs::write(&meta_file, "not json").unwrap();

        let err = best_weights_path(&meta_file).unwrap_err();
        assert!(matches!(err, MetadataError::Parse { .. }));
    }
}
