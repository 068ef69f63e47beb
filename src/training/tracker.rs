use std::path::PathBuf;

use crate::checkpoint::{EpochLogs, TrainingMetadata, LOSS_KEY, VAL_LOSS_KEY};
use crate::error::TrainingError;

/// Receives one event per completed epoch, after the epoch's checkpoint has
/// been written.
pub trait EpochObserver {
    fn on_epoch_end(&mut self, epoch: usize, logs: &EpochLogs) -> Result<(), TrainingError>;
}

/// Records per-epoch metrics, tracks the best epoch, and overwrites the
/// metadata file after every epoch.
///
/// The in-memory record starts empty at construction, so after a resume the
/// best epoch is tracked only within the current process's epoch history.
pub struct BestEpochTracker {
    path: PathBuf,
    metadata: TrainingMetadata,
}

impl BestEpochTracker {
    pub fn new(path: PathBuf) -> Self {
        BestEpochTracker {
            path,
            metadata: TrainingMetadata::new(),
        }
    }

    pub fn metadata(&self) -> &TrainingMetadata {
        &self.metadata
    }

    pub fn best_epoch(&self) -> usize {
        self.metadata.best_epoch
    }
}

impl EpochObserver for BestEpochTracker {
    /// The supplied epoch index is deliberately ignored: a resumed training
    /// loop renumbers its epochs, so the true index is recomputed as the
    /// current length of the in-memory record.
    fn on_epoch_end(&mut self, _epoch: usize, logs: &EpochLogs) -> Result<(), TrainingError> {
        let epoch = self.metadata.epochs.len();
        self.metadata.epochs.push(logs.clone());

        let key = if logs.contains_key(VAL_LOSS_KEY) {
            VAL_LOSS_KEY
        } else {
            LOSS_KEY
        };

        let best = self.metadata.epochs[self.metadata.best_epoch]
            .get(key)
            .copied()
            .ok_or(TrainingError::MissingMetric(key))?;
        let current = logs
            .get(key)
            .copied()
            .ok_or(TrainingError::MissingMetric(key))?;
        if current < best {
            self.metadata.best_epoch = epoch;
        }

        self.metadata.save(&self.path)?;
        Ok(())
    }
}
