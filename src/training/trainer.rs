use std::path::PathBuf;

use crate::checkpoint::{
    best_weights_path, CheckpointWriter, TrainingMetadata, LOSS_KEY, METADATA_FILE, VAL_LOSS_KEY,
};
use crate::data::{partition_by_code, BatchGenerator, HistoryFrame};
use crate::error::TrainingError;
use crate::model::PricePredictor;
use crate::training::tracker::{BestEpochTracker, EpochObserver};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub epochs: usize,
    pub timesteps: usize,
    pub predict_days: usize,
    pub batch_size: usize,
    pub validation_split: f32,
    pub output_dir: PathBuf,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            epochs: 50,
            timesteps: 15,
            predict_days: 18,
            batch_size: 32,
            validation_split: 0.3,
            output_dir: PathBuf::from("dw"),
        }
    }
}

/// Epoch-loop trainer: partitions the data by code, resumes from the best
/// recorded checkpoint, and delivers one checkpoint write plus one tracker
/// event per epoch.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Run the full training loop and return the final metadata record.
    pub fn train(
        &self,
        model: &mut dyn PricePredictor,
        frame: &HistoryFrame,
    ) -> Result<TrainingMetadata, TrainingError> {
        let (train_frame, valid_frame) =
            partition_by_code(frame, self.config.validation_split);
        let train_gen = BatchGenerator::new(
            &train_frame,
            self.config.timesteps,
            self.config.predict_days,
            self.config.batch_size,
        );
        let valid_gen = BatchGenerator::new(
            &valid_frame,
            self.config.timesteps,
            self.config.predict_days,
            self.config.batch_size,
        );
        if train_gen.n_samples() == 0 {
            return Err(TrainingError::NoTrainingSamples);
        }
        // An empty validation partition just means no val_loss this run.
        let valid = (valid_gen.n_samples() > 0).then_some(&valid_gen);

        let writer = CheckpointWriter::new(self.config.output_dir.clone());
        let meta_file = self.config.output_dir.join(METADATA_FILE);

        // Resume: a recorded best checkpoint that has since been deleted is
        // a fatal load error, not a silent fresh start.
        if let Some(weights) = best_weights_path(&meta_file)? {
            model.load_weights(&weights)?;
            println!("Resumed best weights from {}", weights.display());
        }

        let mut tracker = BestEpochTracker::new(meta_file);

        println!(
            "Starting training for {} epochs ({} train / {} valid samples)...",
            self.config.epochs,
            train_gen.n_samples(),
            valid_gen.n_samples(),
        );
        println!("-------------------------------------------");

        for epoch in 0..self.config.epochs {
            let logs = model.fit_epoch(&train_gen, valid);

            // Checkpoint before metadata, so the metadata file never refers
            // to weights that were not yet written.
            writer.save(&*model, epoch)?;
            tracker.on_epoch_end(epoch, &logs)?;

            let loss = logs.get(LOSS_KEY).copied().unwrap_or(f64::NAN);
            match logs.get(VAL_LOSS_KEY) {
                Some(val_loss) => println!(
                    "Epoch {}/{} | loss: {:.6} | val_loss: {:.6} | best: {}",
                    epoch + 1,
                    self.config.epochs,
                    loss,
                    val_loss,
                    tracker.best_epoch(),
                ),
                None => println!(
                    "Epoch {}/{} | loss: {:.6} | best: {}",
                    epoch + 1,
                    self.config.epochs,
                    loss,
                    tracker.best_epoch(),
                ),
            }
        }

        println!("-------------------------------------------");
        println!("Training complete. Best epoch: {}", tracker.best_epoch());

        Ok(tracker.metadata().clone())
    }
}
