mod metadata;
mod weights;

pub use metadata::{EpochLogs, TrainingMetadata, LOSS_KEY, METADATA_FILE, VAL_LOSS_KEY};
pub use weights::{best_weights_path, checkpoint_file_name, CheckpointWriter};
