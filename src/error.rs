use std::path::PathBuf;

/// Errors that can occur while loading historical data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read data file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur reading or writing the training metadata file.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to read metadata from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse metadata from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write metadata to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during weight checkpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("failed to save weights: {0}")]
    WeightsSave(String),

    #[error("failed to load weights from {path}: {reason}")]
    WeightsLoad { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("epoch logs contain no '{0}' metric")]
    MissingMetric(&'static str),

    #[error("no training samples (need at least timesteps + predict_days bars per code)")]
    NoTrainingSamples,

    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
