//! The trainable price-prediction model: the burn LSTM network and the
//! `PricePredictor` seam the trainer and checkpoint writer work against.

mod network;
mod policy;

use std::path::Path;

use crate::checkpoint::EpochLogs;
use crate::data::BatchGenerator;
use crate::error::CheckpointError;

pub use network::{PolicyNetwork, PolicyNetworkConfig};
pub use policy::{LstmPolicy, LstmPolicyConfig};

/// A model the trainer can fit one epoch at a time.
pub trait PricePredictor {
    /// Train over one full pass of `train`, then evaluate on `valid` when
    /// given. Returns the epoch metrics: mean training MSE under `loss`,
    /// validation MSE under `val_loss` when a validation generator was
    /// supplied.
    fn fit_epoch(&mut self, train: &BatchGenerator, valid: Option<&BatchGenerator>) -> EpochLogs;

    /// Persist the current weights to `path`.
    fn save_weights(&self, path: &Path) -> Result<(), CheckpointError>;

    /// Replace the current weights with those stored at `path`.
    fn load_weights(&mut self, path: &Path) -> Result<(), CheckpointError>;
}
