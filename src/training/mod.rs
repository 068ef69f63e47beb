//! Training infrastructure: the epoch-loop trainer, the epoch-event
//! interface, and the best-epoch metadata tracker.

pub mod tracker;
pub mod trainer;

pub use tracker::{BestEpochTracker, EpochObserver};
pub use trainer::{Trainer, TrainerConfig};
