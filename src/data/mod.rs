//! Historical trading data: the bar table, the deterministic
//! train/validation partitioner, and the sliding-window batch generator.

mod frame;
mod generator;
mod partition;

pub use frame::{Bar, HistoryFrame};
pub use generator::{Batch, BatchGenerator};
pub use partition::{partition_by_code, split_codes, CodePartition};
