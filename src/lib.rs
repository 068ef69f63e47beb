//! # ML Stock Trainer
//!
//! Trains an LSTM price-prediction network on historical per-entity trading
//! data via the Burn ML framework, resuming from the best-scoring checkpoint
//! and tracking per-epoch metrics to a metadata file.
//!
//! ## Modules
//!
//! - [`data`] — Historical bar table, deterministic code partitioner, window
//!   batch generator
//! - [`model`] — LSTM network, trainable policy, the `PricePredictor` seam
//! - [`checkpoint`] — Metadata record, checkpoint naming, best-weights
//!   resolution
//! - [`training`] — Epoch-loop trainer and best-epoch tracker
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

#![recursion_limit = "256"]

pub mod checkpoint;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod training;
