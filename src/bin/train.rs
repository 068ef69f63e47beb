#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_stock_trainer::config::AppConfig;
use ml_stock_trainer::data::{Bar, HistoryFrame};
use ml_stock_trainer::model::LstmPolicy;
use ml_stock_trainer::training::trainer::Trainer;

/// Train the LSTM price-prediction model on historical trading data.
#[derive(Parser)]
#[command(name = "train", about = "Train the LSTM price-prediction model")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// CSV of historical bars (code,date,open,high,low,close,volume).
    /// Falls back to a seeded synthetic dataset when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Override number of training epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Override output directory for checkpoints and metadata
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(epochs) = cli.epochs {
        config.training.epochs = epochs;
    }
    if let Some(lr) = cli.lr {
        config.model.learning_rate = lr;
    }
    if let Some(output_dir) = cli.output_dir {
        config.training.output_dir = output_dir;
    }
    config.validate().context("validating configuration")?;

    let frame = match &cli.data {
        Some(path) => HistoryFrame::from_csv(path)
            .with_context(|| format!("loading history from {}", path.display()))?,
        None => {
            println!("No --data given, using synthetic random-walk history");
            HistoryFrame::synthetic(20, 300, 42)
        }
    };
    anyhow::ensure!(!frame.is_empty(), "historical data set is empty");
    anyhow::ensure!(
        config.model.data_dim == Bar::FEATURE_DIM,
        "model.data_dim must be {} to match the bar feature layout",
        Bar::FEATURE_DIM
    );
    println!(
        "Loaded {} bars across {} codes",
        frame.len(),
        frame.distinct_codes().len()
    );

    let mut model = LstmPolicy::new(config.model.clone());
    let trainer = Trainer::new(config.training.clone());
    let metadata = trainer
        .train(&mut model, &frame)
        .context("training failed")?;

    let best = &metadata.epochs[metadata.best_epoch];
    println!(
        "Best epoch {} with metrics {:?} (checkpoints in {})",
        metadata.best_epoch,
        best,
        config.training.output_dir.display()
    );
    Ok(())
}
