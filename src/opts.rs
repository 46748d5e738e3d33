//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

mod parsers;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Opts {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Trains the risk model on historical accident datasets
    Train(TrainOpts),

    /// Runs the form-based web application
    Web(WebOpts),

    /// Runs the single-page dashboard application
    Dashboard(WebOpts),
}

#[derive(Args)]
pub struct TrainOpts {
    /// Input CSV datasets with historical observations
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output path for the serialized model artifact
    #[arg(short, long, default_value = "accident_model.pkl")]
    pub output: PathBuf,

    #[command(flatten)]
    pub fit: FitOpts,
}

/// Regression fitting options.
#[derive(Args, Clone, Copy)]
pub struct FitOpts {
    /// SGD learning rate
    #[arg(long = "lr", default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Learning rate decay per epoch
    #[arg(long = "lr-decay", default_value_t = 0.05)]
    pub decay: f64,

    /// Minimal learning rate
    #[arg(long = "min-lr", default_value_t = 0.001)]
    pub min_learning_rate: f64,

    /// Number of passes over the training set
    #[arg(long, default_value_t = 500, value_parser = parsers::non_zero_usize)]
    pub n_epochs: usize,

    /// Holdout fraction for the train/test split
    #[arg(long, default_value_t = 0.2, value_parser = parsers::fraction)]
    pub test_fraction: f64,

    /// Random seed for shuffling and the train/test split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Path to the serialized model artifact
    #[arg(short, long, default_value = "accident_model.pkl", env = "SAFEROAD_MODEL")]
    pub model: PathBuf,
}
