use anyhow::{Context, Result};
use review_pipeline::config::SentimentConfig;
use review_pipeline::sentiment::{InferenceContext, train_from_config};
use std::env;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let retrain = env::args().any(|arg| arg == "--retrain" || arg == "-r");

    let config = SentimentConfig::from_file("src/configs/sentiment.toml")
        .context("Failed to load sentiment configuration")?;

    // Reuse an existing artifact instead of refitting on every run.
    if !retrain && Path::new(&config.artifact.model_path).exists() {
        let context = InferenceContext::load(&config.artifact.model_path)?;
        info!(
            "Found existing model artifact at {} (classes {:?}); pass --retrain to fit again",
            config.artifact.model_path,
            context.classes()
        );
        return Ok(());
    }

    let (artifact, report) = train_from_config(&config.training)?;
    artifact.save(&config.artifact.model_path)?;

    info!(
        "Training complete: {} train rows, {} test rows, held-out accuracy {:.3}",
        report.train_size, report.test_size, report.accuracy
    );

    Ok(())
}
