use anyhow::{Context, Result};
use review_pipeline::config::SentimentConfig;
use review_pipeline::sentiment::InferenceContext;
use review_pipeline::server;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = SentimentConfig::from_file("src/configs/sentiment.toml")
        .context("Failed to load sentiment configuration")?;

    // The inference context is built once here and shared read-only by
    // every request; a new model means restarting the service.
    let context = InferenceContext::load(&config.artifact.model_path)
        .context("Failed to load model artifact; run train_sentiment first")?;
    info!("Loaded model with classes {:?}", context.classes());

    let router = server::predict_router(Arc::new(context));
    server::serve(router, &config.server.host, config.server.port).await
}
