use anyhow::{Context, Result};
use review_pipeline::config::SentimentConfig;
use review_pipeline::sentiment::InferenceContext;
use review_pipeline::server::{self, DashboardState};
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

    let context = Arc::new(
        InferenceContext::load(&config.artifact.model_path)
            .context("Failed to load model artifact; run train_sentiment first")?,
    );
    info!(
        "Loaded model with classes {:?}, default reviews file {}",
        context.classes(),
        config.server.default_reviews_path
    );

    let state = Arc::new(DashboardState::new(context.clone(), &config.server));
    let router = server::predict_router(context).merge(server::dashboard_router(state));

    server::serve(router, &config.server.host, config.server.dashboard_port).await
}
