pub mod harvest_config;
pub mod sentiment_config;

pub use harvest_config::HarvestConfig;
pub use sentiment_config::SentimentConfig;
