use serde::{Deserialize, Serialize};

/// Configuration for sentiment model training and serving
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentConfig {
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub artifact: ArtifactConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub dataset_path: String,
    pub text_column: String,
    pub label_column: String,
    pub max_features: usize,
    pub test_fraction: f64,
    pub seed: u64,
    pub stemming: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub model_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dashboard_port: u16,
    /// Reviews file the dashboard falls back to when nothing is uploaded.
    pub default_reviews_path: String,
    /// Words shown per label in the frequency charts.
    pub top_words: usize,
    /// Rows shown in the prediction preview table.
    pub preview_rows: usize,
}

impl SentimentConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: SentimentConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: "data/labeled_reviews.csv".to_string(),
            text_column: "body".to_string(),
            label_column: "sentiments".to_string(),
            max_features: 500,
            test_fraction: 0.2,
            seed: 42,
            stemming: true,
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: "artifacts/sentiment_model.json".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dashboard_port: 8081,
            default_reviews_path: "data/raw_reviews.csv".to_string(),
            top_words: 20,
            preview_rows: 15,
        }
    }
}
