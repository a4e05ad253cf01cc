use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;
use std::path::Path;
use tracing::info;

use crate::processor::TextNormalizer;
use crate::sentiment::label_encoder::LabelEncoder;
use crate::sentiment::vectorizer::TfidfVectorizer;

pub type SentimentModel = LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// The persisted training output: vectorizer state, label encoding and
/// model weights, plus the normalization choice the model was trained
/// with. Written once by training, loaded unchanged until retrained.
#[derive(Serialize, Deserialize)]
pub struct SentimentArtifact {
    pub created_at: String,
    pub stemming: bool,
    pub vectorizer: TfidfVectorizer,
    pub labels: LabelEncoder,
    pub model: SentimentModel,
}

impl SentimentArtifact {
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string(self).context("Failed to serialize model artifact")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write model artifact to {}", path))?;
        info!("Saved model artifact to {}", path);
        Ok(())
    }

    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact at {}", path))?;
        let artifact: SentimentArtifact = serde_json::from_str(&content)
            .with_context(|| format!("Malformed model artifact at {}", path))?;
        Ok(artifact)
    }
}

/// Immutable prediction bundle built once at service start from a
/// persisted artifact and shared read-only by every request. Swapping
/// the model means restarting the service with a new artifact.
pub struct InferenceContext {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    labels: LabelEncoder,
    model: SentimentModel,
}

impl InferenceContext {
    pub fn from_artifact(artifact: SentimentArtifact) -> Self {
        InferenceContext {
            normalizer: TextNormalizer::with_stemming(artifact.stemming),
            vectorizer: artifact.vectorizer,
            labels: artifact.labels,
            model: artifact.model,
        }
    }

    pub fn load(path: &str) -> Result<Self> {
        Ok(Self::from_artifact(SentimentArtifact::load(path)?))
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn classes(&self) -> &[String] {
        self.labels.classes()
    }

    /// Classify one text, returning a label from the trained class set.
    pub fn predict(&self, text: &str) -> Result<String> {
        let processed = self.normalizer.normalize(text);
        let features = self.vectorizer.transform_document(&processed);

        let matrix = DenseMatrix::from_2d_vec(&vec![features]);
        let predictions = self
            .model
            .predict(&matrix)
            .map_err(|e| anyhow!("Prediction failed: {}", e))?;

        let index = predictions
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Model returned no prediction"))?;
        self.labels
            .decode(index)
            .map(|label| label.to_string())
            .ok_or_else(|| anyhow!("Model returned unknown class index {}", index))
    }
}
