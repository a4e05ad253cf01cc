pub mod inference;
pub mod label_encoder;
pub mod trainer;
pub mod vectorizer;

pub use inference::{InferenceContext, SentimentArtifact};
pub use label_encoder::LabelEncoder;
pub use trainer::{TrainingReport, train_from_config, train_samples};
pub use vectorizer::TfidfVectorizer;
