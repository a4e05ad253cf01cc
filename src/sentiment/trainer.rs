use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;
use tracing::info;

use crate::config::sentiment_config::TrainingConfig;
use crate::processor::TextNormalizer;
use crate::sentiment::inference::SentimentArtifact;
use crate::sentiment::label_encoder::LabelEncoder;
use crate::sentiment::vectorizer::TfidfVectorizer;
use crate::storage::dataset::{LabeledSample, load_labeled_dataset};

/// Held-out evaluation of a training run.
#[derive(Debug)]
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
}

/// Train from the configured dataset file. Deterministic for a fixed
/// file and seed.
pub fn train_from_config(config: &TrainingConfig) -> Result<(SentimentArtifact, TrainingReport)> {
    let samples = load_labeled_dataset(
        &config.dataset_path,
        &config.text_column,
        &config.label_column,
    )
    .with_context(|| format!("Failed to load dataset {}", config.dataset_path))?;

    info!(
        "Loaded {} labeled rows from {}",
        samples.len(),
        config.dataset_path
    );

    train_samples(&samples, config)
}

pub fn train_samples(
    samples: &[LabeledSample],
    config: &TrainingConfig,
) -> Result<(SentimentArtifact, TrainingReport)> {
    if samples.is_empty() {
        bail!("No usable labeled rows to train on");
    }

    let normalizer = TextNormalizer::with_stemming(config.stemming);
    let processed: Vec<String> = samples
        .iter()
        .map(|sample| normalizer.normalize(&sample.text))
        .collect();
    let labels: Vec<String> = samples.iter().map(|sample| sample.label.clone()).collect();

    let encoder = LabelEncoder::fit(&labels);
    if encoder.classes().len() < 2 {
        bail!(
            "Need at least two sentiment classes, found {:?}",
            encoder.classes()
        );
    }
    let encoded = encoder.encode_all(&labels)?;

    let mut vectorizer = TfidfVectorizer::new(config.max_features);
    vectorizer.fit(&processed);
    info!(
        "Fitted vectorizer with {} features over {} documents",
        vectorizer.vocabulary_len(),
        processed.len()
    );

    let (train_indices, test_indices) =
        stratified_split(&encoded, config.test_fraction, config.seed);

    let train_rows: Vec<Vec<f64>> = train_indices
        .iter()
        .map(|&i| vectorizer.transform_document(&processed[i]))
        .collect();
    let y_train: Vec<i32> = train_indices.iter().map(|&i| encoded[i]).collect();

    let x_train = DenseMatrix::from_2d_vec(&train_rows);
    let model = LogisticRegression::fit(&x_train, &y_train, Default::default())
        .map_err(|e| anyhow!("Failed to fit logistic regression: {}", e))?;

    let accuracy = if test_indices.is_empty() {
        0.0
    } else {
        let test_rows: Vec<Vec<f64>> = test_indices
            .iter()
            .map(|&i| vectorizer.transform_document(&processed[i]))
            .collect();
        let y_test: Vec<i32> = test_indices.iter().map(|&i| encoded[i]).collect();

        let x_test = DenseMatrix::from_2d_vec(&test_rows);
        let predictions = model
            .predict(&x_test)
            .map_err(|e| anyhow!("Failed to evaluate model: {}", e))?;

        let correct = predictions
            .iter()
            .zip(&y_test)
            .filter(|(predicted, actual)| predicted == actual)
            .count();
        correct as f64 / y_test.len() as f64
    };

    info!(
        "Trained on {} rows, evaluated on {} rows, accuracy {:.3}",
        train_indices.len(),
        test_indices.len(),
        accuracy
    );

    let artifact = SentimentArtifact {
        created_at: Utc::now().to_rfc3339(),
        stemming: config.stemming,
        vectorizer,
        labels: encoder,
        model,
    };
    let report = TrainingReport {
        train_size: train_indices.len(),
        test_size: test_indices.len(),
        accuracy,
    };

    Ok((artifact, report))
}

/// Per-class shuffled split so every sentiment keeps roughly the same
/// share in train and test. Deterministic for a fixed seed.
fn stratified_split(labels: &[i32], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut classes: Vec<i32> = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for class in classes {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == class)
            .map(|(index, _)| index)
            .collect();
        members.shuffle(&mut rng);

        // Leave at least one member in the training split.
        let mut test_count = (members.len() as f64 * test_fraction).round() as usize;
        if test_count >= members.len() {
            test_count = members.len().saturating_sub(1);
        }

        test_indices.extend(members.drain(..test_count));
        train_indices.extend(members);
    }

    train_indices.sort_unstable();
    test_indices.sort_unstable();
    (train_indices, test_indices)
}
