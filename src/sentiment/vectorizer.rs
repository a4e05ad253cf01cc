use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Bag-of-n-grams TF-IDF vectorizer over already-normalized text.
/// The vocabulary covers unigrams and bigrams, capped at `max_features`
/// by corpus frequency. Fitted once during training; the fitted state
/// travels inside the persisted model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        TfidfVectorizer {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Build the vocabulary and IDF weights from a normalized corpus.
    pub fn fit(&mut self, documents: &[String]) {
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        for document in documents {
            for gram in ngrams(document) {
                *corpus_counts.entry(gram).or_insert(0) += 1;
            }
        }

        // Keep the most frequent terms; ties break alphabetically so a
        // refit over the same corpus reproduces the same vocabulary.
        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        let mut document_frequencies = vec![0usize; self.vocabulary.len()];
        for document in documents {
            let unique: HashSet<String> = ngrams(document).collect();
            for gram in unique {
                if let Some(&index) = self.vocabulary.get(&gram) {
                    document_frequencies[index] += 1;
                }
            }
        }

        let total_documents = documents.len() as f64;
        self.idf = document_frequencies
            .iter()
            .map(|&frequency| {
                if frequency == 0 {
                    0.0
                } else {
                    (total_documents / frequency as f64).ln()
                }
            })
            .collect();
    }

    /// TF-IDF weights for one normalized document. Out-of-vocabulary
    /// terms are ignored; a document with no known terms maps to the
    /// zero vector.
    pub fn transform_document(&self, document: &str) -> Vec<f64> {
        let mut counts = vec![0u32; self.vocabulary.len()];
        for gram in ngrams(document) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                counts[index] += 1;
            }
        }

        let total_terms: u32 = counts.iter().sum();
        if total_terms == 0 {
            return vec![0.0; self.vocabulary.len()];
        }

        counts
            .iter()
            .zip(&self.idf)
            .map(|(&count, &idf)| (count as f64 / total_terms as f64) * idf)
            .collect()
    }

    pub fn transform(&self, documents: &[String]) -> Vec<Vec<f64>> {
        documents
            .iter()
            .map(|document| self.transform_document(document))
            .collect()
    }
}

fn ngrams(document: &str) -> impl Iterator<Item = String> + '_ {
    let tokens: Vec<&str> = document.split_whitespace().collect();
    let unigrams: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    let bigrams: Vec<String> = tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();
    unigrams.into_iter().chain(bigrams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "good battery life".to_string(),
            "bad battery".to_string(),
            "good screen".to_string(),
        ]
    }

    #[test]
    fn test_vocabulary_contains_unigrams_and_bigrams() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&corpus());

        assert!(vectorizer.vocabulary.contains_key("battery"));
        assert!(vectorizer.vocabulary.contains_key("good battery"));
        assert!(vectorizer.vocabulary.contains_key("battery life"));
    }

    #[test]
    fn test_vocabulary_capped_at_max_features() {
        let mut vectorizer = TfidfVectorizer::new(3);
        vectorizer.fit(&corpus());
        assert_eq!(vectorizer.vocabulary_len(), 3);
        assert_eq!(vectorizer.idf.len(), 3);
    }

    #[test]
    fn test_rare_terms_weigh_more_than_common_ones() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&corpus());

        let weights = vectorizer.transform_document("battery screen");
        let battery = weights[vectorizer.vocabulary["battery"]];
        let screen = weights[vectorizer.vocabulary["screen"]];
        // "battery" appears in two documents, "screen" in one.
        assert!(screen > battery);
    }

    #[test]
    fn test_unknown_document_maps_to_zero_vector() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&corpus());

        let weights = vectorizer.transform_document("completely unrelated words");
        assert!(weights.iter().all(|&w| w == 0.0));
        assert_eq!(weights.len(), vectorizer.vocabulary_len());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let mut a = TfidfVectorizer::new(5);
        let mut b = TfidfVectorizer::new(5);
        a.fit(&corpus());
        b.fit(&corpus());
        assert_eq!(a.vocabulary, b.vocabulary);
        assert_eq!(a.idf, b.idf);
    }

    #[test]
    fn test_serialized_state_round_trips() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&corpus());

        let json = serde_json::to_string(&vectorizer).unwrap();
        let restored: TfidfVectorizer = serde_json::from_str(&json).unwrap();
        assert_eq!(
            restored.transform_document("good battery"),
            vectorizer.transform_document("good battery")
        );
    }
}
