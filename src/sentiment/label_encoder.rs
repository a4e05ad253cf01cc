use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Maps sentiment labels to the integer classes the model trains on and
/// back. Classes are kept sorted so encoding is stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit(labels: &[String]) -> Self {
        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();
        LabelEncoder { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, label: &str) -> Option<i32> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|index| index as i32)
    }

    pub fn encode_all(&self, labels: &[String]) -> Result<Vec<i32>> {
        labels
            .iter()
            .map(|label| {
                self.encode(label)
                    .ok_or_else(|| anyhow!("Unknown sentiment label: {}", label))
            })
            .collect()
    }

    pub fn decode(&self, index: i32) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(|c| c.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["positive", "negative", "neutral", "positive", "negative"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_classes_sorted_and_deduplicated() {
        let encoder = LabelEncoder::fit(&labels());
        assert_eq!(encoder.classes(), &["negative", "neutral", "positive"]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let encoder = LabelEncoder::fit(&labels());
        for class in encoder.classes() {
            let index = encoder.encode(class).unwrap();
            assert_eq!(encoder.decode(index), Some(class.as_str()));
        }
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let encoder = LabelEncoder::fit(&labels());
        assert!(encoder.encode("mixed").is_none());
        assert!(encoder.encode_all(&["mixed".to_string()]).is_err());
        assert_eq!(encoder.decode(17), None);
        assert_eq!(encoder.decode(-1), None);
    }
}
