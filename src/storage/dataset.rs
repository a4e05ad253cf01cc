use anyhow::{Context, Result};
use polars::prelude::*;
use std::io::Cursor;

/// One labeled training row.
#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub text: String,
    pub label: String,
}

/// Load the labeled training dataset, dropping rows where either the
/// text or the label is missing.
pub fn load_labeled_dataset(
    path: &str,
    text_column: &str,
    label_column: &str,
) -> Result<Vec<LabeledSample>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let df = read_csv_bytes(&bytes)?;

    let texts = string_column(&df, text_column)?;
    let labels = string_column(&df, label_column)?;

    Ok(texts
        .into_iter()
        .zip(labels)
        .filter(|(text, label)| !text.is_empty() && !label.is_empty())
        .map(|(text, label)| LabeledSample { text, label })
        .collect())
}

/// Load the `body` column of a reviews CSV, dropping empty rows.
pub fn load_review_bodies(path: &str) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    load_review_bodies_from_bytes(&bytes)
}

/// Same as [`load_review_bodies`], for an uploaded file already in memory.
pub fn load_review_bodies_from_bytes(bytes: &[u8]) -> Result<Vec<String>> {
    let df = read_csv_bytes(bytes)?;
    let bodies = string_column(&df, "body")?;
    Ok(bodies.into_iter().filter(|body| !body.is_empty()).collect())
}

fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    // Harvested files carry a UTF-8 BOM for spreadsheet compatibility.
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(bytes);

    CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .context("Failed to parse CSV data")
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df
        .column(name)
        .with_context(|| format!("CSV has no '{}' column", name))?;
    let values = series
        .str()
        .with_context(|| format!("Column '{}' is not text", name))?;

    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or("").trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_csv(name: &str, content: &[u8]) -> String {
        let path = std::env::temp_dir()
            .join(format!("review-pipeline-{}-{}", std::process::id(), name))
            .to_string_lossy()
            .to_string();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_loads_labeled_rows_and_drops_incomplete_ones() {
        let path = temp_csv(
            "labeled.csv",
            b"body,sentiments\ngreat product,positive\n,negative\nmeh product,\nbad product,negative\n",
        );

        let samples = load_labeled_dataset(&path, "body", "sentiments").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].text, "great product");
        assert_eq!(samples[1].label, "negative");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let path = temp_csv("nocolumn.csv", b"title,rating\nGreat,5\n");
        assert!(load_review_bodies(&path).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bom_prefixed_csv_parses() {
        let mut content = b"\xef\xbb\xbf".to_vec();
        content.extend_from_slice(b"body\nfirst review\nsecond review\n");

        let bodies = load_review_bodies_from_bytes(&content).unwrap();
        assert_eq!(bodies, vec!["first review", "second review"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_review_bodies("/nonexistent/reviews.csv").is_err());
    }
}
