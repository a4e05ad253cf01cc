use anyhow::{Context, Result, anyhow};
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::models::{REVIEW_FIELDS, Review};

/// Byte-order mark so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub fn reviews_to_dataframe(reviews: &[Review]) -> Result<DataFrame> {
    let mut columns = Vec::new();
    for field in REVIEW_FIELDS.iter() {
        let values: Vec<String> = reviews
            .iter()
            .map(|review| review.field(field).to_string())
            .collect();
        let series = Series::new((*field).into(), values);
        columns.push(series.into());
    }

    DataFrame::new(columns).map_err(|e| anyhow!("Failed to build review DataFrame: {}", e))
}

/// Write the harvested reviews as BOM-prefixed UTF-8 CSV, replacing any
/// previous run's output.
pub fn write_reviews_csv(path: &str, reviews: &[Review]) -> Result<()> {
    let mut df = reviews_to_dataframe(reviews)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
    file.write_all(UTF8_BOM)
        .with_context(|| format!("Failed to write to {}", path))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write reviews to {}", path))?;

    info!("Saved {} reviews to {}", reviews.len(), path);
    Ok(())
}
