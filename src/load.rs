use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{ListingRecord, ReviewRecord};

pub const LISTING_COLUMNS: &[&str] = &["Name", "Rating", "Reviews"];
pub const REVIEW_COLUMNS: &[&str] = &["Name"];

/// Read every row of a CSV file into `T`; return Ok(None) when the file does not exist.
///
/// A header row lacking any of `required` columns is an error. Rows that fail to
/// decode are skipped with a warning rather than failing the file.
pub fn read_records<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Option<Vec<T>>> {
    if !path.exists() {
        warn!("Source not found - path={}", path.display());
        return Ok(None);
    }
    let start = std::time::Instant::now();
    debug!("Reading source - path={}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("Opening {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Reading header row of {}", path.display()))?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("{} is missing required columns: {}", path.display(), missing.join(", "));
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (i, row) in reader.deserialize::<T>().enumerate() {
        match row {
            Ok(r) => rows.push(r),
            Err(e) if e.is_io_error() => {
                return Err(e).with_context(|| format!("Reading {}", path.display()));
            }
            Err(e) => {
                skipped += 1;
                warn!("Skipping undecodable row - path={}, row={}, error={}", path.display(), i + 1, e);
            }
        }
    }

    info!(
        "Source read completed - path={}, duration={:.2}s, rows={}, skipped={}",
        path.display(),
        start.elapsed().as_secs_f32(),
        rows.len(),
        skipped
    );
    Ok(Some(rows))
}

pub fn read_listings(path: &Path) -> Result<Option<Vec<ListingRecord>>> {
    read_records(path, LISTING_COLUMNS)
}

pub fn read_reviews(path: &Path) -> Result<Option<Vec<ReviewRecord>>> {
    read_records(path, REVIEW_COLUMNS)
}
