use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::analyzer::CachedAnalyzer;
use crate::dataset::Dataset;
use crate::load::{read_listings, read_reviews};

pub const DEFAULT_LISTINGS: &str = "download.csv";
pub const DEFAULT_REVIEWS: &str = "downloadrev.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub listings: PathBuf,
    pub reviews: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self { listings: PathBuf::from(DEFAULT_LISTINGS), reviews: PathBuf::from(DEFAULT_REVIEWS) }
    }
}

fn read_or_log<T>(label: &str, path: &Path, result: anyhow::Result<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(rows)) => Some(rows),
        Ok(None) => {
            warn!("Missing {} source - path={}", label, path.display());
            None
        }
        Err(e) => {
            error!("Unreadable {} source - path={}, error={:#}", label, path.display(), e);
            None
        }
    }
}

/// Load both sources and build the dataset. `None` means the dataset is unavailable:
/// either file is missing or unreadable. With `eager` set every record is analyzed
/// before returning.
pub fn load_dataset(paths: &SourcePaths, analyzer: &CachedAnalyzer, eager: bool) -> Option<Dataset> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - listings={}, reviews={}, eager={}",
        paths.listings.display(),
        paths.reviews.display(),
        eager
    );

    let listings = read_or_log("listings", &paths.listings, read_listings(&paths.listings));
    let reviews = read_or_log("reviews", &paths.reviews, read_reviews(&paths.reviews));
    let (Some(listings), Some(reviews)) = (listings, reviews) else {
        error!("Dataset unavailable - at least one source could not be read");
        return None;
    };

    let dataset = Dataset::build(listings, reviews);
    if eager {
        dataset.analyze_all(analyzer);
    }

    info!(
        "Pipeline completed - duration={:.2}s, restaurants={}",
        pipeline_start.elapsed().as_secs_f32(),
        dataset.len()
    );
    Some(dataset)
}
