use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Analysis, CachedAnalyzer};

/// One row of the listings source, cells kept as raw text until coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Rating", default)]
    pub rating: Option<String>,
    #[serde(rename = "Reviews", default)]
    pub review_count: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

/// One row of the reviews source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Reviews_Text", default)]
    pub reviews_text: Option<String>,
}

/// A joined, scored restaurant. Vibes and summary live in a write-once slot
/// filled on first inspection (or up front in eager mode).
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub rating: f64,
    pub review_count: u64,
    pub address: Option<String>,
    #[serde(skip)]
    pub reviews_text: String,
    pub gem_score: f64,
    pub hype_score: f64,
    pub has_reviews: bool,
    #[serde(skip)]
    analysis: OnceCell<Analysis>,
}

impl RestaurantRecord {
    pub fn new(
        name: String,
        rating: f64,
        review_count: u64,
        address: Option<String>,
        reviews_text: String,
        gem_score: f64,
        hype_score: f64,
    ) -> Self {
        let has_reviews = !reviews_text.trim().is_empty();
        Self {
            name,
            rating,
            review_count,
            address,
            reviews_text,
            gem_score,
            hype_score,
            has_reviews,
            analysis: OnceCell::new(),
        }
    }

    /// The analysis if it has already been computed.
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.get()
    }

    pub fn is_analyzed(&self) -> bool {
        self.analysis.get().is_some()
    }

    pub fn analyze_with(&self, analyzer: &CachedAnalyzer) -> &Analysis {
        self.analysis.get_or_init(|| analyzer.analyze(&self.reviews_text))
    }

    /// Empty until analyzed.
    pub fn vibes(&self) -> &[String] {
        self.analysis.get().map(|a| a.vibes.as_slice()).unwrap_or(&[])
    }

    pub fn summary(&self) -> Option<&str> {
        self.analysis.get().map(|a| a.summary.as_str())
    }
}
