//! Restaurant discovery over scraped listings and reviews: Gem Score ranking,
//! keyword "vibe" tagging and extractive review highlights.

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod export;
pub mod load;
pub mod models;
pub mod nlp;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod summarize;
pub mod vibes;

pub use analyzer::{Analysis, CachedAnalyzer, ReviewAnalyzer};
pub use config::AnalysisConfig;
pub use dataset::Dataset;
pub use models::RestaurantRecord;
pub use nlp::{HeuristicToolkit, TextToolkit};
pub use pipeline::{load_dataset, SourcePaths};
