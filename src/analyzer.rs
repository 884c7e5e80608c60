use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::AnalysisConfig;
use crate::nlp::TextToolkit;
use crate::normalize::normalize;
use crate::summarize::{summarize, SummaryRules};
use crate::vibes::classify;

/// Summary used for restaurants without any review text.
pub const NO_REVIEWS: &str = "No reviews available for analysis.";

/// Vibe labels (taxonomy order) and highlight summary for one review blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub vibes: Vec<String>,
    pub summary: String,
}

impl Analysis {
    pub fn no_reviews() -> Self {
        Self { vibes: Vec::new(), summary: NO_REVIEWS.to_string() }
    }
}

/// Normalizer, classifier and summarizer wired to one config and toolkit.
#[derive(Clone)]
pub struct ReviewAnalyzer {
    toolkit: Arc<dyn TextToolkit>,
    config: AnalysisConfig,
    rules: SummaryRules,
}

impl ReviewAnalyzer {
    pub fn new(toolkit: Arc<dyn TextToolkit>, config: AnalysisConfig) -> Self {
        let rules = SummaryRules::from(&config);
        Self { toolkit, config, rules }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, raw: &str) -> Analysis {
        if raw.trim().is_empty() {
            return Analysis::no_reviews();
        }
        let text = normalize(raw);
        Analysis {
            vibes: classify(&text, &self.config.taxonomy, self.config.mention_threshold),
            summary: summarize(&text, self.toolkit.as_ref(), &self.rules),
        }
    }
}

/// Content-addressed memo of analyses keyed by the xxh3 digest of the raw text.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: RwLock<HashMap<u64, Analysis>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(text: &str) -> u64 {
        xxh3_64(text.as_bytes())
    }

    pub fn get(&self, text: &str) -> Option<Analysis> {
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::key(text))
            .cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn insert(&self, text: &str, analysis: Analysis) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Self::key(text), analysis);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().unwrap_or_else(PoisonError::into_inner).len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// [`ReviewAnalyzer`] fronted by an [`AnalysisCache`]. Safe to share across rayon workers;
/// two threads racing on the same text both compute and store the same value.
pub struct CachedAnalyzer {
    analyzer: ReviewAnalyzer,
    cache: AnalysisCache,
}

impl CachedAnalyzer {
    pub fn new(analyzer: ReviewAnalyzer) -> Self {
        Self { analyzer, cache: AnalysisCache::new() }
    }

    pub fn analyzer(&self) -> &ReviewAnalyzer {
        &self.analyzer
    }

    pub fn analyze(&self, raw: &str) -> Analysis {
        if let Some(hit) = self.cache.get(raw) {
            return hit;
        }
        let analysis = self.analyzer.analyze(raw);
        debug!("Analysis computed - chars={}, vibes={}", raw.len(), analysis.vibes.len());
        self.cache.insert(raw, analysis.clone());
        analysis
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::HeuristicToolkit;
    use crate::summarize::NO_SUMMARY;

    fn analyzer() -> ReviewAnalyzer {
        ReviewAnalyzer::new(Arc::new(HeuristicToolkit::new()), AnalysisConfig::default())
    }

    #[test]
    fn blank_text_short_circuits() {
        assert_eq!(analyzer().analyze(""), Analysis::no_reviews());
        assert_eq!(analyzer().analyze(" \n\t"), Analysis::no_reviews());
    }

    #[test]
    fn no_summary_and_no_reviews_differ() {
        let a = analyzer().analyze("Nice. Ok.");
        assert_eq!(a.summary, NO_SUMMARY);
        assert_ne!(NO_SUMMARY, NO_REVIEWS);
    }

    #[test]
    fn tags_and_summarizes_normalized_text() {
        let raw = "Priya\nLocal Guide·12 reviews·40 photos\n2 weeks ago\nNew\n\
                   The staff were friendly and the service was excellent. \
                   The service was also very fast and polite. Thank you for visiting.";
        let a = analyzer().analyze(raw);
        assert!(a.vibes.contains(&"Excellent Service".to_string()));
        assert!(!a.summary.contains("Thank you"));
        assert!(!a.summary.contains("Local Guide"));
    }

    #[test]
    fn same_text_same_result() {
        let az = analyzer();
        let raw = "Cheap and tasty biryani. Great value for the price, friendly owner too.";
        assert_eq!(az.analyze(raw), az.analyze(raw));
    }

    #[test]
    fn cache_counts_hits_and_misses() {
        let cached = CachedAnalyzer::new(analyzer());
        let raw = "Cozy cafe with great coffee and a calm ambience for reading.";
        let first = cached.analyze(raw);
        let second = cached.analyze(raw);
        assert_eq!(first, second);
        cached.analyze("Another review about biryani and more biryani.");
        assert_eq!(cached.cache_stats(), CacheStats { entries: 2, hits: 1, misses: 2 });
    }
}
