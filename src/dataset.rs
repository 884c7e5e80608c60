use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::analyzer::CachedAnalyzer;
use crate::models::{ListingRecord, RestaurantRecord, ReviewRecord};

/// Rating scaled by log-damped review volume.
pub fn gem_score(rating: f64, review_count: u64) -> f64 {
    rating * (review_count as f64).ln_1p()
}

/// Review count divided by the number of "year ago" markers (at least 1).
pub fn hype_score(review_count: u64, reviews_text: &str) -> f64 {
    let stale = reviews_text.matches("year ago").count().max(1);
    review_count as f64 / stale as f64
}

pub fn coerce_rating(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|r| r.is_finite())
}

pub fn coerce_review_count(raw: Option<&str>) -> Option<u64> {
    let s = raw.map(str::trim).filter(|s| !s.is_empty())?;
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u64::MAX as f64)
        .map(|f| f.trunc() as u64)
}

/// The joined, scored restaurant set. Immutable after [`Dataset::build`] apart from
/// each record's write-once analysis slot.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<RestaurantRecord>,
}

impl Dataset {
    /// Left-joins listings to reviews by exact name and scores every surviving row.
    ///
    /// Listing rows with a blank name or an unparseable rating / review count are
    /// dropped. The first listing row of a name wins; review rows sharing a name are
    /// concatenated in input order.
    pub fn build(listings: Vec<ListingRecord>, reviews: Vec<ReviewRecord>) -> Self {
        let start = std::time::Instant::now();
        let total = listings.len();

        let mut texts: HashMap<String, String> = HashMap::new();
        for r in reviews {
            let text = r.reviews_text.unwrap_or_default();
            texts
                .entry(r.name)
                .and_modify(|acc| {
                    acc.push('\n');
                    acc.push_str(&text);
                })
                .or_insert(text);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::with_capacity(listings.len());
        let (mut malformed, mut duplicates) = (0usize, 0usize);

        for l in listings {
            if l.name.trim().is_empty() {
                malformed += 1;
                continue;
            }
            let (Some(rating), Some(count)) = (
                coerce_rating(l.rating.as_deref()),
                coerce_review_count(l.review_count.as_deref()),
            ) else {
                debug!("Dropping listing with non-numeric fields - name={}", l.name);
                malformed += 1;
                continue;
            };
            if !seen.insert(l.name.clone()) {
                duplicates += 1;
                continue;
            }
            let text = texts.get(&l.name).cloned().unwrap_or_default();
            let address = l.address.filter(|a| !a.trim().is_empty());
            let hype = hype_score(count, &text);
            records.push(RestaurantRecord::new(
                l.name,
                rating,
                count,
                address,
                text,
                gem_score(rating, count),
                hype,
            ));
        }

        info!(
            "Dataset build completed - duration={:.2}s, rows_in={}, rows={}, malformed={}, duplicates={}",
            start.elapsed().as_secs_f32(),
            total,
            records.len(),
            malformed,
            duplicates
        );
        Self { records }
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact name first, then case-insensitive.
    pub fn find(&self, name: &str) -> Option<&RestaurantRecord> {
        let name = name.trim();
        self.records.iter().find(|r| r.name == name).or_else(|| {
            let lower = name.to_lowercase();
            self.records.iter().find(|r| r.name.to_lowercase() == lower)
        })
    }

    /// Fills every record's analysis slot in parallel.
    pub fn analyze_all(&self, analyzer: &CachedAnalyzer) {
        let start = std::time::Instant::now();
        self.records.par_iter().for_each(|r| {
            r.analyze_with(analyzer);
        });
        let stats = analyzer.cache_stats();
        info!(
            "Bulk analysis completed - duration={:.2}s, records={}, cache_entries={}, cache_hits={}",
            start.elapsed().as_secs_f32(),
            self.records.len(),
            stats.entries,
            stats.hits
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str, rating: &str, count: &str) -> ListingRecord {
        ListingRecord {
            name: name.to_string(),
            rating: Some(rating.to_string()),
            review_count: Some(count.to_string()),
            address: Some(format!("{name} Road")),
        }
    }

    fn review(name: &str, text: &str) -> ReviewRecord {
        ReviewRecord { name: name.to_string(), reviews_text: Some(text.to_string()) }
    }

    #[test]
    fn gem_score_is_monotonic() {
        assert!(gem_score(4.0, 100) < gem_score(4.5, 100));
        assert!(gem_score(4.0, 50) < gem_score(4.0, 200));
        assert_eq!(gem_score(4.5, 0), 0.0);
        assert!((gem_score(4.5, 120) - 4.5 * 121f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn hype_score_divides_by_stale_markers() {
        assert_eq!(hype_score(120, ""), 120.0);
        assert_eq!(hype_score(120, "a year ago ... a year ago ... 1 year ago"), 40.0);
        assert_eq!(hype_score(120, "A Year Ago"), 120.0);
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(coerce_rating(Some(" 4.3 ")), Some(4.3));
        assert_eq!(coerce_rating(Some("n/a")), None);
        assert_eq!(coerce_rating(Some("NaN")), None);
        assert_eq!(coerce_rating(None), None);
        assert_eq!(coerce_review_count(Some("120")), Some(120));
        assert_eq!(coerce_review_count(Some("120.0")), Some(120));
        assert_eq!(coerce_review_count(Some("-3")), None);
        assert_eq!(coerce_review_count(Some("")), None);
        assert_eq!(coerce_review_count(Some("1,204")), None);
    }

    #[test]
    fn drops_exactly_the_malformed_rows() {
        let listings = vec![
            listing("A", "4.1", "10"),
            listing("B", "3.9", "25"),
            listing("C", "four", "30"),
            listing("D", "4.8", "300"),
            listing("E", "4.0", "7"),
        ];
        let ds = Dataset::build(listings, Vec::new());
        assert_eq!(ds.len(), 4);
        assert!(ds.find("C").is_none());
    }

    #[test]
    fn left_join_keeps_unreviewed_rows() {
        let ds = Dataset::build(
            vec![listing("A", "4.5", "120"), listing("B", "4.0", "20")],
            vec![review("A", "Great food."), review("Z", "orphan")],
        );
        let a = ds.find("A").unwrap();
        let b = ds.find("B").unwrap();
        assert!(a.has_reviews);
        assert!(!b.has_reviews);
        assert_eq!(b.reviews_text, "");
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn duplicate_names_resolve_deterministically() {
        let ds = Dataset::build(
            vec![listing("A", "4.5", "120"), listing("A", "1.0", "1")],
            vec![review("A", "first"), review("A", "second")],
        );
        assert_eq!(ds.len(), 1);
        let a = ds.find("A").unwrap();
        assert_eq!(a.rating, 4.5);
        assert_eq!(a.reviews_text, "first\nsecond");
    }

    #[test]
    fn whitespace_only_reviews_do_not_count() {
        let ds = Dataset::build(vec![listing("A", "4.5", "12")], vec![review("A", "  \n ")]);
        assert!(!ds.find("A").unwrap().has_reviews);
    }

    #[test]
    fn find_falls_back_to_case_insensitive() {
        let ds = Dataset::build(vec![listing("Cafe Noir", "4.5", "12")], Vec::new());
        assert!(ds.find("cafe noir").is_some());
        assert!(ds.find("Cafe").is_none());
    }
}
