use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

use crate::analyzer::CachedAnalyzer;
use crate::models::RestaurantRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    pub min_rating: f64,
    pub min_reviews: u64,
    pub limit: usize,
    /// Put restaurants with review text ahead of those without, regardless of score.
    pub prioritize_analyzed: bool,
}

impl Default for RankParams {
    fn default() -> Self {
        Self { min_rating: 3.5, min_reviews: 10, limit: 5, prioritize_analyzed: true }
    }
}

fn by_gem_desc(a: &RestaurantRecord, b: &RestaurantRecord) -> Ordering {
    b.gem_score.total_cmp(&a.gem_score)
}

/// Filter by the rating and review floors, order by Gem Score, truncate to `limit`.
pub fn rank<'a>(records: &'a [RestaurantRecord], params: &RankParams) -> Vec<&'a RestaurantRecord> {
    records
        .iter()
        .filter(|r| r.rating >= params.min_rating && r.review_count >= params.min_reviews)
        .sorted_by(|a, b| {
            if params.prioritize_analyzed {
                b.has_reviews.cmp(&a.has_reviews).then_with(|| by_gem_desc(a, b))
            } else {
                by_gem_desc(a, b)
            }
        })
        .take(params.limit)
        .collect()
}

pub fn top_by_gem(records: &[RestaurantRecord], n: usize) -> Vec<&RestaurantRecord> {
    let params = RankParams { min_rating: f64::NEG_INFINITY, min_reviews: 0, limit: n, prioritize_analyzed: false };
    rank(records, &params)
}

fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Case-insensitive substring match on name or address, sorted by name.
/// A blank query matches everything.
pub fn search<'a>(records: &'a [RestaurantRecord], query: &str) -> Vec<&'a RestaurantRecord> {
    let needle = fold(query.trim());
    records
        .iter()
        .filter(|r| {
            needle.is_empty()
                || fold(&r.name).contains(&needle)
                || r.address.as_deref().map(|a| fold(a).contains(&needle)).unwrap_or(false)
        })
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
}

pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let slice = if page == 0 || start >= items.len() {
        &items[..0]
    } else {
        &items[start..(start + per_page).min(items.len())]
    };
    Page { items: slice, page, total_pages }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub count: usize,
    pub with_reviews: usize,
    pub mean_rating: Option<f64>,
}

pub fn stats(records: &[RestaurantRecord]) -> DatasetStats {
    let count = records.len();
    let mean_rating = (count > 0).then(|| records.iter().map(|r| r.rating).sum::<f64>() / count as f64);
    DatasetStats {
        count,
        with_reviews: records.iter().filter(|r| r.has_reviews).count(),
        mean_rating,
    }
}

/// Award title paired with the vibe a winner must carry.
pub const VIBE_AWARDS: &[(&str, &str)] = &[
    ("Best Service", "Excellent Service"),
    ("Best Ambience", "Great Ambience"),
    ("Best Value", "Budget-Friendly"),
];

pub const TOP_GEM_AWARD: &str = "Top Gem Score";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Award {
    pub title: String,
    pub vibe: Option<String>,
    pub winner: Option<AwardWinner>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardWinner {
    pub name: String,
    pub rating: f64,
    pub gem_score: f64,
}

impl From<&RestaurantRecord> for AwardWinner {
    fn from(r: &RestaurantRecord) -> Self {
        Self { name: r.name.clone(), rating: r.rating, gem_score: r.gem_score }
    }
}

// First record wins ties.
fn best_by_gem<'a, I>(iter: I) -> Option<&'a RestaurantRecord>
where
    I: IntoIterator<Item = &'a RestaurantRecord>,
{
    iter.into_iter()
        .fold(None::<&'a RestaurantRecord>, |best, r| match best {
            Some(b) if b.gem_score >= r.gem_score => Some(b),
            _ => Some(r),
        })
}

/// Top Gem Score overall, then one award per [`VIBE_AWARDS`] entry. Each vibe award
/// goes to the highest-Gem-Score record carrying that vibe, not the first one listed.
/// Analyzes any record not yet analyzed.
pub fn awards(records: &[RestaurantRecord], analyzer: &CachedAnalyzer) -> Vec<Award> {
    let mut out = vec![Award {
        title: TOP_GEM_AWARD.to_string(),
        vibe: None,
        winner: best_by_gem(records).map(AwardWinner::from),
    }];
    for (title, vibe) in VIBE_AWARDS {
        let holders = records
            .iter()
            .filter(|r| r.analyze_with(analyzer).vibes.iter().any(|v| v == vibe));
        out.push(Award {
            title: title.to_string(),
            vibe: Some(vibe.to_string()),
            winner: best_by_gem(holders).map(AwardWinner::from),
        });
    }
    out
}

#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub left: &'a RestaurantRecord,
    pub right: &'a RestaurantRecord,
    /// left minus right
    pub rating_delta: f64,
    pub gem_delta: f64,
    pub shared_vibes: Vec<String>,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}

pub fn compare<'a>(
    left: &'a RestaurantRecord,
    right: &'a RestaurantRecord,
    analyzer: &CachedAnalyzer,
) -> Comparison<'a> {
    let lv = &left.analyze_with(analyzer).vibes;
    let rv = &right.analyze_with(analyzer).vibes;
    let (shared, only_left): (Vec<String>, Vec<String>) =
        lv.iter().cloned().partition(|v| rv.contains(v));
    let only_right = rv.iter().filter(|v| !lv.contains(v)).cloned().collect();
    Comparison {
        left,
        right,
        rating_delta: left.rating - right.rating,
        gem_delta: left.gem_score - right.gem_score,
        shared_vibes: shared,
        only_left,
        only_right,
    }
}
