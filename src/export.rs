// src/export.rs
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};
use tracing::info;

use crate::analyzer::CachedAnalyzer;
use crate::dataset::Dataset;
use crate::query::{awards, stats};

pub const EXPORT_FILES: &[&str] = &["restaurants.json", "stats.json", "awards.json"];

#[derive(Debug, Serialize)]
struct RestaurantOut<'a> {
    name: &'a str,
    rating: f64,
    review_count: u64,
    address: Option<&'a str>,
    gem_score: f64,
    hype_score: f64,
    has_reviews: bool,
    vibes: &'a [String],
    summary: &'a str,
}

/// Write the JSON bundle for `dataset` into `out_dir`, analyzing every record first.
pub fn write_bundle(out_dir: &Path, dataset: &Dataset, analyzer: &CachedAnalyzer) -> Result<()> {
    let start = std::time::Instant::now();
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    dataset.analyze_all(analyzer);

    let restaurants: Vec<RestaurantOut<'_>> = dataset
        .records()
        .iter()
        .map(|r| {
            let a = r.analyze_with(analyzer);
            RestaurantOut {
                name: &r.name,
                rating: r.rating,
                review_count: r.review_count,
                address: r.address.as_deref(),
                gem_score: r.gem_score,
                hype_score: r.hype_score,
                has_reviews: r.has_reviews,
                vibes: &a.vibes,
                summary: &a.summary,
            }
        })
        .collect();
    write_json(out_dir.join("restaurants.json"), &restaurants)?;

    let st = stats(dataset.records());
    write_json(out_dir.join("stats.json"), &st)?;

    let aw = awards(dataset.records(), analyzer);
    write_json(out_dir.join("awards.json"), &aw)?;

    let idx = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "version": 1,
        "counts": {
            "restaurants": st.count,
            "with_reviews": st.with_reviews,
            "awards_given": aw.iter().filter(|a| a.winner.is_some()).count(),
        },
        "files": EXPORT_FILES,
    });
    write_json(out_dir.join("index.json"), &idx)?;

    info!(
        "Export completed - dir={}, duration={:.2}s, restaurants={}",
        out_dir.display(),
        start.elapsed().as_secs_f32(),
        restaurants.len()
    );
    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(value)?).with_context(|| format!("write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ReviewAnalyzer;
    use crate::config::AnalysisConfig;
    use crate::models::{ListingRecord, ReviewRecord};
    use crate::nlp::HeuristicToolkit;
    use std::sync::Arc;

    #[test]
    fn bundle_contains_all_files_and_forced_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::build(
            vec![ListingRecord {
                name: "A".into(),
                rating: Some("4.5".into()),
                review_count: Some("120".into()),
                address: None,
            }],
            vec![ReviewRecord { name: "A".into(), reviews_text: Some("Cheap and cheap again, great price.".into()) }],
        );
        let az = CachedAnalyzer::new(ReviewAnalyzer::new(Arc::new(HeuristicToolkit::new()), AnalysisConfig::default()));
        write_bundle(dir.path(), &ds, &az).unwrap();

        for f in EXPORT_FILES.iter().chain(["index.json"].iter()) {
            assert!(dir.path().join(f).exists(), "{f} missing");
        }
        let rows: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("restaurants.json")).unwrap()).unwrap();
        assert_eq!(rows[0]["vibes"][0], "Budget-Friendly");
        assert_eq!(rows[0]["address"], serde_json::Value::Null);
        let idx: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("index.json")).unwrap()).unwrap();
        assert_eq!(idx["counts"]["restaurants"], 1);
        assert!(idx["generated_at"].as_str().is_some());
    }
}
