use std::fs;
use std::path::Path;
use std::sync::Arc;

use foodie_vibes::query::{rank, search, RankParams};
use foodie_vibes::summarize::NO_SUMMARY;
use foodie_vibes::{load_dataset, AnalysisConfig, CachedAnalyzer, HeuristicToolkit, ReviewAnalyzer, SourcePaths};

fn analyzer() -> CachedAnalyzer {
    CachedAnalyzer::new(ReviewAnalyzer::new(Arc::new(HeuristicToolkit::new()), AnalysisConfig::default()))
}

fn write_sources(dir: &Path, listings: &str, reviews: &str) -> SourcePaths {
    let paths = SourcePaths { listings: dir.join("download.csv"), reviews: dir.join("downloadrev.csv") };
    fs::write(&paths.listings, listings).unwrap();
    fs::write(&paths.reviews, reviews).unwrap();
    paths
}

#[test]
fn single_restaurant_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_sources(
        dir.path(),
        "Name,Rating,Reviews,Address\nA,4.5,120,X\n",
        "Name,Reviews_Text\nA,The staff were friendly and the service was excellent. \
         The service was also very fast and polite. Thank you for visiting.\n",
    );
    let az = analyzer();
    let ds = load_dataset(&paths, &az, false).expect("dataset");
    let a = ds.find("A").unwrap();

    assert!(a.has_reviews);
    assert!(!a.is_analyzed());
    assert!((a.gem_score - 4.5 * 121f64.ln()).abs() < 1e-9);
    assert_eq!(a.address.as_deref(), Some("X"));

    let analysis = a.analyze_with(&az);
    assert!(analysis.vibes.contains(&"Excellent Service".to_string()));
    assert!(!analysis.summary.contains("Thank you"));
    assert_ne!(analysis.summary, NO_SUMMARY);
    assert!(analysis.summary.contains("service"));
}

#[test]
fn missing_source_means_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("download.csv"), "Name,Rating,Reviews,Address\nA,4.5,120,X\n").unwrap();
    let paths = SourcePaths {
        listings: dir.path().join("download.csv"),
        reviews: dir.path().join("missing.csv"),
    };
    assert!(load_dataset(&paths, &analyzer(), false).is_none());
}

#[test]
fn listings_without_rating_column_mean_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_sources(
        dir.path(),
        "Name,Reviews,Address\nA,120,X\n",
        "Name,Reviews_Text\nA,Great food.\n",
    );
    assert!(load_dataset(&paths, &analyzer(), false).is_none());
}

#[test]
fn eager_load_matches_lazy_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_sources(
        dir.path(),
        "Name,Rating,Reviews,Address\n\
         Shah Ghouse,4.3,5400,Tolichowki\n\
         Chutneys,4.4,3100,Jubilee Hills\n\
         Broken,,50,Nowhere\n\
         Quiet Corner,3.9,15,\n",
        "Name,Reviews_Text\n\
         Shah Ghouse,\"Best biryani in town, the biryani is spicy.\nMutton biryani was tender and full of flavour.\"\n\
         Chutneys,\"Pure veg thali and paneer dishes. Great veg options for family dinners with friends.\"\n",
    );
    let eager_az = analyzer();
    let eager = load_dataset(&paths, &eager_az, true).unwrap();
    let lazy_az = analyzer();
    let lazy = load_dataset(&paths, &lazy_az, false).unwrap();

    assert_eq!(eager.len(), 3);
    assert!(eager.records().iter().all(|r| r.is_analyzed()));
    for (e, l) in eager.records().iter().zip(lazy.records()) {
        assert_eq!(e.analysis(), Some(l.analyze_with(&lazy_az)));
    }
    assert!(eager.find("Shah Ghouse").unwrap().vibes().contains(&"Biryani Hub".to_string()));
    assert!(!eager.find("Quiet Corner").unwrap().has_reviews);
}

#[test]
fn ranking_and_search_over_loaded_data() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_sources(
        dir.path(),
        "Name,Rating,Reviews,Address\n\
         Alpha,4.0,20,Banjara Hills\n\
         Beta,4.8,900,Hitech City\n\
         Gamma,4.2,300,Banjara Hills Road 12\n",
        "Name,Reviews_Text\nAlpha,Nice food.\n",
    );
    let ds = load_dataset(&paths, &analyzer(), false).unwrap();

    let params = RankParams { min_rating: 0.0, min_reviews: 0, limit: 3, prioritize_analyzed: true };
    let names: Vec<&str> = rank(ds.records(), &params).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

    let hits: Vec<&str> = search(ds.records(), "banjara").iter().map(|r| r.name.as_str()).collect();
    assert_eq!(hits, vec!["Alpha", "Gamma"]);
}
