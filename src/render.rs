// src/render.rs
use itertools::Itertools;

use crate::models::RestaurantRecord;
use crate::pipeline::SourcePaths;
use crate::query::{Award, Comparison, DatasetStats, Page};
use crate::vibes::Taxonomy;

fn vibe_chips(vibes: &[String], taxonomy: &Taxonomy) -> String {
    vibes
        .iter()
        .map(|v| match taxonomy.icon_for(v) {
            Some(icon) => format!("{} {}", icon, v),
            None => v.clone(),
        })
        .join(" · ")
}

fn address_or_dash(r: &RestaurantRecord) -> &str {
    r.address.as_deref().unwrap_or("—")
}

pub fn render_card(r: &RestaurantRecord, taxonomy: &Taxonomy) -> String {
    let mut md = String::new();
    md.push_str(&format!("### {}\n", r.name));
    md.push_str(&format!(
        "⭐ {:.1} · {} reviews · Gem Score {:.2}\n",
        r.rating, r.review_count, r.gem_score
    ));
    if !r.vibes().is_empty() {
        md.push_str(&format!("\n{}\n", vibe_chips(r.vibes(), taxonomy)));
    }
    if let Some(summary) = r.summary() {
        md.push_str(&format!("\n> {}\n", summary.trim()));
    }
    md.push('\n');
    md
}

pub fn render_ranked(title: &str, records: &[&RestaurantRecord], taxonomy: &Taxonomy) -> String {
    let mut md = format!("## {}\n\n", title);
    if records.is_empty() {
        md.push_str("No restaurants match these filters.\n");
        return md;
    }
    for (i, r) in records.iter().enumerate() {
        md.push_str(&format!("{}. ", i + 1));
        md.push_str(&render_card(r, taxonomy));
    }
    md
}

pub fn render_dashboard(stats: &DatasetStats, top: &[&RestaurantRecord], taxonomy: &Taxonomy) -> String {
    let mut md = String::new();
    md.push_str("# Foodie Vibes\n\n");
    md.push_str(&format!("- Restaurants: {}\n", stats.count));
    md.push_str(&format!("- With reviews: {}\n", stats.with_reviews));
    match stats.mean_rating {
        Some(m) => md.push_str(&format!("- Mean rating: {:.2}\n\n", m)),
        None => md.push_str("- Mean rating: n/a\n\n"),
    }
    md.push_str(&render_ranked("Top by Gem Score", top, taxonomy));
    md
}

pub fn render_directory(page: &Page<'_, &RestaurantRecord>, query: Option<&str>) -> String {
    let mut md = String::new();
    match query.filter(|q| !q.trim().is_empty()) {
        Some(q) => md.push_str(&format!("## Directory: \"{}\"\n\n", q.trim())),
        None => md.push_str("## Directory\n\n"),
    }
    if page.items.is_empty() {
        md.push_str("No restaurants on this page.\n");
    } else {
        md.push_str("| Name | Rating | Reviews | Gem Score | Address |\n");
        md.push_str("|---|---|---|---|---|\n");
        for r in page.items {
            md.push_str(&format!(
                "| {} | {:.1} | {} | {:.2} | {} |\n",
                r.name,
                r.rating,
                r.review_count,
                r.gem_score,
                address_or_dash(r)
            ));
        }
    }
    md.push_str(&format!("\nPage {} of {}\n", page.page, page.total_pages.max(1)));
    md
}

pub fn render_awards(awards: &[Award]) -> String {
    let mut md = String::from("## Awards\n\n");
    for a in awards {
        match &a.winner {
            Some(w) => md.push_str(&format!(
                "- **{}**: {} (⭐ {:.1}, Gem Score {:.2})\n",
                a.title, w.name, w.rating, w.gem_score
            )),
            None => md.push_str(&format!("- **{}**: not enough data\n", a.title)),
        }
    }
    md
}

pub fn render_comparison(c: &Comparison<'_>, taxonomy: &Taxonomy) -> String {
    let mut md = format!("## {} vs {}\n\n", c.left.name, c.right.name);
    md.push_str(&format!("| | {} | {} |\n|---|---|---|\n", c.left.name, c.right.name));
    md.push_str(&format!("| Rating | {:.1} | {:.1} |\n", c.left.rating, c.right.rating));
    md.push_str(&format!("| Reviews | {} | {} |\n", c.left.review_count, c.right.review_count));
    md.push_str(&format!("| Gem Score | {:.2} | {:.2} |\n\n", c.left.gem_score, c.right.gem_score));
    md.push_str(&format!("- Rating delta: {:+.2}\n", c.rating_delta));
    md.push_str(&format!("- Gem Score delta: {:+.2}\n", c.gem_delta));

    let line = |label: &str, vibes: &[String]| {
        if vibes.is_empty() {
            format!("- {}: none\n", label)
        } else {
            format!("- {}: {}\n", label, vibe_chips(vibes, taxonomy))
        }
    };
    md.push_str(&line("Shared vibes", &c.shared_vibes));
    md.push_str(&line(&format!("Only {}", c.left.name), &c.only_left));
    md.push_str(&line(&format!("Only {}", c.right.name), &c.only_right));
    md
}

pub fn render_detail(r: &RestaurantRecord, taxonomy: &Taxonomy) -> String {
    let mut md = format!("# {}\n\n", r.name);
    md.push_str(&format!("- Rating: {:.1}\n", r.rating));
    md.push_str(&format!("- Reviews: {}\n", r.review_count));
    md.push_str(&format!("- Gem Score: {:.2}\n", r.gem_score));
    md.push_str(&format!("- Hype Score: {:.2}\n", r.hype_score));
    md.push_str(&format!("- Address: {}\n\n", address_or_dash(r)));

    md.push_str("## Vibes\n");
    if r.vibes().is_empty() {
        md.push_str("No vibes detected.\n\n");
    } else {
        for v in r.vibes() {
            match taxonomy.icon_for(v) {
                Some(icon) => md.push_str(&format!("- {} {}\n", icon, v)),
                None => md.push_str(&format!("- {}\n", v)),
            }
        }
        md.push('\n');
    }

    md.push_str("## Highlights\n");
    md.push_str(&format!("{}\n", r.summary().unwrap_or("Not analyzed yet.").trim()));
    md
}

pub fn render_not_found(name: &str) -> String {
    format!("No restaurant named \"{}\" was found.\n", name)
}

pub fn render_unavailable(paths: &SourcePaths) -> String {
    format!(
        "# Data not available\n\n\
         Could not load restaurant data. Expected listings at `{}` and reviews at `{}`.\n\
         Point `--listings` / `--reviews` at the scraped CSV files and try again.\n",
        paths.listings.display(),
        paths.reviews.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analysis, CachedAnalyzer, ReviewAnalyzer};
    use crate::config::AnalysisConfig;
    use crate::nlp::HeuristicToolkit;
    use crate::query::{paginate, stats, AwardWinner};
    use std::sync::Arc;

    fn record(text: &str) -> RestaurantRecord {
        RestaurantRecord::new("Bawarchi".into(), 4.2, 1204, None, text.into(), 29.8, 1204.0)
    }

    #[test]
    fn detail_shows_icons_and_summary_after_analysis() {
        let az = CachedAnalyzer::new(ReviewAnalyzer::new(Arc::new(HeuristicToolkit::new()), AnalysisConfig::default()));
        let r = record("Biryani biryani everywhere and the biryani was spicy and delicious to the end.");
        let before = render_detail(&r, &Taxonomy::default());
        assert!(before.contains("Not analyzed yet."));
        let a: &Analysis = r.analyze_with(&az);
        assert!(a.vibes.contains(&"Biryani Hub".to_string()));
        let after = render_detail(&r, &Taxonomy::default());
        assert!(after.contains("🍚 Biryani Hub"));
        assert!(after.contains("Address: —"));
        assert!(after.contains("Hype Score: 1204.00"));
    }

    #[test]
    fn dashboard_handles_empty_dataset() {
        let md = render_dashboard(&stats(&[]), &[], &Taxonomy::default());
        assert!(md.contains("Mean rating: n/a"));
        assert!(md.contains("No restaurants match"));
    }

    #[test]
    fn directory_page_footer() {
        let r = record("");
        let refs = vec![&r];
        let md = render_directory(&paginate(&refs, 1, 10), Some("bawa"));
        assert!(md.contains("| Bawarchi | 4.2 | 1204 |"));
        assert!(md.contains("Page 1 of 1"));
    }

    #[test]
    fn awards_without_winner_say_so() {
        let awards = vec![
            Award {
                title: "Top Gem Score".into(),
                vibe: None,
                winner: Some(AwardWinner { name: "X".into(), rating: 4.0, gem_score: 12.0 }),
            },
            Award { title: "Best Value".into(), vibe: Some("Budget-Friendly".into()), winner: None },
        ];
        let md = render_awards(&awards);
        assert!(md.contains("**Top Gem Score**: X"));
        assert!(md.contains("**Best Value**: not enough data"));
    }
}
