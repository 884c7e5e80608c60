use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

use foodie_vibes::pipeline::{DEFAULT_LISTINGS, DEFAULT_REVIEWS};
use foodie_vibes::query::{compare, paginate, rank, search, stats, top_by_gem, awards, RankParams};
use foodie_vibes::{export, render};
use foodie_vibes::{load_dataset, AnalysisConfig, CachedAnalyzer, HeuristicToolkit, ReviewAnalyzer, SourcePaths};

/// Foodie Vibes - restaurant discovery from scraped reviews
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Listings CSV (Name, Rating, Reviews, Address)
    #[arg(long, global = true, env = "FOODIE_LISTINGS", default_value = DEFAULT_LISTINGS)]
    listings: PathBuf,

    /// Reviews CSV (Name, Reviews_Text)
    #[arg(long, global = true, env = "FOODIE_REVIEWS", default_value = DEFAULT_REVIEWS)]
    reviews: PathBuf,

    /// Analysis config JSON (overrides FOODIE_CONFIG environment variable)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Analyze every restaurant at load time instead of on demand
    #[arg(long, global = true)]
    eager: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline stats and the top restaurants by Gem Score
    Dashboard {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Ranked picks with rating and review floors
    Top {
        #[arg(long, default_value_t = 3.5)]
        min_rating: f64,
        #[arg(long, default_value_t = 10)]
        min_reviews: u64,
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
        /// Rank purely by Gem Score, ignoring whether reviews exist
        #[arg(long)]
        no_prioritize: bool,
    },
    /// Browse restaurants by name or address
    Search {
        query: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        per_page: usize,
    },
    /// Top Gem Score and per-vibe awards
    Awards,
    /// Head-to-head comparison of two restaurants
    Compare { first: String, second: String },
    /// Full detail for one restaurant
    Show { name: String },
    /// Write the JSON bundle to a directory
    Export {
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting foodie_vibes");
    debug!("Arguments - {:?}", args);

    let cfg = AnalysisConfig::resolve(args.config.as_deref())?;
    let taxonomy = cfg.taxonomy.clone();
    let analyzer = CachedAnalyzer::new(ReviewAnalyzer::new(Arc::new(HeuristicToolkit::new()), cfg));

    let paths = SourcePaths { listings: args.listings, reviews: args.reviews };
    let Some(dataset) = load_dataset(&paths, &analyzer, args.eager) else {
        print!("{}", render::render_unavailable(&paths));
        return Ok(ExitCode::FAILURE);
    };
    let records = dataset.records();

    let command = args.command.unwrap_or(Command::Dashboard { top: 10 });
    let out = match command {
        Command::Dashboard { top } => {
            let top = top_by_gem(records, top);
            top.iter().for_each(|r| {
                r.analyze_with(&analyzer);
            });
            render::render_dashboard(&stats(records), &top, &taxonomy)
        }
        Command::Top { min_rating, min_reviews, limit, no_prioritize } => {
            let params = RankParams { min_rating, min_reviews, limit, prioritize_analyzed: !no_prioritize };
            let ranked = rank(records, &params);
            ranked.iter().for_each(|r| {
                r.analyze_with(&analyzer);
            });
            render::render_ranked("Top Picks", &ranked, &taxonomy)
        }
        Command::Search { query, page, per_page } => {
            let hits = search(records, query.as_deref().unwrap_or(""));
            render::render_directory(&paginate(&hits, page, per_page), query.as_deref())
        }
        Command::Awards => render::render_awards(&awards(records, &analyzer)),
        Command::Compare { first, second } => match (dataset.find(&first), dataset.find(&second)) {
            (Some(a), Some(b)) => render::render_comparison(&compare(a, b, &analyzer), &taxonomy),
            (None, _) => render::render_not_found(&first),
            (_, None) => render::render_not_found(&second),
        },
        Command::Show { name } => match dataset.find(&name) {
            Some(r) => {
                r.analyze_with(&analyzer);
                render::render_detail(r, &taxonomy)
            }
            None => render::render_not_found(&name),
        },
        Command::Export { out } => {
            export::write_bundle(&out, &dataset, &analyzer)?;
            format!("Exported {} restaurants to {}\n", dataset.len(), out.display())
        }
    };
    print!("{}", out);

    let cache = analyzer.cache_stats();
    debug!("Analysis cache - entries={}, hits={}, misses={}", cache.entries, cache.hits, cache.misses);
    Ok(ExitCode::SUCCESS)
}
