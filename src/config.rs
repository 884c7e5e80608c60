use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::vibes::Taxonomy;

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV: &str = "FOODIE_CONFIG";

/// Tunables of the review-analysis core. Every field falls back to its default
/// when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub taxonomy: Taxonomy,
    pub mention_threshold: usize,         // 2 (strict variant: 3)
    pub min_sentence_chars: usize,        // 30
    pub boilerplate_phrases: Vec<String>, // owner replies
    pub max_summary_sentences: usize,     // 2
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            taxonomy: Taxonomy::default(),
            mention_threshold: 2,
            min_sentence_chars: 30,
            boilerplate_phrases: vec!["thank you".to_string(), "your feedback".to_string()],
            max_summary_sentences: 2,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.mention_threshold == 0 {
            bail!("mention_threshold must be at least 1");
        }
        if self.max_summary_sentences == 0 {
            bail!("max_summary_sentences must be at least 1");
        }
        if let Some(c) = self.taxonomy.categories().iter().find(|c| c.label.trim().is_empty()) {
            bail!("taxonomy entry with keywords {:?} has an empty label", c.keywords);
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw).context("Decoding analysis config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading analysis config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("Invalid analysis config {}", path.display()))
    }

    /// CLI path > `FOODIE_CONFIG` > built-in defaults.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        let path = cli_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        match path {
            Some(p) => {
                debug!("Loading analysis config from: {}", p.display());
                Self::load(&p)
            }
            None => {
                debug!("Using built-in analysis config");
                Ok(Self::default())
            }
        }
    }
}
