use itertools::Itertools;
use std::collections::HashSet;

use crate::config::AnalysisConfig;
use crate::nlp::TextToolkit;

/// Returned when no sentence survives the filters.
pub const NO_SUMMARY: &str = "Could not generate a highlight summary from available reviews.";

/// Sentence filters and output size of the extractive summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRules {
    pub min_sentence_chars: usize,
    pub boilerplate_phrases: Vec<String>,
    pub max_sentences: usize,
}

impl Default for SummaryRules {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for SummaryRules {
    fn from(cfg: &AnalysisConfig) -> Self {
        Self {
            min_sentence_chars: cfg.min_sentence_chars,
            boilerplate_phrases: cfg
                .boilerplate_phrases
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            max_sentences: cfg.max_summary_sentences,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence<'a> {
    pub text: &'a str,
    pub position: usize,
    pub score: f64,
}

impl SummaryRules {
    fn is_boilerplate(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        self.boilerplate_phrases.iter().any(|p| lower.contains(p.as_str()))
    }
}

/// Filters and scores every candidate sentence, in document order.
/// Score is the share of tokens that are non-stopword nouns, adjectives or verbs.
pub fn score_sentences<'a>(
    normalized: &'a str,
    toolkit: &dyn TextToolkit,
    rules: &SummaryRules,
) -> Vec<ScoredSentence<'a>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for (position, sentence) in toolkit.sentences(normalized).into_iter().enumerate() {
        if sentence.chars().count() < rules.min_sentence_chars || rules.is_boilerplate(sentence) {
            continue;
        }
        if !seen.insert(sentence) {
            continue;
        }
        let tokens = toolkit.tokens(sentence);
        if tokens.len() < 2 {
            continue;
        }
        let content = tokens
            .iter()
            .enumerate()
            .filter(|(i, tok)| {
                let prev = i.checked_sub(1).map(|j| tokens[j]);
                toolkit.tag(tok, prev).is_content() && !toolkit.is_stopword(tok)
            })
            .count();
        out.push(ScoredSentence {
            text: sentence,
            position,
            score: content as f64 / tokens.len() as f64,
        });
    }
    out
}

/// Picks the best-scoring sentences (ties keep document order) and joins them with a space.
pub fn summarize(normalized: &str, toolkit: &dyn TextToolkit, rules: &SummaryRules) -> String {
    let scored = score_sentences(normalized, toolkit, rules);
    if scored.is_empty() {
        return NO_SUMMARY.to_string();
    }
    scored
        .into_iter()
        .sorted_by(|a, b| b.score.total_cmp(&a.score))
        .take(rules.max_sentences)
        .map(|s| s.text)
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::HeuristicToolkit;

    fn rules(max: usize) -> SummaryRules {
        SummaryRules { max_sentences: max, ..SummaryRules::default() }
    }

    #[test]
    fn short_sentences_are_dropped() {
        let tk = HeuristicToolkit::new();
        let long = "The biryani here is fragrant and perfectly spiced.";
        assert!(long.chars().count() >= 30);
        let text = format!("Good food. {long}");
        assert_eq!(summarize(&text, &tk, &rules(2)), long);
    }

    #[test]
    fn owner_replies_are_dropped() {
        let tk = HeuristicToolkit::new();
        let text = "Thank you so much for visiting our restaurant today. We value your feedback on the service a lot.";
        assert_eq!(summarize(text, &tk, &rules(2)), NO_SUMMARY);
    }

    #[test]
    fn never_exceeds_max_sentences() {
        let tk = HeuristicToolkit::new();
        let text = "The paneer tikka was smoky and tender tonight. \
                    The staff were attentive and the tables were clean. \
                    Parking near the entrance is limited on weekends. \
                    Desserts arrived quickly and tasted wonderfully fresh.";
        let out = summarize(text, &tk, &rules(2));
        let picked = tk.sentences(&out).len();
        assert!(picked <= 2, "got {picked} sentences: {out}");
        assert_eq!(tk.sentences(&summarize(text, &tk, &rules(1))).len(), 1);
    }

    #[test]
    fn ranks_by_content_density_not_position() {
        let tk = HeuristicToolkit::new();
        let weak = "It was what it was and we will be there again.";
        let strong = "Crispy dosa, spicy chutney, delicious sambar, friendly staff.";
        let text = format!("{weak} {strong}");
        assert_eq!(summarize(&text, &tk, &rules(1)), strong);
        assert_eq!(summarize(&text, &tk, &rules(2)), format!("{strong} {weak}"));
    }

    #[test]
    fn ties_keep_document_order_and_duplicates_collapse() {
        let tk = HeuristicToolkit::new();
        let a = "Great biryani and friendly staff every single time.";
        let text = format!("{a} {a}");
        let scored = score_sentences(&text, &tk, &rules(2));
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].position, 0);
        assert_eq!(summarize(&text, &tk, &rules(2)), a);
    }

    #[test]
    fn empty_text_gives_fallback() {
        let tk = HeuristicToolkit::new();
        assert_eq!(summarize("", &tk, &rules(2)), NO_SUMMARY);
    }

    #[test]
    fn scores_are_fractions() {
        let tk = HeuristicToolkit::new();
        let text = "The staff were friendly and the service was excellent.";
        let scored = score_sentences(text, &tk, &rules(2));
        assert_eq!(scored.len(), 1);
        assert!(scored[0].score > 0.0 && scored[0].score <= 1.0);
    }
}
