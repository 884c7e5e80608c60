use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Coarse part-of-speech classes, close to the universal tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Particle,
    Numeral,
    Interjection,
    Punctuation,
    Symbol,
}

impl PartOfSpeech {
    /// Nouns, adjectives and verbs carry the content of a sentence.
    pub fn is_content(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Adjective | PartOfSpeech::Verb)
    }
}

/// Sentence splitter, tokenizer, tagger and stopword list used by the summarizer.
///
/// Implementations hold no per-call state; one instance is built at startup and
/// shared across threads.
pub trait TextToolkit: Send + Sync {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;
    fn tokens<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
    /// `prev` is the preceding token of the same sentence, `None` at sentence start.
    fn tag(&self, token: &str, prev: Option<&str>) -> PartOfSpeech;
    fn is_stopword(&self, token: &str) -> bool;
}

/// Unicode segmentation plus a lexicon and suffix-rule tagger for English reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicToolkit;

impl HeuristicToolkit {
    pub fn new() -> Self {
        Self
    }
}

impl TextToolkit for HeuristicToolkit {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn tokens<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        sentence
            .split_word_bounds()
            .filter(|t| !t.trim().is_empty())
            .collect()
    }

    fn tag(&self, token: &str, prev: Option<&str>) -> PartOfSpeech {
        tag_token(token, prev)
    }

    fn is_stopword(&self, token: &str) -> bool {
        STOPWORDS.contains(token.to_lowercase().as_str())
    }
}

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
        "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
        "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
        "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
        "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
        "beyond", "both", "but", "by", "ca", "call", "can", "cannot", "could", "did", "do", "does",
        "doing", "done", "down", "due", "during", "each", "either", "else", "elsewhere", "enough",
        "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few", "first",
        "for", "former", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hers", "herself",
        "him", "himself", "his", "how", "however", "i", "if", "in", "indeed", "into", "is", "it",
        "its", "itself", "just", "keep", "last", "latter", "least", "less", "made", "make", "many",
        "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "move",
        "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless",
        "next", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
        "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
        "quite", "rather", "re", "really", "regarding", "same", "say", "see", "seem", "seemed",
        "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since", "so",
        "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still",
        "such", "take", "than", "that", "the", "their", "them", "themselves", "then", "thence",
        "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
        "this", "those", "though", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "under", "unless", "until", "up", "upon", "us", "used", "using",
        "various", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
        "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
        "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
        "yours", "yourself", "yourselves", "n't", "'s", "'m", "'re", "'ve", "'d", "'ll",
    ])
});

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
        "all", "both", "either", "neither", "another", "such", "what", "which", "whatever",
    ])
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your",
        "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
        "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "who",
        "whom", "whose", "someone", "something", "anyone", "anything", "everyone", "everything",
        "nobody", "nothing", "one",
    ])
});

static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
        "about", "above", "below", "after", "before", "between", "among", "through", "during",
        "without", "within", "near", "behind", "beside", "besides", "across", "along", "around",
        "against", "toward", "towards", "upon", "via", "per", "like", "off", "out", "up", "down",
        "inside", "outside", "beyond", "since", "until", "than",
    ])
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while",
        "whereas", "if", "unless", "whether", "when", "whenever", "where", "as", "once", "plus",
    ])
});

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
        "must", "'s", "'re", "'m", "'ve", "'d", "'ll", "ca", "wo",
    ])
});

static MODALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&["will", "would", "shall", "should", "can", "could", "may", "might", "must", "'ll", "'d"])
});

static PARTICLES: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&["to", "not", "n't"]));

static INTERJECTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&["oh", "wow", "yay", "ugh", "hey", "hi", "hello", "thanks", "yes", "yeah", "ok", "okay", "please"])
});

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "very", "too", "also", "just", "really", "quite", "always", "never", "often", "sometimes",
        "again", "still", "already", "here", "there", "now", "then", "soon", "even", "almost",
        "well", "much", "more", "most", "less", "least", "rather", "pretty", "so", "only", "ever",
        "definitely", "highly", "totally", "super", "must", "twice", "once", "back", "away",
    ])
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "good", "great", "nice", "best", "better", "bad", "worse", "worst", "tasty", "friendly",
        "lovely", "amazing", "awesome", "excellent", "fresh", "hot", "cold", "warm", "cozy",
        "clean", "dirty", "fast", "slow", "quick", "cheap", "expensive", "small", "big", "large",
        "huge", "little", "new", "old", "fine", "perfect", "superb", "polite", "rude", "spicy",
        "sweet", "sour", "soft", "crispy", "juicy", "rich", "bland", "authentic", "average",
        "decent", "reasonable", "affordable", "overpriced", "delicious", "yummy", "calm", "quiet",
        "loud", "busy", "crowded", "spacious", "ample", "prompt", "attentive", "courteous",
        "helpful", "pleasant", "wonderful", "fantastic", "outstanding", "mediocre", "poor",
        "top", "full", "main", "veg", "vegetarian", "vegan", "famous", "popular", "special",
        "favourite", "favorite", "happy", "sad", "long", "short", "high", "low", "same",
        "different", "other", "own", "many", "few", "several", "whole",
    ])
});

static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "eat", "ate", "eaten", "go", "went", "gone", "come", "came", "visit", "visited", "try",
        "tried", "order", "ordered", "love", "loved", "like", "liked", "enjoy", "enjoyed", "serve",
        "served", "recommend", "recommended", "taste", "tasted", "get", "got", "make", "made",
        "take", "took", "give", "gave", "feel", "felt", "find", "found", "say", "said", "wait",
        "waited", "return", "returned", "pay", "paid", "charge", "charged", "bring", "brought",
        "keep", "kept", "want", "wanted", "need", "needed", "know", "knew", "think", "thought",
        "see", "saw", "seen", "look", "looked", "seem", "seemed", "cook", "cooked", "miss",
        "missed", "offer", "offered", "provide", "provided", "suggest", "suggested", "deserve",
        "deserves", "loves", "serves", "tastes", "makes", "takes", "gets",
    ])
});

static NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "food", "service", "staff", "place", "restaurant", "ambience", "atmosphere", "price",
        "prices", "menu", "dish", "dishes", "taste", "biryani", "chicken", "mutton", "fish",
        "owner", "waiter", "waiters", "table", "time", "quality", "quantity", "value", "money",
        "experience", "family", "friends", "people", "view", "decor", "interior", "cafe",
        "coffee", "tea", "dessert", "desserts", "drink", "drinks", "portion", "portions",
        "location", "parking", "music", "hotel", "meal", "lunch", "dinner", "breakfast",
        "rice", "curry", "bread", "paneer", "thali", "pizza", "burger", "noodles", "spot",
    ])
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "iest"];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "er", "or", "ist", "ism", "ery",
];

fn tag_token(token: &str, prev: Option<&str>) -> PartOfSpeech {
    if !token.chars().any(char::is_alphanumeric) {
        return if token.chars().all(|c| c.is_ascii_punctuation() || c.is_whitespace() || is_unicode_punct(c)) {
            PartOfSpeech::Punctuation
        } else {
            PartOfSpeech::Symbol
        };
    }
    if token.chars().all(|c| c.is_numeric() || c == '.' || c == ',') {
        return PartOfSpeech::Numeral;
    }

    let lower = token.to_lowercase();
    let w = lower.as_str();

    if w == "n't" || w == "not" {
        return PartOfSpeech::Particle;
    }
    if w.ends_with("n't") {
        return PartOfSpeech::Auxiliary;
    }
    if DETERMINERS.contains(w) {
        return PartOfSpeech::Determiner;
    }
    if PRONOUNS.contains(w) {
        return PartOfSpeech::Pronoun;
    }
    if AUXILIARIES.contains(w) {
        return PartOfSpeech::Auxiliary;
    }
    if PARTICLES.contains(w) {
        return PartOfSpeech::Particle;
    }
    if CONJUNCTIONS.contains(w) {
        return PartOfSpeech::Conjunction;
    }
    if ADPOSITIONS.contains(w) {
        return PartOfSpeech::Adposition;
    }
    if INTERJECTIONS.contains(w) {
        return PartOfSpeech::Interjection;
    }

    let mid_sentence_capital =
        prev.is_some() && token.chars().next().map(char::is_uppercase).unwrap_or(false);
    let prev_lower = prev.map(str::to_lowercase);
    match prev_lower.as_deref() {
        // "to" is mostly a preposition in reviews ("went to Paradise"); promote known verbs only.
        Some("to") if !mid_sentence_capital && (VERBS.contains(w) || looks_verbal(w)) => {
            return PartOfSpeech::Verb;
        }
        Some(p) if MODALS.contains(p) && !mid_sentence_capital && !ADVERBS.contains(w) => {
            return PartOfSpeech::Verb;
        }
        _ => {}
    }

    if ADVERBS.contains(w) {
        return PartOfSpeech::Adverb;
    }
    if ADJECTIVES.contains(w) {
        return PartOfSpeech::Adjective;
    }
    if VERBS.contains(w) {
        return PartOfSpeech::Verb;
    }
    if NOUNS.contains(w) {
        return PartOfSpeech::Noun;
    }

    if mid_sentence_capital {
        return PartOfSpeech::ProperNoun;
    }
    suffix_tag(w).unwrap_or(PartOfSpeech::Noun)
}

fn looks_verbal(w: &str) -> bool {
    let len = w.chars().count();
    ((w.ends_with("ing") || w.ends_with("ed")) && len > 4) || w.ends_with("ize") || w.ends_with("ise")
}

fn suffix_tag(w: &str) -> Option<PartOfSpeech> {
    let len = w.chars().count();
    if w.ends_with("ly") && len > 3 {
        return Some(PartOfSpeech::Adverb);
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| w.ends_with(s))
        || (len > 5 && (w.ends_with("al") || w.ends_with("ic")))
    {
        return Some(PartOfSpeech::Adjective);
    }
    if (w.ends_with("ing") || w.ends_with("ed")) && len > 4 {
        return Some(PartOfSpeech::Verb);
    }
    if w.ends_with("ize") || w.ends_with("ise") {
        return Some(PartOfSpeech::Verb);
    }
    if NOUN_SUFFIXES.iter().any(|s| w.ends_with(s)) {
        return Some(PartOfSpeech::Noun);
    }
    None
}

fn is_unicode_punct(c: char) -> bool {
    matches!(c, '…' | '–' | '—' | '‘' | '’' | '“' | '”' | '·' | '«' | '»' | '¿' | '¡')
}
