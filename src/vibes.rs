use serde::{Deserialize, Serialize};

/// One vibe label with the keywords that vote for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeCategory {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub keywords: Vec<String>,
}

/// Ordered label -> keywords table. Declaration order is the output order of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: Vec<VibeCategory>,
}

impl Taxonomy {
    pub fn new(categories: Vec<VibeCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[VibeCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn icon_for(&self, label: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.icon.as_str())
            .filter(|icon| !icon.is_empty())
    }
}

static DEFAULT_TABLE: &[(&str, &str, &[&str])] = &[
    ("Great Ambience", "✨", &["ambience", "atmosphere", "decor", "interior", "view", "vibe"]),
    (
        "Excellent Service",
        "👍",
        &["service", "staff", "owner", "friendly", "welcoming", "hospitable", "polite", "behavior"],
    ),
    ("Good for Groups", "👥", &["friends", "family", "group", "gathering", "party", "celebration"]),
    ("Romantic Spot", "💑", &["date", "romantic", "couple", "cozy", "intimate"]),
    ("Budget-Friendly", "💸", &["cheap", "affordable", "value", "price", "reasonable", "economic"]),
    ("Meat Lover's Choice", "🍗", &["chicken", "mutton", "fish", "kebab", "non-veg", "tandoori"]),
    ("Biryani Hub", "🍚", &["biryani", "briyani", "hyderabadi"]),
    ("Cafe & Quick Bites", "☕", &["cafe", "coffee", "snacks", "bakery", "mocktail"]),
    (
        "Veggie Paradise",
        "🌿",
        &["vegetarian", "veg", "vegan", "paneer", "thali", "plant-based", "pure veg", "shakahaar", "veg thali"],
    ),
    ("Drinks & Mocktails", "🍹", &["mocktail", "cocktail", "beverage", "drink", "refreshing"]),
    (
        "Desserts & Sweets",
        "🍰",
        &["dessert", "sweet", "ice cream", "pastry", "cake", "pudding", "gulab jamun", "rasgulla"],
    ),
    ("Spicy & Flavorful", "🌶️", &["spicy", "flavorful", "tasty", "delicious", "mouthwatering", "zesty"]),
    ("Diverse Cuisine", "🍽️", &["cuisine", "variety", "menu", "options", "international", "fusion"]),
    (
        "Hidden Gem",
        "🌟",
        &["hidden gem", "secret", "underrated", "local favorite", "off the beaten path"],
    ),
    ("Pizza & Fast Food", "🍕", &["pizza", "burger", "fast food", "snacks", "quick bites", "fries"]),
    (
        "Noodles & Chinese",
        "🍜",
        &["noodles", "chinese", "manchurian", "spring roll", "dimsum", "chowmein"],
    ),
    ("Indian Classics", "🍛", &["indian", "curry", "dal", "roti", "naan", "chapati", "paratha"]),
    ("Sushi & Japanese", "🍣", &["sushi", "japanese", "ramen", "tempura", "sashimi"]),
    (
        "Party & Celebration",
        "🎉",
        &["party", "celebration", "event", "birthday", "anniversary", "get-together"],
    ),
    ("International Flavors", "🌍", &["international", "global", "world cuisine", "fusion", "exotic"]),
    ("Breakfast & Brunch", "🍳", &["breakfast", "brunch", "eggs", "pancakes", "waffles", "toast"]),
    (
        "Street Food Vibes",
        "🍔",
        &["street food", "chaat", "pani puri", "bhel puri", "vada pav", "pav bhaji"],
    ),
    ("Barbecue & Grill", "🍖", &["barbecue", "grill", "tandoor", "smoked", "charcoal", "roasted"]),
];

impl Default for Taxonomy {
    fn default() -> Self {
        let categories = DEFAULT_TABLE
            .iter()
            .map(|(label, icon, keywords)| VibeCategory {
                label: label.to_string(),
                icon: icon.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { categories }
    }
}

/// Non-overlapping, case-insensitive substring hits summed over `keywords`.
/// `text_lower` must already be lowercased.
pub fn mention_count(text_lower: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .map(|k| text_lower.matches(k.as_str()).count())
        .sum()
}

/// Labels whose combined keyword mentions reach `threshold`, in taxonomy order.
pub fn classify(normalized: &str, taxonomy: &Taxonomy, threshold: usize) -> Vec<String> {
    if normalized.trim().is_empty() {
        return Vec::new();
    }
    let text_lower = normalized.to_lowercase();
    taxonomy
        .categories()
        .iter()
        .filter(|c| mention_count(&text_lower, &c.keywords) >= threshold)
        .map(|c| c.label.clone())
        .collect()
}
