//! Recipe response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a difficulty label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Get difficulty as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A generated recipe
///
/// The generator authors the content, so the recipe is kept exactly as
/// returned and read through tolerant accessors. A field with the wrong
/// type reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(Value);

impl Recipe {
    /// Wrap a JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the underlying JSON
    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn cook_time_minutes(&self) -> Option<f64> {
        self.0.get("cook_time_minutes").and_then(Value::as_f64)
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.0
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(Difficulty::parse)
    }

    pub fn uses(&self) -> Vec<&str> {
        self.strings("uses")
    }

    pub fn missing(&self) -> Vec<&str> {
        self.strings("missing")
    }

    pub fn missing_count(&self) -> Option<u64> {
        self.0.get("missing_count").and_then(Value::as_u64)
    }

    /// Pantry items close to expiry that this recipe uses
    pub fn expiring_items_used(&self) -> Vec<&str> {
        self.strings("expiring_items_used")
    }

    pub fn steps(&self) -> Vec<&str> {
        self.strings("steps")
    }

    /// Match score, only when it is a JSON number
    pub fn match_score(&self) -> Option<f64> {
        self.0.get("match_score").and_then(Value::as_f64)
    }

    /// Score used for ordering: the match score, or 0 when missing or non-numeric
    pub fn sort_score(&self) -> f64 {
        self.match_score().unwrap_or(0.0)
    }

    fn strings(&self, field: &str) -> Vec<&str> {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Value> for Recipe {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The cached payload: a ranked recipe list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipes, best match first
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl RecipeResponse {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Whether a response came from the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    /// Served from a fresh cache entry
    Hit,
    /// Freshly generated
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

/// Result of handling a recipe request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeOutcome {
    pub recipes: Vec<Recipe>,
    pub cache: CacheStatus,
    pub fingerprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let recipe = Recipe::new(json!({
            "title": "Omelette",
            "cook_time_minutes": 10,
            "difficulty": "Easy",
            "uses": ["eggs", "milk"],
            "missing": [],
            "missing_count": 0,
            "expiring_items_used": ["milk"],
            "match_score": 92.5,
            "steps": ["Whisk", "Cook"]
        }));

        assert_eq!(recipe.title(), Some("Omelette"));
        assert_eq!(recipe.cook_time_minutes(), Some(10.0));
        assert_eq!(recipe.difficulty(), Some(Difficulty::Easy));
        assert_eq!(recipe.uses(), vec!["eggs", "milk"]);
        assert!(recipe.missing().is_empty());
        assert_eq!(recipe.missing_count(), Some(0));
        assert_eq!(recipe.expiring_items_used(), vec!["milk"]);
        assert_eq!(recipe.match_score(), Some(92.5));
        assert_eq!(recipe.steps().len(), 2);
    }

    #[test]
    fn test_non_numeric_score_sorts_as_zero() {
        let recipe = Recipe::new(json!({"title": "Soup", "match_score": "high"}));
        assert_eq!(recipe.match_score(), None);
        assert_eq!(recipe.sort_score(), 0.0);
        // The stored value is untouched
        assert_eq!(recipe.as_value()["match_score"], "high");
    }

    #[test]
    fn test_cache_status_serde() {
        assert_eq!(serde_json::to_value(CacheStatus::Hit).unwrap(), json!("HIT"));
        assert_eq!(serde_json::to_value(CacheStatus::Miss).unwrap(), json!("MISS"));
    }

    #[test]
    fn test_response_missing_recipes_defaults_empty() {
        let response: RecipeResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.is_empty());
    }
}
