//! Inbound recipe request

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pantry::PantryItemRaw;

/// Default number of recipes to ask for
pub const DEFAULT_MAX_RECIPES: u32 = 5;
/// Default cook time cap in minutes
pub const DEFAULT_MAX_TIME_MINUTES: u32 = 30;
/// Default diet label
pub const DEFAULT_DIET: &str = "any";

/// A request for recipes
///
/// Optional fields fall back to their defaults when absent, zero, or blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Pantry contents; required and non-empty
    #[serde(default)]
    pub pantry: Option<Vec<PantryItemRaw>>,
    #[serde(default)]
    pub max_recipes: Option<u32>,
    #[serde(default)]
    pub max_time_minutes: Option<u32>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
}

impl RecipeRequest {
    /// Create a request for the given pantry
    pub fn new(pantry: Vec<PantryItemRaw>) -> Self {
        Self {
            pantry: Some(pantry),
            ..Default::default()
        }
    }

    /// Parse a loosely-typed payload
    ///
    /// Never fails: a `pantry` that is not an array reads as absent, numeric
    /// options accept numbers and numeric strings, and non-string allergies
    /// are stringified.
    pub fn from_value(payload: &Value) -> Self {
        let pantry = payload.get("pantry").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                .collect()
        });

        let allergies = payload.get("allergies").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|a| match a {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        });

        Self {
            pantry,
            max_recipes: payload.get("max_recipes").and_then(positive_u32),
            max_time_minutes: payload.get("max_time_minutes").and_then(positive_u32),
            diet: payload
                .get("diet")
                .and_then(Value::as_str)
                .map(str::to_string),
            allergies,
        }
    }

    pub fn max_recipes(mut self, n: u32) -> Self {
        self.max_recipes = Some(n);
        self
    }

    pub fn max_time_minutes(mut self, minutes: u32) -> Self {
        self.max_time_minutes = Some(minutes);
        self
    }

    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    pub fn allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = Some(allergies.into_iter().map(Into::into).collect());
        self
    }

    /// Pantry items, empty when absent
    pub fn pantry_items(&self) -> &[PantryItemRaw] {
        self.pantry.as_deref().unwrap_or_default()
    }

    /// Resolve options with defaults applied
    pub fn options(&self) -> RequestOptions {
        RequestOptions {
            max_recipes: self
                .max_recipes
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_RECIPES),
            max_time_minutes: self
                .max_time_minutes
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_TIME_MINUTES),
            diet: self
                .diet
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(DEFAULT_DIET)
                .to_string(),
            allergies: self.allergies.clone().unwrap_or_default(),
        }
    }
}

/// Request options with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub max_recipes: u32,
    pub max_time_minutes: u32,
    pub diet: String,
    pub allergies: Vec<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RecipeRequest::default().options()
    }
}

fn positive_u32(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 1.0).then(|| n.min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = RecipeRequest::new(vec![]).options();
        assert_eq!(options.max_recipes, 5);
        assert_eq!(options.max_time_minutes, 30);
        assert_eq!(options.diet, "any");
        assert!(options.allergies.is_empty());
    }

    #[test]
    fn test_zero_and_blank_fall_back() {
        let options = RecipeRequest::new(vec![])
            .max_recipes(0)
            .max_time_minutes(0)
            .diet("  ")
            .options();
        assert_eq!(options, RequestOptions::default());
    }

    #[test]
    fn test_builder() {
        let options = RecipeRequest::new(vec![PantryItemRaw::new("rice", 1.0)])
            .max_recipes(3)
            .max_time_minutes(45)
            .diet("vegetarian")
            .allergies(["peanuts"])
            .options();
        assert_eq!(options.max_recipes, 3);
        assert_eq!(options.max_time_minutes, 45);
        assert_eq!(options.diet, "vegetarian");
        assert_eq!(options.allergies, vec!["peanuts"]);
    }

    #[test]
    fn test_from_value_lenient() {
        let request = RecipeRequest::from_value(&json!({
            "pantry": [{"name": "Egg", "quantity": 2}],
            "max_recipes": "3",
            "max_time_minutes": 0,
            "diet": "vegan",
            "allergies": ["nuts", 7]
        }));
        assert_eq!(request.pantry_items().len(), 1);
        let options = request.options();
        assert_eq!(options.max_recipes, 3);
        assert_eq!(options.max_time_minutes, 30);
        assert_eq!(options.diet, "vegan");
        assert_eq!(options.allergies, vec!["nuts", "7"]);
    }

    #[test]
    fn test_from_value_pantry_not_array() {
        let request = RecipeRequest::from_value(&json!({"pantry": "eggs"}));
        assert!(request.pantry.is_none());
        assert!(request.pantry_items().is_empty());
    }
}
