//! Defensive post-processing of generator output

use serde_json::Value;

use larder_core::{Recipe, RecipeResponse};

/// Turn parsed generator output into a ranked response
///
/// A payload without a `recipes` array yields an empty list rather than an
/// error. Recipes are ordered by match score, best first.
pub fn normalize(raw: Value) -> RecipeResponse {
    let mut response = coerce_shape(raw);
    sort_by_match_score(&mut response.recipes);
    response
}

/// Extract the `recipes` array, substituting an empty list on any mismatch
pub fn coerce_shape(raw: Value) -> RecipeResponse {
    let recipes = match raw {
        Value::Object(mut payload) => match payload.remove("recipes") {
            Some(Value::Array(items)) => items.into_iter().map(Recipe::new).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    RecipeResponse::new(recipes)
}

/// Stable sort by match score, descending
///
/// Missing or non-numeric scores order as 0; the recipes themselves are
/// not modified.
pub fn sort_by_match_score(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.sort_score().total_cmp(&a.sort_score()));
}
