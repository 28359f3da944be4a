//! Generator prompt rendering

use larder_core::{PantryItemEnriched, RequestOptions};

use crate::enrich::sort_by_urgency;

/// Version of the prompt and output schema, recorded with cached entries
pub const PROMPT_VERSION: u32 = 1;

/// Prompt settings
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Maximum number of steps per recipe
    pub max_steps: u32,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { max_steps: 8 }
    }
}

impl PromptConfig {
    /// Set the step cap
    pub fn max_steps(mut self, steps: u32) -> Self {
        self.max_steps = steps;
        self
    }
}

const SCHEMA: &str = r#"{
  "recipes": [
    {
      "title": string,
      "cook_time_minutes": number,
      "difficulty": "easy" | "medium" | "hard",
      "uses": string[],
      "missing": string[],
      "missing_count": number,
      "expiring_items_used": string[],
      "match_score": number,
      "steps": string[]
    }
  ]
}"#;

/// Render the generator instruction for a pantry
///
/// The pantry is listed most urgent first.
pub fn build_prompt(
    options: &RequestOptions,
    pantry: &[PantryItemEnriched],
    config: &PromptConfig,
) -> String {
    let mut items = pantry.to_vec();
    sort_by_urgency(&mut items);

    let allergies = serde_json::to_string(&options.allergies).unwrap_or_else(|_| "[]".into());
    let pantry_json = serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".into());

    let rules = [
        format!("Generate {} recipes", options.max_recipes),
        format!("Max cook time {} minutes", options.max_time_minutes),
        format!("Diet: {}", options.diet),
        format!("Allergies (never use): {allergies}"),
        "Prefer ingredients with expiring_soon = true; list them in expiring_items_used".to_string(),
        "expiring_items_used must be a subset of uses; missing_count is the length of missing"
            .to_string(),
        "match_score is 0-100 for how well the recipe uses the pantry; sort recipes by match_score descending"
            .to_string(),
        format!(
            "Keep steps concise, at most {} steps per recipe",
            config.max_steps
        ),
    ];

    let mut prompt = format!("Return ONLY valid JSON.\n\nSchema:\n{SCHEMA}\n\nRules:\n");
    for rule in rules {
        prompt.push_str("- ");
        prompt.push_str(&rule);
        prompt.push('\n');
    }
    prompt.push_str("\nPantry (most urgent first):\n");
    prompt.push_str(&pantry_json);
    prompt.push('\n');
    prompt
}
