//! Basic example: serve recipes from an in-memory cache

use larder::prelude::*;
use serde_json::json;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== larder Basic Example ===\n");

    let generator = FakeGenerator::with_json(json!({
        "recipes": [
            {
                "title": "Rice pudding",
                "cook_time_minutes": 25,
                "difficulty": "easy",
                "uses": ["rice", "milk"],
                "missing": ["sugar"],
                "missing_count": 1,
                "expiring_items_used": ["milk"],
                "match_score": 72,
                "steps": ["Simmer rice in milk.", "Sweeten and serve."]
            },
            {
                "title": "Spanish omelette",
                "cook_time_minutes": 20,
                "difficulty": "medium",
                "uses": ["eggs", "milk"],
                "missing": ["potatoes"],
                "missing_count": 1,
                "expiring_items_used": ["milk"],
                "match_score": 88,
                "steps": ["Whisk eggs with milk.", "Cook slowly in a pan."]
            }
        ]
    }));
    let service = RecipeService::new(MemoryStore::with_defaults(), generator.clone());

    let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);
    let request = RecipeRequest::new(vec![
        PantryItemRaw::new("Milk", 1.0).expires(tomorrow.to_string()),
        PantryItemRaw::new("eggs", 6.0),
        PantryItemRaw::new("rice", 2.0),
    ])
    .max_recipes(2)
    .diet("vegetarian");

    for attempt in 1..=2 {
        let outcome = service.handle(&request).await?;
        println!("Attempt {attempt}: cache {}", outcome.cache.as_str());
        for recipe in &outcome.recipes {
            println!(
                "   {} (score {})",
                recipe.title().unwrap_or("untitled"),
                recipe.sort_score()
            );
        }
    }

    println!("\nGenerator calls: {}", generator.calls());
    println!("Fingerprint: {}", service.handle(&request).await?.fingerprint);

    Ok(())
}
