//! Example: concurrent misses on the same pantry share one generation

use larder::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let generator = FakeGenerator::with_response(r#"{"recipes": [{"title": "Stew"}]}"#)
        .delay(Duration::from_millis(200));

    let config = ServiceConfig::default().gateway(GatewayConfig::default().coalesce_misses(true));
    let service = Arc::new(RecipeService::with_config(
        MemoryStore::with_defaults(),
        generator.clone(),
        config,
    ));

    let mut handles = Vec::new();
    for i in 0..5 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let request = RecipeRequest::new(vec![
                PantryItemRaw::new("beef", 1.0),
                PantryItemRaw::new("carrots", 3.0),
            ]);
            let outcome = service.handle(&request).await;
            (i, outcome)
        }));
    }

    for handle in handles {
        let (i, outcome) = handle.await?;
        let outcome = outcome?;
        println!("Task {i}: {} recipes, cache {}", outcome.recipes.len(), outcome.cache.as_str());
    }

    println!("Generator called {} time(s)", generator.calls());

    Ok(())
}
