//! Example: cache recipe responses in Redis, with cache events logged via tracing

use larder::prelude::*;
use larder::{LazyStore, TracingMetrics};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    println!("Connecting to Redis at {redis_url}");

    // Connect on first use, once per process
    let store = LazyStore::new(move || {
        let config = RedisConfig::new(redis_url.clone()).pool_size(5).prefix("example");
        async move { RedisStore::new(config).await }
    });

    let generator = FakeGenerator::with_response(
        r#"{"recipes": [{"title": "Tomato soup", "match_score": 64}]}"#,
    );
    let service = RecipeService::with_metrics(
        store,
        generator,
        TracingMetrics::new().with_service_name("redis-example"),
        ServiceConfig::default(),
    );

    let request = RecipeRequest::new(vec![
        PantryItemRaw::new("tomatoes", 4.0),
        PantryItemRaw::new("onion", 1.0),
    ]);

    match service.handle(&request).await {
        Ok(outcome) => {
            println!("cache {}: {} recipes", outcome.cache.as_str(), outcome.recipes.len());
            let again = service.handle(&request).await?;
            println!("cache {}: {} recipes", again.cache.as_str(), again.recipes.len());
        }
        Err(e) => println!("Request failed ({}): {e}", e.code()),
    }

    Ok(())
}
