mod config;

use config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use words_collide::{Dictionary, WordList, WordRepository};

async fn load_dictionary(config: &Config) -> Result<Arc<dyn Dictionary>, Box<dyn std::error::Error>> {
    if let Some(path) = &config.words_file {
        let words = WordList::from_file(path)?;
        tracing::info!(path = %path.display(), words = words.len(), "Loaded word list");
        return Ok(Arc::new(words));
    }

    let pool = SqlitePool::connect(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let repository = WordRepository::new(pool);
    match repository.count().await {
        Ok(0) => tracing::warn!("Word table is empty; run the seed tool to import a word list"),
        Ok(words) => tracing::info!(words, "Connected to word database"),
        Err(err) => tracing::warn!(%err, "Could not count words in database"),
    }
    Ok(Arc::new(repository))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let addr = config.addr();

    let dictionary = load_dictionary(&config).await?;
    let app = words_collide::app_with_config(dictionary, config.game_config());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
