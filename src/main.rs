use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comedy_catalog::config::Config;
use comedy_catalog::db::Database;
use comedy_catalog::jobs::{promote_next_ready, start_promotion_job};
use comedy_catalog::store::{PgCatalogStore, SharedStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "comedy_catalog=debug,sqlx=warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection
    let db = Database::connect(&config).await?;
    db.run_migrations().await?;

    let store: SharedStore = Arc::new(PgCatalogStore::new(db.pg.clone()));

    if !config.promotion.enabled {
        tracing::info!("Video promotion disabled, exiting");
        return Ok(());
    }

    if config.promotion.run_once {
        promote_next_ready(store.as_ref()).await?;
        return Ok(());
    }

    let every = Duration::from_secs(config.promotion.interval_secs);
    tokio::select! {
        _ = start_promotion_job(store, every) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    db.pg.close().await;
    Ok(())
}
