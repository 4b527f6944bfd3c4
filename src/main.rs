use std::path::Path;
use std::sync::Arc;

use alchemy_codex::config::Config;
use alchemy_codex::persistence::{self, Catalog, DbPool, SqliteCatalog};
use alchemy_codex::seed::{self, CatalogSeed};
use alchemy_codex::{web, AppState};
use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let pool = persistence::build_pool(&config.database_url, config.pool_size)
        .with_context(|| format!("failed to open database '{}'", config.database_url))?;
    persistence::run_migrations(&pool)?;

    if let Some(seed_file) = &config.seed_file {
        import_seed(&pool, seed_file)?;
    }

    let catalog: Arc<dyn Catalog> = Arc::new(SqliteCatalog::new(pool));
    let state = AppState::from((catalog, config.media_root.clone()));
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn import_seed(pool: &DbPool, path: &Path) -> Result<(), anyhow::Error> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let catalog: CatalogSeed = serde_json::from_str(&raw)
        .with_context(|| format!("seed file {} is not a valid catalog", path.display()))?;

    let mut conn = pool.get()?;
    let report = seed::import(&mut conn, &catalog)?;
    tracing::info!(
        file = %path.display(),
        effects = report.effects,
        ingredients = report.ingredients,
        links = report.links,
        vendors = report.vendors,
        stock = report.stock,
        "imported seed catalog"
    );
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
        Err(err) => tracing::error!("unable to listen for shutdown signal: {}", err),
    }
}
