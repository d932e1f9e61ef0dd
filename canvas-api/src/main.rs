mod app_state;
mod config;
mod domain;
mod repositories;
mod router;
mod routes;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::config::read_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./canvas-api/.env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = read_config()?;

    let connection_pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy_with(config.database.with_db());

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", address);

    let app = router::create(connection_pool, config);
    axum::serve(listener, app).await?;

    Ok(())
}
