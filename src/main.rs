use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use teams_service::{
    app,
    config::AppConfig,
    logging::init_logging,
    services::{
        players_gateway::HttpPlayersGateway,
        team_service::TeamService,
        team_store::SqliteTeamStore,
    },
    MIGRATOR,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Could not load configuration")?;
    init_logging(&config.logging);

    let connect_options = SqliteConnectOptions::from_str(&config.database.url)
        .context("Invalid database url")?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await
        .context("Could not connect to SQLite")?;

    MIGRATOR.run(&pool).await.context("Could not apply migrations")?;
    info!("Connected to sqlite database.");

    let players = HttpPlayersGateway::new(&config.players.base_url)
        .context("Could not build players service client")?;
    info!("Players service at {}", players.base_url());

    let service = TeamService::new(
        Arc::new(SqliteTeamStore::new(pool.clone())),
        Arc::new(players),
    );

    let router = app(pool, service);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Could not bind {address}"))?;
    info!("Started server on {}.", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
