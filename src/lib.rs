use axum::{
    extract::Extension,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod logging;

pub mod dto {
    pub mod page_dto;
    pub mod player_dto;
    pub mod team_dto;
}

pub mod routes {
    pub mod extract;
    pub mod health;
    pub mod teams;
}

pub mod services {
    pub mod players_gateway;
    pub mod team_service;
    pub mod team_store;
}

use routes::{health::health, teams};
use services::team_service::TeamService;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/**
 * Builds the HTTP surface. The pool backs the health check, the service
 * backs everything under `/api/teams`.
 */
pub fn app(pool: SqlitePool, service: TeamService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/teams", get(teams::get_teams).post(teams::create_team))
        .route(
            "/api/teams/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/api/teams/{id}/players", get(teams::get_team_players))
        .route(
            "/api/teams/name/{team_name}/players",
            get(teams::get_team_players_by_name),
        )
        .layer(Extension(service))
        .layer(Extension(pool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
