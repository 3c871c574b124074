use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::dto::page_dto::DEFAULT_PAGE_SIZE;
use crate::dto::team_dto::TeamInput;
use crate::error::ServiceError;
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use crate::services::team_service::TeamService;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub search: Option<String>,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/**
 * GET a page of teams, optionally filtered by a search term.
 */
pub async fn get_teams(
    Extension(service): Extension<TeamService>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = service
        .list_teams(params.search.as_deref(), params.page, params.size)
        .await?;
    Ok((StatusCode::OK, Json(page)))
}

/**
 * GET a single team by id.
 */
pub async fn get_team(
    Extension(service): Extension<TeamService>,
    ApiPath(team_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let team = service.get_team(team_id).await?;
    Ok((StatusCode::OK, Json(team)))
}

/**
 * POST request to create a new team. Any id in the body is ignored.
 */
pub async fn create_team(
    Extension(service): Extension<TeamService>,
    ApiJson(mut payload): ApiJson<TeamInput>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.id = None;
    let team = service.create_or_replace(payload).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/**
 * PUT request replacing a team. The path id wins over the body.
 */
pub async fn update_team(
    Extension(service): Extension<TeamService>,
    ApiPath(team_id): ApiPath<i64>,
    ApiJson(mut payload): ApiJson<TeamInput>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.id = Some(team_id);
    let team = service.create_or_replace(payload).await?;
    Ok((StatusCode::OK, Json(team)))
}

/**
 * DELETE request to remove a team. Missing teams are not an error.
 */
pub async fn delete_team(
    Extension(service): Extension<TeamService>,
    ApiPath(team_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    service.delete_team(team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/**
 * GET the roster of a team from the Players service, by team id.
 */
pub async fn get_team_players(
    Extension(service): Extension<TeamService>,
    ApiPath(team_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let players = service.players_of_team(team_id).await?;
    Ok((StatusCode::OK, Json(players)))
}

/**
 * GET the roster of a team from the Players service, by team name.
 */
pub async fn get_team_players_by_name(
    Extension(service): Extension<TeamService>,
    ApiPath(team_name): ApiPath<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let players = service.players_of_team_by_name(&team_name).await?;
    Ok((StatusCode::OK, Json(players)))
}
