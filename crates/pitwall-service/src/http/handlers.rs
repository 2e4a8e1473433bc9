//! Route handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use pitwall_schemas::{Driver, RaceEvent, Team};
use pitwall_standings::TeamStanding;

use super::AppState;
use super::error::ApiResult;
use crate::league::{DriverSubmission, EventSubmission, TeamSubmission};
use crate::view::EventView;

/// Standings of every team
pub async fn list_teams(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TeamStanding>>> {
    let standings = state.league.standings().await?;
    Ok(Json(standings.teams))
}

/// One team and its roster
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Team>> {
    let Path(team_id) = path?;
    Ok(Json(state.league.team(team_id).await?))
}

/// Register a team; answers 201 with the assigned IDs
pub async fn add_team(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TeamSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let Json(submission) = payload?;
    let team = state.league.add_team(submission).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Rename a team and its driver slots
pub async fn update_team(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<TeamSubmission>, JsonRejection>,
) -> ApiResult<Json<Team>> {
    let Path(team_id) = path?;
    let Json(submission) = payload?;
    Ok(Json(state.league.rename_team(team_id, submission).await?))
}

/// Remove a team
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(team_id) = path?;
    state.league.delete_team(team_id).await?;
    Ok(StatusCode::OK)
}

/// Rename one driver of a team
pub async fn update_driver(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(u64, u64)>, PathRejection>,
    payload: Result<Json<DriverSubmission>, JsonRejection>,
) -> ApiResult<Json<Driver>> {
    let Path((team_id, driver_id)) = path?;
    let Json(submission) = payload?;
    Ok(Json(
        state
            .league
            .rename_driver(team_id, driver_id, submission)
            .await?,
    ))
}

/// Every race event with names resolved
pub async fn list_races(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<EventView>>> {
    Ok(Json(state.league.events_view().await?))
}

/// One race event with names resolved
pub async fn get_race(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<EventView>> {
    let Path(event_id) = path?;
    Ok(Json(state.league.event_view(event_id).await?))
}

/// Score and record a race event; answers 201
pub async fn create_race(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RaceEvent>)> {
    let Json(submission) = payload?;
    let event = state.league.create_event(submission).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Rescore and replace a race event
pub async fn update_race(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<EventSubmission>, JsonRejection>,
) -> ApiResult<Json<RaceEvent>> {
    let Path(event_id) = path?;
    let Json(submission) = payload?;
    Ok(Json(state.league.replace_event(event_id, submission).await?))
}

/// Remove a race event
pub async fn delete_race(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(event_id) = path?;
    state.league.delete_event(event_id).await?;
    Ok(StatusCode::OK)
}

/// Succeeds for any editor; lets clients check a login
pub async fn user_check() -> StatusCode {
    StatusCode::OK
}
