//! Estate API endpoints.
//!
//! Create estates, plant trees, and read the derived tree statistics and
//! drone survey distance.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use estate_core::{
    CreateEstateRequest, CreateTreeRequest, CreatedResponse, DroneDistance, Estate, EstateStats,
    Tree,
};
use std::sync::Arc;

use crate::error::EstateError;
use crate::state::AppState;

/// Create a new estate.
pub async fn create_estate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), EstateError> {
    let Json(req) = payload?;
    let estate = state.create_estate(req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: estate.id })))
}

pub async fn get_estate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Estate>, EstateError> {
    state.resolve_estate(&id).map(Json).ok_or(EstateError::NotFound)
}

/// Plant a tree in an estate.
pub async fn create_tree(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CreateTreeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), EstateError> {
    let Json(req) = payload?;
    let tree_id = state.create_tree(&id, req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: tree_id })))
}

pub async fn list_trees(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Tree>>, EstateError> {
    if state.resolve_estate(&id).is_none() {
        return Err(EstateError::NotFound);
    }
    Ok(Json(state.list_trees(&id)))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EstateStats>, EstateError> {
    state.estate_stats(&id).map(Json)
}

/// Total distance of the drone survey over an estate.
pub async fn get_drone_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DroneDistance>, EstateError> {
    let distance = state.drone_distance(&id)?;
    Ok(Json(DroneDistance { distance }))
}
