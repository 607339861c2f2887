use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use crate::error::ApiError;
use crate::models::{CreatePlayerRequest, Player, UpdatePlayerRequest};
use crate::service::PlayerDirectory;

// GET /api/players - List all players
pub async fn get_players(
    State(directory): State<PlayerDirectory>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = directory.list_all().await?;

    Ok(Json(players))
}

// GET /api/players/{id} - Get player by ID
pub async fn get_player_by_id(
    State(directory): State<PlayerDirectory>,
    Path(player_id): Path<i64>,
) -> Result<Json<Player>, ApiError> {
    let player = directory.get_by_id(player_id).await?;

    Ok(Json(player))
}

// POST /api/players - Register a new player
pub async fn create_player(
    State(directory): State<PlayerDirectory>,
    payload: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let Json(request) = payload?;
    let player = directory.create(request).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

// PUT /api/players/{id} - Update the supplied fields of a player
pub async fn update_player(
    State(directory): State<PlayerDirectory>,
    Path(player_id): Path<i64>,
    payload: Result<Json<UpdatePlayerRequest>, JsonRejection>,
) -> Result<Json<Player>, ApiError> {
    let Json(request) = payload?;
    let player = directory.update(player_id, request).await?;

    Ok(Json(player))
}

// DELETE /api/players/{id} - Remove a player
pub async fn delete_player(
    State(directory): State<PlayerDirectory>,
    Path(player_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    directory.delete(player_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
