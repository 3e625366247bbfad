use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;

#[derive(Debug, Deserialize)]
pub struct PlayerPayload {
    pub name: String,
    pub color: String,
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest("Player name must not be empty".into()));
    }
    Ok(())
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(state.store.read().await.list_players()?))
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(payload): Json<PlayerPayload>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    validate_name(&payload.name)?;

    let player = Player::new(payload.name.trim().to_string(), payload.color);
    state.store.write().await.add_player(&player)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlayerPayload>,
) -> Result<Json<Player>, ApiError> {
    validate_name(&payload.name)?;

    let player = Player {
        id: id.into(),
        name: payload.name.trim().to_string(),
        color: payload.color,
    };
    state.store.write().await.update_player(&player)?;
    Ok(Json(player))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_player(&id.into())?;
    Ok(StatusCode::NO_CONTENT)
}
