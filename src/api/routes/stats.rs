use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{GameStats, PlayerStats};
use crate::stats::{compute_game_stats, compute_player_stats};

/// Per-player performance statistics, recomputed from a fresh snapshot on
/// every request.
pub async fn player_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerStats>>, ApiError> {
    let snapshot = state.store.read().await.snapshot()?;
    Ok(Json(compute_player_stats(
        &snapshot.players,
        &snapshot.scores,
    )))
}

/// Per-game popularity statistics.
pub async fn game_stats(State(state): State<AppState>) -> Result<Json<Vec<GameStats>>, ApiError> {
    let snapshot = state.store.read().await.snapshot()?;
    Ok(Json(compute_game_stats(&snapshot.scores)))
}
