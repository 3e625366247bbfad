use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::models::{Expansion, PlayerResult, Score};

#[derive(Debug, Deserialize)]
pub struct ListScoresParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ScoreListResponse {
    pub scores: Vec<Score>,
    pub pagination: PaginationMeta,
}

/// Wire shape for creating or replacing a play record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    pub date: NaiveDate,
    pub game_id: u32,
    pub game_name: String,
    #[serde(default)]
    pub expansions: Vec<Expansion>,
    pub players: Vec<PlayerResult>,
}

impl ScorePayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.game_name.trim().is_empty() {
            return Err(ApiError::BadRequest("Game name must not be empty".into()));
        }
        if self.players.is_empty() {
            return Err(ApiError::BadRequest(
                "A score needs at least one player result".into(),
            ));
        }
        if !self.players.iter().any(|p| p.is_winner) {
            return Err(ApiError::BadRequest(
                "A score needs at least one winner".into(),
            ));
        }
        Ok(())
    }
}

pub async fn list_scores(
    State(state): State<AppState>,
    Query(params): Query<ListScoresParams>,
) -> Result<Json<ScoreListResponse>, ApiError> {
    let scores = state.store.read().await.list_scores()?;

    let pagination = Pagination::new(params.page, params.page_size);
    let meta = PaginationMeta::new(&pagination, scores.len() as u32);

    let start = pagination.offset() as usize;
    let end = (start + pagination.page_size as usize).min(scores.len());
    let page = if start < scores.len() {
        scores[start..end].to_vec()
    } else {
        Vec::new()
    };

    Ok(Json(ScoreListResponse {
        scores: page,
        pagination: meta,
    }))
}

pub async fn create_score(
    State(state): State<AppState>,
    Json(payload): Json<ScorePayload>,
) -> Result<(StatusCode, Json<Score>), ApiError> {
    payload.validate()?;

    let score = Score::new(
        payload.date,
        payload.game_id,
        payload.game_name,
        payload.players,
    )
    .with_expansions(payload.expansions);
    state.store.write().await.add_score(&score)?;
    Ok((StatusCode::CREATED, Json(score)))
}

pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ScorePayload>,
) -> Result<Json<Score>, ApiError> {
    payload.validate()?;

    let score = Score {
        id: id.into(),
        date: payload.date,
        game_id: payload.game_id,
        game_name: payload.game_name,
        expansions: payload.expansions,
        players: payload.players,
    };
    state.store.write().await.update_score(&score)?;
    Ok(Json(score))
}

pub async fn delete_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.delete_score(&id.into())?;
    Ok(StatusCode::NO_CONTENT)
}
