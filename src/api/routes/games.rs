use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Player, Score};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopWinner {
    pub player: Player,
    pub wins: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailResponse {
    pub game_id: u32,
    pub game_name: String,
    pub times_played: u32,
    pub first_played: NaiveDate,
    pub last_played: NaiveDate,
    pub top_winners: Vec<TopWinner>,
    pub plays: Vec<Score>,
}

/// Detail view for one game: play history and its most frequent winners.
pub async fn game_detail(
    State(state): State<AppState>,
    Path(game_id): Path<u32>,
) -> Result<Json<GameDetailResponse>, ApiError> {
    let snapshot = state.store.read().await.snapshot()?;

    // Snapshot scores are date-descending, so the first match is the most
    // recent play.
    let plays: Vec<Score> = snapshot
        .scores
        .into_iter()
        .filter(|s| s.game_id == game_id)
        .collect();

    let Some(most_recent) = plays.first() else {
        return Err(ApiError::NotFound(format!(
            "No plays recorded for game {}",
            game_id
        )));
    };

    // Win counts per player, first-win order preserved for stable ties.
    let mut win_counts: Vec<(&str, u32)> = Vec::new();
    for play in &plays {
        for result in &play.players {
            if !result.is_winner {
                continue;
            }
            match win_counts
                .iter_mut()
                .find(|(id, _)| *id == result.player_id.as_str())
            {
                Some((_, wins)) => *wins += 1,
                None => win_counts.push((result.player_id.as_str(), 1)),
            }
        }
    }
    win_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let top_winners: Vec<TopWinner> = win_counts
        .iter()
        .filter_map(|(id, wins)| {
            snapshot
                .players
                .iter()
                .find(|p| p.id.as_str() == *id)
                .map(|p| TopWinner {
                    player: p.clone(),
                    wins: *wins,
                })
        })
        .take(5)
        .collect();

    let response = GameDetailResponse {
        game_id,
        game_name: most_recent.game_name.clone(),
        times_played: plays.len() as u32,
        first_played: plays[plays.len() - 1].date,
        last_played: most_recent.date,
        top_winners,
        plays,
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    pub game_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ThumbnailResponse {
    pub path: String,
    pub cached: bool,
}

/// Fetch-and-cache a game's cover image. Best effort: upstream failures
/// surface as a gateway error, never as stored state.
pub async fn fetch_thumbnail(
    State(state): State<AppState>,
    Path(game_id): Path<u32>,
    payload: Option<Json<ThumbnailRequest>>,
) -> Result<Json<ThumbnailResponse>, ApiError> {
    let game_name = match payload.and_then(|Json(req)| req.game_name) {
        Some(name) => name,
        None => state
            .store
            .read()
            .await
            .list_scores()
            .ok()
            .and_then(|scores| {
                scores
                    .into_iter()
                    .find(|s| s.game_id == game_id)
                    .map(|s| s.game_name)
            })
            .unwrap_or_else(|| "Unknown".to_string()),
    };

    let result = state
        .thumbs
        .ensure_thumbnail(game_id, &game_name)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(ThumbnailResponse {
        path: result.path.to_string_lossy().into_owned(),
        cached: result.cached,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::routes::test_util::{get_json, post_json, test_state};
    use crate::api::build_router;
    use crate::models::{Player, PlayerResult, Score};
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use serde_json::json;

    fn result(player_id: &str, is_winner: bool) -> PlayerResult {
        PlayerResult {
            player_id: player_id.into(),
            score: None,
            is_winner,
        }
    }

    fn play(date: &str, game_id: u32, name: &str, players: Vec<PlayerResult>) -> Score {
        Score::new(
            date.parse::<NaiveDate>().unwrap(),
            game_id,
            name.to_string(),
            players,
        )
    }

    #[tokio::test]
    async fn test_game_detail() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let ann = Player {
            id: "p1".into(),
            name: "Ann".to_string(),
            color: "#111".to_string(),
        };
        let bo = Player {
            id: "p2".into(),
            name: "Bo".to_string(),
            color: "#222".to_string(),
        };
        {
            let store = state.store.write().await;
            store.add_player(&ann).unwrap();
            store.add_player(&bo).unwrap();
        }

        for (date, winner) in [
            ("2024-01-01", "p1"),
            ("2024-02-01", "p2"),
            ("2024-03-01", "p2"),
        ] {
            state
                .store
                .write()
                .await
                .add_score(&play(
                    date,
                    13,
                    "Catan",
                    vec![result("p1", winner == "p1"), result("p2", winner == "p2")],
                ))
                .unwrap();
        }
        // Noise from another game.
        state
            .store
            .write()
            .await
            .add_score(&play("2024-01-15", 30, "Azul", vec![result("p1", true)]))
            .unwrap();

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/games/13").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["gameName"], "Catan");
        assert_eq!(json["timesPlayed"], 3);
        assert_eq!(json["firstPlayed"], "2024-01-01");
        assert_eq!(json["lastPlayed"], "2024-03-01");
        assert_eq!(json["topWinners"][0]["player"]["name"], "Bo");
        assert_eq!(json["topWinners"][0]["wins"], 2);
        assert_eq!(json["topWinners"][1]["wins"], 1);
        assert_eq!(json["plays"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_game_detail_ignores_unknown_winners() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        state
            .store
            .write()
            .await
            .add_score(&play("2024-01-01", 13, "Catan", vec![result("ghost", true)]))
            .unwrap();

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/games/13").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["topWinners"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_game_detail_unknown_game_404() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/games/999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_thumbnail_cached_image_served() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());

        let images_dir = tmp.path().join("game-images");
        std::fs::create_dir_all(&images_dir).unwrap();
        std::fs::write(images_dir.join("13.jpg"), b"jpeg-bytes").unwrap();

        let app = build_router(state);
        let (status, json) = post_json(
            app,
            "/api/games/13/thumbnail",
            json!({"gameName": "Catan"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cached"], true);
        assert!(json["path"].as_str().unwrap().ends_with("13.jpg"));
    }

    #[tokio::test]
    async fn test_thumbnail_upstream_failure_is_bad_gateway() {
        let tmp = tempfile::tempdir().unwrap();
        // test_state points the fetcher at an unroutable address, so an
        // uncached game fails upstream.
        let state = test_state(tmp.path());

        let app = build_router(state);
        let (status, json) = post_json(
            app,
            "/api/games/99/thumbnail",
            json!({"gameName": "Azul"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
    }
}
