//! Statistics aggregation engine.
//!
//! Pure folds over an immutable snapshot of the player and score
//! collections, producing:
//! - per-player performance statistics (win ratio, expected wins,
//!   luck-adjusted performance score, form guide)
//! - per-game popularity statistics (times played, recency)
//!
//! Both functions are total and idempotent: no I/O, no caching, no state
//! across calls. The owning layer re-invokes them with a fresh snapshot
//! whenever the underlying collections change.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{GameStats, Outcome, Player, PlayerStats, Score};

/// Maximum number of outcomes kept in a player's form guide.
pub const FORM_GUIDE_LEN: usize = 10;

#[derive(Debug, Clone, Default)]
struct PlayerAcc {
    games_played: u32,
    wins: u32,
    expected_wins: f64,
    last_played: Option<NaiveDate>,
    form: Vec<Outcome>,
}

/// Compute per-player performance statistics.
///
/// `scores` must already be sorted by date descending (ties keep their
/// stored order); this function never re-sorts it. The form guide relies
/// on that ordering: outcomes are appended in fold order, so the sequence is
/// naturally most-recent-first.
///
/// Returns exactly one entry per input player, including players with no
/// recorded games. Results referencing an unknown player ID are silently
/// ignored.
pub fn compute_player_stats(players: &[Player], scores: &[Score]) -> Vec<PlayerStats> {
    let mut acc: HashMap<&str, PlayerAcc> = players
        .iter()
        .map(|p| (p.id.as_str(), PlayerAcc::default()))
        .collect();

    for record in scores {
        let n = record.players.len();
        if n == 0 {
            continue;
        }
        let expected_chance = 1.0 / n as f64;

        for result in &record.players {
            let Some(stats) = acc.get_mut(result.player_id.as_str()) else {
                continue;
            };
            stats.games_played += 1;
            stats.expected_wins += expected_chance;
            if result.is_winner {
                stats.wins += 1;
            }
            if stats.last_played.map_or(true, |d| record.date > d) {
                stats.last_played = Some(record.date);
            }
            if stats.form.len() < FORM_GUIDE_LEN {
                stats.form.push(if result.is_winner {
                    Outcome::W
                } else {
                    Outcome::L
                });
            }
        }
    }

    let mut out: Vec<PlayerStats> = players
        .iter()
        .map(|player| {
            let stats = acc.get(player.id.as_str()).cloned().unwrap_or_default();
            let win_ratio = if stats.games_played > 0 {
                f64::from(stats.wins) / f64::from(stats.games_played)
            } else {
                0.0
            };
            let performance_score = if stats.expected_wins > 0.0 {
                (f64::from(stats.wins) / stats.expected_wins) * 100.0
            } else {
                0.0
            };

            PlayerStats {
                player: player.clone(),
                games_played: stats.games_played,
                wins: stats.wins,
                win_ratio,
                expected_wins: stats.expected_wins,
                performance_score,
                last_played: stats.last_played,
                form: stats.form,
            }
        })
        .collect();

    // Active players first, ranked by performance then volume; players with
    // no games trail, alphabetically ignoring case. The sort is stable, so
    // any remaining ties keep player-set encounter order.
    out.sort_by(|a, b| match (a.games_played > 0, b.games_played > 0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => b
            .performance_score
            .total_cmp(&a.performance_score)
            .then_with(|| b.games_played.cmp(&a.games_played)),
        (false, false) => a
            .player
            .name
            .to_lowercase()
            .cmp(&b.player.name.to_lowercase()),
    });

    out
}

#[derive(Debug)]
struct GameAcc {
    game_id: u32,
    game_name: String,
    times_played: u32,
    last_played: NaiveDate,
}

/// Compute per-game popularity statistics, with "now" taken as the moment
/// of the call.
pub fn compute_game_stats(scores: &[Score]) -> Vec<GameStats> {
    compute_game_stats_at(scores, Utc::now())
}

/// Compute per-game popularity statistics against an explicit "now".
///
/// Records are folded in the given order. The game name is fixed at first
/// encounter, so with date-descending input it reflects the most recently
/// played record. `days_ago` is the floored real-valued day difference
/// between `now` and the last-played date at midnight UTC: it increments at
/// 24h boundaries from the moment of computation, not at local midnight.
pub fn compute_game_stats_at(scores: &[Score], now: DateTime<Utc>) -> Vec<GameStats> {
    let mut games: Vec<GameAcc> = Vec::new();

    for record in scores {
        match games.iter_mut().find(|g| g.game_id == record.game_id) {
            Some(game) => {
                game.times_played += 1;
                if record.date > game.last_played {
                    game.last_played = record.date;
                }
            }
            None => games.push(GameAcc {
                game_id: record.game_id,
                game_name: record.game_name.clone(),
                times_played: 1,
                last_played: record.date,
            }),
        }
    }

    let mut out: Vec<GameStats> = games
        .into_iter()
        .map(|game| GameStats {
            game_id: game.game_id,
            game_name: game.game_name,
            times_played: game.times_played,
            last_played: game.last_played,
            days_ago: days_since(game.last_played, now),
        })
        .collect();

    // Stable: equal play counts keep first-encountered-in-fold-order.
    out.sort_by(|a, b| b.times_played.cmp(&a.times_played));

    out
}

/// Floored whole-day difference between `now` and `date` at midnight UTC.
fn days_since(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    (now - midnight).num_seconds().div_euclid(86_400)
}
