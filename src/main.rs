use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use board_tally::api::state::AppState;
use board_tally::config::AppConfig;
use board_tally::models::{Player, Score};
use board_tally::stats::{compute_game_stats, compute_player_stats};
use board_tally::storage::{StorageConfig, Store};
use board_tally::thumbs::{ThumbnailConfig, ThumbnailFetcher};

#[derive(Parser)]
#[command(name = "board-tally")]
#[command(about = "Self-hosted board-game score tracker")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Import players and scores from JSON exports
    Seed {
        /// Path to a JSON array of players
        #[arg(long)]
        players: Option<String>,

        /// Path to a JSON array of scores
        #[arg(long)]
        scores: Option<String>,

        /// Replace existing collections instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Print player and game statistics
    Stats {
        /// Output as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Fetch and cache thumbnails for every game in the store
    FetchThumbnails {
        /// Re-fetch even when a cached image exists
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting board-tally v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    let storage = StorageConfig::new(config.data_dir.clone());
    let store = Store::new(&storage);

    match cli.command {
        Commands::Serve { host, port } => {
            let thumbs = ThumbnailFetcher::new(ThumbnailConfig {
                images_dir: storage.images_dir(),
                base_url: config.thumbnails.base_url.clone(),
                timeout: Duration::from_secs(config.thumbnails.timeout_seconds),
                user_agent: config.thumbnails.user_agent.clone(),
            })?;

            let state = AppState {
                store: Arc::new(tokio::sync::RwLock::new(store)),
                thumbs: Arc::new(thumbs),
            };

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);

            let app = board_tally::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::Seed {
            players,
            scores,
            replace,
        } => {
            let seed_players: Vec<Player> = match players {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
                None => Vec::new(),
            };
            let seed_scores: Vec<Score> = match scores {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
                None => Vec::new(),
            };

            if replace {
                store.replace_all(&seed_players, &seed_scores)?;
            } else {
                for player in &seed_players {
                    store.add_player(player)?;
                }
                for score in &seed_scores {
                    store.add_score(score)?;
                }
            }

            println!(
                "Imported {} players and {} scores{}",
                seed_players.len(),
                seed_scores.len(),
                if replace { " (replaced)" } else { "" }
            );
        }

        Commands::Stats { json } => {
            let snapshot = store.snapshot()?;
            let player_stats = compute_player_stats(&snapshot.players, &snapshot.scores);
            let game_stats = compute_game_stats(&snapshot.scores);

            if json {
                let out = serde_json::json!({
                    "playerStats": player_stats,
                    "gameStats": game_stats,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("=== Players ===");
                println!(
                    "{:<16} {:>6} {:>6} {:>7} {:>8} {:>12} form",
                    "name", "games", "wins", "ratio", "expected", "performance"
                );
                for s in &player_stats {
                    let form: String = s.form.iter().map(|o| o.to_string()).collect();
                    println!(
                        "{:<16} {:>6} {:>6} {:>7.2} {:>8.2} {:>12.1} {}",
                        s.player.name,
                        s.games_played,
                        s.wins,
                        s.win_ratio,
                        s.expected_wins,
                        s.performance_score,
                        form
                    );
                }

                println!("\n=== Games ===");
                println!(
                    "{:<28} {:>6} {:>12} {:>9}",
                    "game", "plays", "last played", "days ago"
                );
                for g in &game_stats {
                    println!(
                        "{:<28} {:>6} {:>12} {:>9}",
                        g.game_name, g.times_played, g.last_played, g.days_ago
                    );
                }
            }
        }

        Commands::FetchThumbnails { force } => {
            let thumbs = ThumbnailFetcher::new(ThumbnailConfig {
                images_dir: storage.images_dir(),
                base_url: config.thumbnails.base_url.clone(),
                timeout: Duration::from_secs(config.thumbnails.timeout_seconds),
                user_agent: config.thumbnails.user_agent.clone(),
            })?;

            // Date-descending order, so the first record per game carries
            // its most recent name.
            let mut seen = Vec::new();
            let mut fetched = 0u32;
            let mut failed = 0u32;
            for score in store.list_scores()? {
                if seen.contains(&score.game_id) {
                    continue;
                }
                seen.push(score.game_id);

                if force {
                    let path = thumbs.image_path(score.game_id);
                    if path.exists() {
                        std::fs::remove_file(&path)?;
                    }
                }

                match thumbs.ensure_thumbnail(score.game_id, &score.game_name).await {
                    Ok(result) if result.cached => {
                        tracing::debug!("{} already cached", score.game_name);
                    }
                    Ok(_) => fetched += 1,
                    Err(e) => {
                        tracing::warn!("Failed to fetch {}: {}", score.game_name, e);
                        failed += 1;
                    }
                }
            }

            println!(
                "Fetched {} thumbnails ({} games, {} failures)",
                fetched,
                seen.len(),
                failed
            );
        }
    }

    Ok(())
}
