//! # BoardTally
//!
//! A self-hosted board-game score tracker for a fixed play group.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, play records, derived stats)
//! - **stats**: Pure aggregation engine (performance and popularity folds)
//! - **storage**: JSONL document stores and snapshot assembly
//! - **thumbs**: Best-effort game thumbnail fetch-and-cache
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod stats;
pub mod storage;
pub mod thumbs;

pub use models::*;
