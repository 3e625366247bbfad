use std::sync::Arc;

use tokio::sync::RwLock;

use crate::storage::Store;
use crate::thumbs::ThumbnailFetcher;

/// Shared handler state.
///
/// Store mutations are file-level read-modify-write, so the store sits
/// behind an `RwLock`: writers hold the guard across the whole rewrite,
/// readers share.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub thumbs: Arc<ThumbnailFetcher>,
}
