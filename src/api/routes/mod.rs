pub mod games;
pub mod players;
pub mod scores;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tokio::sync::RwLock;
    use tower::util::ServiceExt;

    use crate::api::state::AppState;
    use crate::storage::{Store, StorageConfig};
    use crate::thumbs::{ThumbnailConfig, ThumbnailFetcher};

    pub fn test_state(dir: &std::path::Path) -> AppState {
        let config = StorageConfig::new(dir.to_path_buf());
        let thumbs = ThumbnailFetcher::new(ThumbnailConfig {
            images_dir: config.images_dir(),
            // Unroutable: API tests must never hit the network.
            base_url: "http://127.0.0.1:1/boardgame".to_string(),
            ..Default::default()
        })
        .unwrap();

        AppState {
            store: Arc::new(RwLock::new(Store::new(&config))),
            thumbs: Arc::new(thumbs),
        }
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        send(
            app,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn put_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(app: axum::Router, uri: &str) -> StatusCode {
        let (status, _) = send(
            app,
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        status
    }
}
