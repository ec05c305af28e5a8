use super::fixtures;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sports_feed_mock::{
    app, build_state,
    state::{AppConfig, SharedState},
};
use tower::ServiceExt; // for oneshot

pub struct TestClient {
    pub router: Router,
    pub state: SharedState,
}

impl TestClient {
    /// 埋め込みのモックデータで起動する
    pub async fn new() -> Self {
        Self::from_config(AppConfig::default())
    }

    /// `p1`〜`pN` の固定データで起動する
    pub async fn with_posts(n: usize) -> Self {
        // build_state の中で読み込みが終わる
        let (_dir, path) = fixtures::write_snapshot(&fixtures::snapshot_json(n));
        Self::from_config(AppConfig {
            mock_data_path: Some(path),
            ..AppConfig::default()
        })
    }

    pub fn from_config(config: AppConfig) -> Self {
        let state = build_state(config).expect("Failed to build state");
        let router = app(state.clone());
        Self { router, state }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body_json: serde_json::Value = if body_bytes.is_empty() {
            serde_json::json!(null)
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or_else(
                |_| serde_json::json!({ "raw": String::from_utf8_lossy(&body_bytes) }),
            )
        };

        (status, body_json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        payload: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(payload).unwrap()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn get_feed(
        &self,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> (StatusCode, serde_json::Value) {
        let mut params = Vec::new();
        if let Some(cursor) = cursor {
            params.push(format!("cursor={}", cursor));
        }
        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }
        self.get(&format!("/api/feed.getFeed?{}", params.join("&"))).await
    }

    pub async fn react(
        &self,
        post_id: &str,
        reaction_type: &str,
    ) -> (StatusCode, serde_json::Value) {
        self.post_json(
            "/api/feed.reactToPost",
            &serde_json::json!({ "postId": post_id, "reactionType": reaction_type }),
        )
        .await
    }

    pub async fn get_health(&self) -> (StatusCode, String) {
        let request = Request::builder()
            .uri("/health")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }
}
