pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::{AppConfig, AppState, SharedState};
use tower_http::trace::TraceLayer;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/feed.getFeed", get(handlers::get_feed))
        .route("/api/feed.getPostById", get(handlers::get_post_by_id))
        .route("/api/feed.getAuthors", get(handlers::get_authors))
        .route("/api/feed.getSources", get(handlers::get_sources))
        .route(
            "/api/feed.getTimestampOffset",
            get(handlers::get_timestamp_offset),
        )
        .route("/api/feed.reactToPost", post(handlers::react_to_post))
        .route("/api/feed.clearReactions", post(handlers::clear_reactions))
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                // In production, specific origin should be used
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}

/// 設定に従ってモックデータを読み込み、状態を組み立てる
pub fn build_state(config: AppConfig) -> anyhow::Result<SharedState> {
    let feed = mockfeed::load_service(config.mock_data_path.as_deref())?;
    Ok(AppState::new(config, feed))
}
