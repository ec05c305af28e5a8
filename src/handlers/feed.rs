use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use feed_core::{
    Author, GetFeedInput, GetFeedResponse, GetPostByIdInput, Post, Source,
    TimestampOffsetResponse,
};

pub async fn get_feed(
    State(state): State<SharedState>,
    query: Result<Query<GetFeedInput>, QueryRejection>,
) -> Result<Json<GetFeedResponse>, AppError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!(
        "Received feed request (cursor={:?}, limit={:?})",
        params.cursor,
        params.limit
    );

    let response = state.feed.get_feed(&params)?;
    Ok(Json(response))
}

pub async fn get_post_by_id(
    State(state): State<SharedState>,
    query: Result<Query<GetPostByIdInput>, QueryRejection>,
) -> Result<Json<Post>, AppError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::info!("Received post request: {}", params.id);

    let post = state.feed.get_post_by_id(&params.id)?;
    Ok(Json(post))
}

pub async fn get_authors(State(state): State<SharedState>) -> Result<Json<Vec<Author>>, AppError> {
    Ok(Json(state.feed.get_authors()?))
}

pub async fn get_sources(State(state): State<SharedState>) -> Result<Json<Vec<Source>>, AppError> {
    Ok(Json(state.feed.get_sources()?))
}

/// デバッグ用: 計算済みの時刻オフセット
pub async fn get_timestamp_offset(
    State(state): State<SharedState>,
) -> Result<Json<TimestampOffsetResponse>, AppError> {
    Ok(Json(TimestampOffsetResponse {
        offset_ms: state.feed.timestamp_offset()?,
    }))
}
