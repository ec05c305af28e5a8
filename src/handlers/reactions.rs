use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use feed_core::{ClearReactionsInput, ReactToPostInput, ReactToPostResponse, SuccessResponse};

pub async fn react_to_post(
    State(state): State<SharedState>,
    payload: Result<Json<ReactToPostInput>, JsonRejection>,
) -> Result<Json<ReactToPostResponse>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::info!(
        "Received reaction: {} on {}",
        input.reaction_type.as_str(),
        input.post_id
    );

    let response = state.feed.react_to_post(&input)?;
    Ok(Json(response))
}

/// ボディなし（または `{}`）なら全件クリア
pub async fn clear_reactions(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let input: ClearReactionsInput = if body.iter().all(u8::is_ascii_whitespace) {
        ClearReactionsInput::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?
    };

    let response = state.feed.clear_reactions(&input)?;
    Ok(Json(response))
}
