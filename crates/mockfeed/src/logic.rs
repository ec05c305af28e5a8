use crate::dataset::{Dataset, NormalizedDataset, Snapshot};
use crate::overlay::ReactionOverlay;
use feed_core::{
    Author, ClearReactionsInput, FeedError, GetFeedInput, GetFeedResponse, Post,
    ReactToPostInput, ReactToPostResponse, Source, SuccessResponse, Validate,
};

/// フィード API の本体。データセットとリアクションのオーバーレイを所有する。
pub struct FeedService {
    dataset: Dataset,
    overlay: ReactionOverlay,
}

impl FeedService {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            dataset: Dataset::new(snapshot),
            overlay: ReactionOverlay::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn overlay(&self) -> &ReactionOverlay {
        &self.overlay
    }

    /// カーソル位置から `limit` 件を返す
    pub fn get_feed(&self, input: &GetFeedInput) -> Result<GetFeedResponse, FeedError> {
        let limit = input.resolved_limit()?;
        let data = self.dataset.ensure_initialized()?;

        let start = start_index(&data, input.cursor());
        let end = (start + limit).min(data.len());

        let posts = data.posts[start..end]
            .iter()
            .map(|post| self.with_reactions(post))
            .collect::<Result<Vec<_>, _>>()?;

        let has_more = start + limit < data.len();
        let next_cursor = if has_more {
            posts.last().map(|p| p.id.clone())
        } else {
            None
        };

        tracing::info!(
            "Returning feed with {} posts (cursor={:?}, limit={}, next={:?})",
            posts.len(),
            input.cursor(),
            limit,
            next_cursor
        );

        let response = GetFeedResponse {
            posts,
            next_cursor,
            has_more,
        };
        response.validate()?;
        Ok(response)
    }

    pub fn get_post_by_id(&self, id: &str) -> Result<Post, FeedError> {
        require_id("id", id)?;
        let data = self.dataset.ensure_initialized()?;
        let post = data.post(id).ok_or_else(post_not_found)?;

        let post = self.with_reactions(post)?;
        post.validate()?;
        Ok(post)
    }

    /// リアクションをトグルし、トグル後の 6 種類ぶんの状態を返す
    pub fn react_to_post(
        &self,
        input: &ReactToPostInput,
    ) -> Result<ReactToPostResponse, FeedError> {
        require_id("postId", &input.post_id)?;
        let data = self.dataset.ensure_initialized()?;
        let post = data.post(&input.post_id).ok_or_else(post_not_found)?;

        let reactions = self
            .overlay
            .toggle(&post.id, input.reaction_type, &post.reactions)?;

        tracing::info!(
            "Toggled {} on {}",
            input.reaction_type.as_str(),
            input.post_id
        );

        let response = ReactToPostResponse {
            success: true,
            reactions,
        };
        response.validate()?;
        Ok(response)
    }

    pub fn clear_reactions(
        &self,
        input: &ClearReactionsInput,
    ) -> Result<SuccessResponse, FeedError> {
        let post_id = input.post_id();
        self.overlay.clear(post_id)?;
        tracing::info!("Cleared reactions ({})", post_id.unwrap_or("all posts"));
        Ok(SuccessResponse { success: true })
    }

    pub fn get_authors(&self) -> Result<Vec<Author>, FeedError> {
        let data = self.dataset.ensure_initialized()?;
        let authors = data.authors.clone();
        authors.validate()?;
        Ok(authors)
    }

    pub fn get_sources(&self) -> Result<Vec<Source>, FeedError> {
        let data = self.dataset.ensure_initialized()?;
        let sources = data.sources.clone();
        sources.validate()?;
        Ok(sources)
    }

    /// 計算済みのオフセット（ミリ秒）。未計算なら `None`
    pub fn timestamp_offset(&self) -> Result<Option<i64>, FeedError> {
        self.dataset.normalizer().offset()
    }

    /// オーバーレイにあればそちらのリアクションで上書きする
    fn with_reactions(&self, post: &Post) -> Result<Post, FeedError> {
        let mut merged = post.clone();
        if let Some(reactions) = self.overlay.get(&post.id)? {
            merged.reactions = reactions;
        }
        Ok(merged)
    }
}

/// カーソルの次の位置。カーソルなし・該当なしは先頭から
fn start_index(data: &NormalizedDataset, cursor: Option<&str>) -> usize {
    let Some(cursor) = cursor else {
        return 0;
    };
    match data.position(cursor) {
        Some(i) => i + 1,
        None => {
            tracing::warn!("Unknown cursor {:?}, starting from the top", cursor);
            0
        }
    }
}

fn require_id(field: &str, value: &str) -> Result<(), FeedError> {
    if value.is_empty() {
        return Err(FeedError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn post_not_found() -> FeedError {
    FeedError::NotFound("Post not found".to_string())
}
