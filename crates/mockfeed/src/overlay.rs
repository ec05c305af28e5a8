//! リアクション状態のオーバーレイ（プロセス内キャッシュ）
//!
//! キー: 投稿 ID / 値: その投稿のリアクション 6 種類ぶんの最新状態
//!
//! - 値があればデータセットの初期値より優先される
//! - 最初のトグルでエントリが作られ、clear で 1 件または全件を消す
//! - 全ユーザーで共有される（セッションごとには分けない）

use feed_core::{FeedError, ReactionKind, ReactionMap};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct ReactionOverlay {
    entries: RwLock<HashMap<String, ReactionMap>>,
}

impl ReactionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // 内部ヘルパー
    // -----------------------------------------------------------------------

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, ReactionMap>>, FeedError> {
        self.entries
            .read()
            .map_err(|_| FeedError::Internal("reaction overlay lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, ReactionMap>>, FeedError> {
        self.entries
            .write()
            .map_err(|_| FeedError::Internal("reaction overlay lock poisoned".to_string()))
    }

    // -----------------------------------------------------------------------
    // 公開 API
    // -----------------------------------------------------------------------

    pub fn get(&self, post_id: &str) -> Result<Option<ReactionMap>, FeedError> {
        Ok(self.read()?.get(post_id).cloned())
    }

    /// 現在の状態（なければ `baseline`）の `kind` だけを反転させて保存し、保存後の状態を返す。
    ///
    /// 読み取りから書き込みまで 1 つの書き込みロック内で行う。
    pub fn toggle(
        &self,
        post_id: &str,
        kind: ReactionKind,
        baseline: &ReactionMap,
    ) -> Result<ReactionMap, FeedError> {
        let mut entries = self.write()?;
        let reactions = entries
            .entry(post_id.to_string())
            .or_insert_with(|| baseline.clone());
        reactions.toggle(kind);

        let updated = reactions.get(kind);
        tracing::debug!(
            "[overlay] {} {} -> count={} userReacted={}",
            post_id,
            kind.as_str(),
            updated.count,
            updated.user_reacted
        );

        Ok(reactions.clone())
    }

    /// `Some(id)` ならその投稿だけ、`None` なら全件を消す
    pub fn clear(&self, post_id: Option<&str>) -> Result<(), FeedError> {
        let mut entries = self.write()?;
        match post_id {
            Some(id) => {
                let removed = entries.remove(id).is_some();
                tracing::debug!("[overlay] Cleared {} (had entry: {})", id, removed);
            }
            None => {
                let count = entries.len();
                entries.clear();
                tracing::debug!("[overlay] Cleared all {} entries", count);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize, FeedError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, FeedError> {
        Ok(self.len()? == 0)
    }
}
