//! スナップショットの読み込みと、時刻をずらした正規化データセット
//!
//! - スナップショット: 起動時に 1 度だけ読み込む読み取り専用データ（authors / sources / posts / imageUrls）
//! - 正規化データセット: 初回アクセス時に全投稿の `createdAt` をずらしたコピー。以降は使い回す

use crate::timestamp::TimestampNormalizer;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use feed_core::validate::require_url;
use feed_core::{Author, FeedError, Post, Source, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

const EMBEDDED_SNAPSHOT: &str = include_str!("../data/mock-data.json");

// ---------------------------------------------------------------------------
// スナップショット
// ---------------------------------------------------------------------------

/// 生成済みの画像 URL 一覧
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCatalog {
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub leagues: Vec<String>,
    #[serde(default)]
    pub posts: Vec<String>,
}

impl ImageCatalog {
    fn check(&self) -> Result<(), ValidationError> {
        let groups = [
            ("persons", &self.persons),
            ("teams", &self.teams),
            ("leagues", &self.leagues),
            ("posts", &self.posts),
        ];
        for (name, urls) in groups {
            for (i, raw) in urls.iter().enumerate() {
                require_url(&format!("imageUrls.{}[{}]", name, i), raw)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.persons.len() + self.teams.len() + self.leagues.len() + self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub authors: Vec<Author>,
    pub sources: Vec<Source>,
    pub posts: Vec<Post>,
    #[serde(default)]
    pub image_urls: ImageCatalog,
}

impl Snapshot {
    /// バイナリに埋め込んだモックデータ
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_SNAPSHOT).context("Failed to load embedded mock data")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mock data from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid mock data in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(raw).context("Failed to parse mock data JSON")?;
        snapshot.check().context("Mock data failed validation")?;
        Ok(snapshot)
    }

    /// ID の重複・URL 形式・リアクションの型をまとめて確認する
    pub fn check(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for (i, post) in self.posts.iter().enumerate() {
            if !seen.insert(post.id.as_str()) {
                return Err(ValidationError::new(
                    format!("posts[{}].id", i),
                    format!("duplicate post id {:?}", post.id),
                ));
            }
        }

        self.authors.validate().map_err(|e| e.within("authors"))?;
        self.sources.validate().map_err(|e| e.within("sources"))?;
        self.posts.validate().map_err(|e| e.within("posts"))?;
        self.image_urls.check()
    }

    /// 最も新しい投稿（同時刻なら先に出てきた方）
    pub fn most_recent_post(&self) -> Option<&Post> {
        self.posts.iter().fold(None::<&Post>, |latest, post| match latest {
            Some(current) if current.created_at >= post.created_at => Some(current),
            _ => Some(post),
        })
    }
}

// ---------------------------------------------------------------------------
// 正規化データセット
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    pub authors: Vec<Author>,
    pub sources: Vec<Source>,
    pub posts: Vec<Post>,
    pub image_urls: ImageCatalog,
    positions: HashMap<String, usize>,
}

impl NormalizedDataset {
    fn build(snapshot: &Snapshot, normalizer: &TimestampNormalizer) -> Result<Self, FeedError> {
        let posts = snapshot
            .posts
            .iter()
            .map(|post| {
                Ok(Post {
                    created_at: normalizer.apply(post.created_at)?,
                    ..post.clone()
                })
            })
            .collect::<Result<Vec<Post>, FeedError>>()?;

        let positions = posts
            .iter()
            .enumerate()
            .map(|(i, post)| (post.id.clone(), i))
            .collect();

        Ok(Self {
            authors: snapshot.authors.clone(),
            sources: snapshot.sources.clone(),
            posts,
            image_urls: snapshot.image_urls.clone(),
            positions,
        })
    }

    /// フィード順での位置
    pub fn position(&self, post_id: &str) -> Option<usize> {
        self.positions.get(post_id).copied()
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.position(post_id).map(|i| &self.posts[i])
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

enum InitState {
    Uninitialized,
    Ready(Arc<NormalizedDataset>),
}

/// スナップショットと、その正規化結果の遅延キャッシュ
pub struct Dataset {
    snapshot: Snapshot,
    normalizer: TimestampNormalizer,
    state: Mutex<InitState>,
}

impl Dataset {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            normalizer: TimestampNormalizer::new(),
            state: Mutex::new(InitState::Uninitialized),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn normalizer(&self) -> &TimestampNormalizer {
        &self.normalizer
    }

    pub fn ensure_initialized(&self) -> Result<Arc<NormalizedDataset>, FeedError> {
        self.ensure_initialized_at(Local::now())
    }

    /// 初回だけオフセットを計算して正規化する。ロックで 1 回に限定する。
    pub fn ensure_initialized_at<Tz: TimeZone>(
        &self,
        now: DateTime<Tz>,
    ) -> Result<Arc<NormalizedDataset>, FeedError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| FeedError::Internal("dataset lock poisoned".to_string()))?;

        if let InitState::Ready(dataset) = &*state {
            return Ok(Arc::clone(dataset));
        }

        match self.snapshot.most_recent_post() {
            Some(latest) => {
                self.normalizer.compute_offset_at(latest.created_at, now)?;
            }
            None => tracing::warn!("Mock data has no posts; timestamps left as-is"),
        }

        let dataset = Arc::new(NormalizedDataset::build(&self.snapshot, &self.normalizer)?);
        tracing::info!(
            "Dataset initialized: {} posts, {} authors, {} sources, {} image urls",
            dataset.posts.len(),
            dataset.authors.len(),
            dataset.sources.len(),
            dataset.image_urls.len()
        );

        *state = InitState::Ready(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// テスト用: 未初期化状態に戻す（オフセットも破棄する）
    pub fn reset(&self) -> Result<(), FeedError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| FeedError::Internal("dataset lock poisoned".to_string()))?;
        *state = InitState::Uninitialized;
        self.normalizer.reset()?;
        Ok(())
    }
}
