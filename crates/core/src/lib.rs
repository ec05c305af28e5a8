pub mod error;
pub mod validate;

pub use error::{FeedError, ValidationError};
pub use validate::Validate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 1 ページあたりの取得件数
pub const DEFAULT_LIMIT: usize = 10;
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 50;

/// リアクションの種類（固定の 6 種類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Laugh,
    Angry,
    Sad,
    Wow,
}

impl ReactionKind {
    /// Canonical iteration order, also the wire order of `ReactionMap`.
    pub const ALL: [ReactionKind; 6] = [
        Self::Like,
        Self::Love,
        Self::Laugh,
        Self::Angry,
        Self::Sad,
        Self::Wow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Wow => "wow",
        }
    }
}

/// 1 種類分のリアクション状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(rename = "type")]
    pub kind: ReactionKind,
    pub count: u64,
    #[serde(default)]
    pub user_reacted: bool,
}

impl Reaction {
    pub fn new(kind: ReactionKind) -> Self {
        Self {
            kind,
            count: 0,
            user_reacted: false,
        }
    }

    /// ON なら OFF にして減算（0 未満にはしない）、OFF なら ON にして加算
    pub fn toggled(self) -> Self {
        if self.user_reacted {
            Self {
                count: self.count.saturating_sub(1),
                user_reacted: false,
                ..self
            }
        } else {
            Self {
                count: self.count.saturating_add(1),
                user_reacted: true,
                ..self
            }
        }
    }
}

/// Reaction state for every `ReactionKind`. Deserialization fails unless all
/// six kinds are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReactionMap {
    pub like: Reaction,
    pub love: Reaction,
    pub laugh: Reaction,
    pub angry: Reaction,
    pub sad: Reaction,
    pub wow: Reaction,
}

impl Default for ReactionMap {
    fn default() -> Self {
        Self {
            like: Reaction::new(ReactionKind::Like),
            love: Reaction::new(ReactionKind::Love),
            laugh: Reaction::new(ReactionKind::Laugh),
            angry: Reaction::new(ReactionKind::Angry),
            sad: Reaction::new(ReactionKind::Sad),
            wow: Reaction::new(ReactionKind::Wow),
        }
    }
}

impl ReactionMap {
    pub fn get(&self, kind: ReactionKind) -> &Reaction {
        match kind {
            ReactionKind::Like => &self.like,
            ReactionKind::Love => &self.love,
            ReactionKind::Laugh => &self.laugh,
            ReactionKind::Angry => &self.angry,
            ReactionKind::Sad => &self.sad,
            ReactionKind::Wow => &self.wow,
        }
    }

    pub fn get_mut(&mut self, kind: ReactionKind) -> &mut Reaction {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Laugh => &mut self.laugh,
            ReactionKind::Angry => &mut self.angry,
            ReactionKind::Sad => &mut self.sad,
            ReactionKind::Wow => &mut self.wow,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, &Reaction)> + '_ {
        ReactionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// 指定した種類だけを反転させる。他の種類には触れない。
    pub fn toggle(&mut self, kind: ReactionKind) {
        let slot = self.get_mut(kind);
        *slot = slot.toggled();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorType {
    Person,
    Team,
    League,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub author_type: AuthorType,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub name: String,
    pub host_url: String,
    pub content_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Social,
    News,
}

/// フィードに流れる投稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub author: Author,
    pub source: Source,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub reactions: ReactionMap,
}

/// `2025-01-01T06:00:00.000Z` 形式（ミリ秒 + Z）で入出力する
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetFeedInput {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

impl GetFeedInput {
    /// 空文字のカーソルは「カーソルなし」として扱う
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }

    pub fn resolved_limit(&self) -> Result<usize, FeedError> {
        let Some(limit) = self.limit else {
            return Ok(DEFAULT_LIMIT);
        };
        if limit < MIN_LIMIT as i64 || limit > MAX_LIMIT as i64 {
            return Err(FeedError::InvalidInput(format!(
                "limit must be between {} and {} (got {})",
                MIN_LIMIT, MAX_LIMIT, limit
            )));
        }
        Ok(limit as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFeedResponse {
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPostByIdInput {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactToPostInput {
    pub post_id: String,
    pub reaction_type: ReactionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactToPostResponse {
    pub success: bool,
    pub reactions: ReactionMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearReactionsInput {
    #[serde(default)]
    pub post_id: Option<String>,
}

impl ClearReactionsInput {
    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampOffsetResponse {
    pub offset_ms: Option<i64>,
}
