use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A response built by the service broke its own shape contract.
    #[error("response failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// 検証に失敗した箇所（`posts[3].author.avatarUrl` のようなパス）と理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// 親要素のパスを前に付け足す
    pub fn within(self, parent: &str) -> Self {
        let path = if self.path.is_empty() {
            parent.to_string()
        } else if self.path.starts_with('[') {
            format!("{}{}", parent, self.path)
        } else {
            format!("{}.{}", parent, self.path)
        };
        Self { path, ..self }
    }
}
