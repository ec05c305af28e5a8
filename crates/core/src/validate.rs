//! Response shape checks.
//!
//! Every value the service hands back is run through `Validate` first. Input
//! problems are rejected earlier as `FeedError::InvalidInput`; a failure here
//! means the service built something it should not have.

use crate::{
    Author, GetFeedResponse, Post, ReactToPostResponse, ReactionMap, Source, ValidationError,
    MAX_LIMIT,
};

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), ValidationError> {
        for (i, item) in self.iter().enumerate() {
            item.validate().map_err(|e| e.within(&format!("[{}]", i)))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.as_slice().validate()
    }
}

pub fn require_id(path: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(path, "must not be empty"));
    }
    Ok(())
}

pub fn require_url(path: &str, value: &str) -> Result<(), ValidationError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new(path, format!("invalid url {:?}: {}", value, e)))
}

impl Validate for Author {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", &self.id)?;
        require_url("avatarUrl", &self.avatar_url)
    }
}

impl Validate for Source {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", &self.id)?;
        require_url("hostUrl", &self.host_url)?;
        require_url("contentUrl", &self.content_url)
    }
}

impl Validate for ReactionMap {
    fn validate(&self) -> Result<(), ValidationError> {
        for (kind, reaction) in self.iter() {
            if reaction.kind != kind {
                return Err(ValidationError::new(
                    format!("{}.type", kind.as_str()),
                    format!("stored under {:?} but typed {:?}", kind, reaction.kind),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for Post {
    fn validate(&self) -> Result<(), ValidationError> {
        require_id("id", &self.id)?;
        self.author.validate().map_err(|e| e.within("author"))?;
        self.source.validate().map_err(|e| e.within("source"))?;
        if let Some(image_url) = &self.image_url {
            require_url("imageUrl", image_url)?;
        }
        self.reactions.validate().map_err(|e| e.within("reactions"))
    }
}

impl Validate for GetFeedResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        self.posts.validate().map_err(|e| e.within("posts"))?;

        if self.posts.len() > MAX_LIMIT {
            return Err(ValidationError::new(
                "posts",
                format!("page holds {} posts, max is {}", self.posts.len(), MAX_LIMIT),
            ));
        }

        let last_id = self.posts.last().map(|p| p.id.as_str());
        match (&self.next_cursor, self.has_more) {
            (Some(cursor), true) if Some(cursor.as_str()) == last_id => Ok(()),
            (None, false) => Ok(()),
            (cursor, has_more) => Err(ValidationError::new(
                "nextCursor",
                format!(
                    "cursor {:?} inconsistent with hasMore={} (last post {:?})",
                    cursor, has_more, last_id
                ),
            )),
        }
    }
}

impl Validate for ReactToPostResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        self.reactions.validate().map_err(|e| e.within("reactions"))
    }
}
