use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_COMMENT_LEN: usize = 500;

/// Comment entity - bound to one tweet and one author, no edit/delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(tweet_id: Uuid, user_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            tweet_id,
            user_id,
            body,
            created_at: Utc::now(),
        }
    }

    pub fn validate_body(body: &str) -> Result<(), DomainError> {
        if body.trim().is_empty() {
            return Err(DomainError::Validation("comment must not be empty".into()));
        }
        if body.chars().count() > MAX_COMMENT_LEN {
            return Err(DomainError::Validation(format!(
                "comment must be at most {MAX_COMMENT_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Comment joined with its author's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_bounds() {
        assert!(Comment::validate_body("").is_err());
        assert!(Comment::validate_body(&"b".repeat(MAX_COMMENT_LEN + 1)).is_err());
        assert!(Comment::validate_body("nice tweet").is_ok());
    }
}
