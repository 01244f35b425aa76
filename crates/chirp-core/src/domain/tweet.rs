use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_TWEET_LEN: usize = 280;

/// Tweet entity. The owner is immutable after creation; `created_at`
/// is the feed sort key (descending).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tweet {
    pub fn new(user_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check that `content` fits a tweet.
    pub fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("tweet must not be empty".into()));
        }
        if content.chars().count() > MAX_TWEET_LEN {
            return Err(DomainError::Validation(format!(
                "tweet must be at most {MAX_TWEET_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Tweet joined with its author's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetWithAuthor {
    pub tweet: Tweet,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_bounds() {
        assert!(Tweet::validate_content("").is_err());
        assert!(Tweet::validate_content(" \n ").is_err());
        assert!(Tweet::validate_content(&"a".repeat(MAX_TWEET_LEN)).is_ok());
        assert!(Tweet::validate_content(&"a".repeat(MAX_TWEET_LEN + 1)).is_err());
    }

    #[test]
    fn multibyte_content_counts_chars_not_bytes() {
        // 280 two-byte characters is still a valid tweet
        assert!(Tweet::validate_content(&"é".repeat(MAX_TWEET_LEN)).is_ok());
    }
}
