//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request to post a new tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeTweetRequest {
    pub content: String,
}

/// Request to edit an existing tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditTweetRequest {
    pub content: String,
}

/// A tweet as rendered in the feed or on a profile page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author: String,
    pub content: String,
    pub like_count: u64,
    /// Present only for authenticated callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_me: Option<bool>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to comment on a tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a like toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub tweet_id: Uuid,
    pub liked: bool,
    pub like_count: u64,
}

/// A profile row in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// A profile page: the profile plus its tweets, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePageResponse {
    pub profile: ProfileResponse,
    pub tweets: Vec<TweetResponse>,
    /// Whether the caller follows this profile.
    pub followed_by_me: bool,
}

/// Outcome of a follow/unfollow request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub user_id: Uuid,
    pub following: bool,
}

/// The account + profile field pair shown in the update form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub user: UserResponse,
    pub avatar_url: Option<String>,
}

/// Request to update account and profile fields together.
/// Both are validated and applied as a pair, or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}
