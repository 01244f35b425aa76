use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Comment, CommentWithAuthor, Profile, ProfileSummary, Tweet, TweetWithAuthor, User,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Create a user together with its profile in one transaction,
    /// enforcing the one-profile-per-user invariant.
    async fn create_with_profile(&self, user: User, profile: Profile) -> Result<User, RepoError>;

    /// Apply account fields and profile fields together: both writes
    /// land in one transaction or neither does.
    async fn update_account(&self, user: User, profile: Profile) -> Result<(), RepoError>;
}

/// Profile repository.
#[async_trait]
pub trait ProfileRepository: BaseRepository<Profile, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError>;

    /// Profile joined with its owner's username.
    async fn summary(&self, user_id: Uuid) -> Result<Option<ProfileSummary>, RepoError>;

    /// Every profile except the given user's own.
    async fn list_except(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, RepoError>;
}

/// Tweet repository.
#[async_trait]
pub trait TweetRepository: BaseRepository<Tweet, Uuid> {
    /// All tweets, newest first, with author usernames.
    async fn list_recent(&self) -> Result<Vec<TweetWithAuthor>, RepoError>;

    /// One user's tweets, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TweetWithAuthor>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments for a batch of tweets, oldest first, with author usernames.
    async fn list_for_tweets(&self, tweet_ids: &[Uuid])
    -> Result<Vec<CommentWithAuthor>, RepoError>;
}

/// Directed follow relation between profiles, keyed by owning user ids.
///
/// Mutations are atomic conditional writes: the returned bool reports
/// whether a row was actually inserted or removed, so duplicate
/// follow/unfollow requests are no-ops rather than errors.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    /// Profiles that follow the given user.
    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, RepoError>;

    /// Profiles the given user follows.
    async fn following_of(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, RepoError>;
}

/// Per-tweet like set.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Flip the caller's membership in the tweet's like set.
    /// Returns whether the tweet is liked after the call.
    async fn toggle(&self, user_id: Uuid, tweet_id: Uuid) -> Result<bool, RepoError>;

    /// Like counts for a batch of tweets. Tweets with no likes are absent.
    async fn count_for(&self, tweet_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError>;

    /// Which of the given tweets the user has liked.
    async fn liked_by(
        &self,
        user_id: Uuid,
        tweet_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RepoError>;
}
