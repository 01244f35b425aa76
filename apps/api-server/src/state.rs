//! Application state - shared across all handlers.

use std::sync::Arc;

use chirp_core::ports::{
    Cache, CommentRepository, FollowRepository, LikeRepository, PasswordService,
    ProfileRepository, RateLimiter, TokenService, TweetRepository, UserRepository,
};
use chirp_infra::cache::{InMemoryCache, RedisCache, RedisConfig};
use chirp_infra::database::{
    self, DbErr, PostgresCommentRepository, PostgresFollowRepository, PostgresLikeRepository,
    PostgresProfileRepository, PostgresTweetRepository, PostgresUserRepository,
};
use chirp_infra::rate_limit::KeyedRateLimiter;
use chirp_infra::{Argon2PasswordService, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state: every port implementation the handlers use.
/// This is the explicit per-request context - there is no ambient session.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub tweets: Arc<dyn TweetRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub cache: Arc<dyn Cache>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub login_limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Build the application state. The database is required; the
    /// revocation cache falls back to in-memory when Redis is absent.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = database::connect(&config.database).await?;

        let cache: Arc<dyn Cache> = match RedisConfig::from_env() {
            Some(redis_config) => match RedisCache::new(redis_config).await {
                Ok(redis) => Arc::new(redis),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Using in-memory revocation cache.",
                        e
                    );
                    Arc::new(InMemoryCache::new())
                }
            },
            None => {
                tracing::info!("REDIS_URL not set. Using in-memory revocation cache.");
                Arc::new(InMemoryCache::new())
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
            tweets: Arc::new(PostgresTweetRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            follows: Arc::new(PostgresFollowRepository::new(db.clone())),
            likes: Arc::new(PostgresLikeRepository::new(db)),
            cache,
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            login_limiter: Arc::new(KeyedRateLimiter::from_env()),
        })
    }
}
