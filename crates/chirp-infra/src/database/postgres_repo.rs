//! PostgreSQL repository implementations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use chirp_core::domain::{CommentWithAuthor, Profile, ProfileSummary, TweetWithAuthor, User};
use chirp_core::error::RepoError;
use chirp_core::ports::{
    CommentRepository, FollowRepository, LikeRepository, ProfileRepository, TweetRepository,
    UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::profile::{self, Entity as ProfileEntity};
use super::entity::tweet::{self, Entity as TweetEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL profile repository.
pub type PostgresProfileRepository = PostgresBaseRepository<ProfileEntity>;

/// PostgreSQL tweet repository.
pub type PostgresTweetRepository = PostgresBaseRepository<TweetEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

fn to_summary(row: (profile::Model, Option<user::Model>)) -> Option<ProfileSummary> {
    let (p, u) = row;
    // The FK guarantees an owner; a missing one means a torn row we skip.
    u.map(|u| ProfileSummary {
        user_id: p.user_id,
        username: u.username,
        avatar_url: p.avatar_url,
    })
}

fn to_tweet_with_author(row: (tweet::Model, Option<user::Model>)) -> TweetWithAuthor {
    let (t, u) = row;
    TweetWithAuthor {
        author: u.map(|u| u.username).unwrap_or_default(),
        tweet: t.into(),
    }
}

/// Profiles for a set of user ids, joined with their usernames.
async fn summaries_for(db: &DbConn, user_ids: Vec<Uuid>) -> Result<Vec<ProfileSummary>, RepoError> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = ProfileEntity::find()
        .filter(profile::Column::UserId.is_in(user_ids))
        .find_also_related(UserEntity)
        .order_by_asc(profile::Column::CreatedAt)
        .all(db)
        .await
        .map_err(map_db_err)?;

    Ok(rows.into_iter().filter_map(to_summary).collect())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create_with_profile(&self, new: User, prof: Profile) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = user::ActiveModel::from(new)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        profile::ActiveModel::from(prof)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update_account(&self, account: User, prof: Profile) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        user::ActiveModel::from(account)
            .update(&txn)
            .await
            .map_err(map_db_err)?;
        profile::ActiveModel::from(prof)
            .update(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        let result = ProfileEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn summary(&self, user_id: Uuid) -> Result<Option<ProfileSummary>, RepoError> {
        let row = ProfileEntity::find_by_id(user_id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.and_then(to_summary))
    }

    async fn list_except(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, RepoError> {
        let rows = ProfileEntity::find()
            .filter(profile::Column::UserId.ne(user_id))
            .find_also_related(UserEntity)
            .order_by_asc(profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().filter_map(to_summary).collect())
    }
}

#[async_trait]
impl TweetRepository for PostgresTweetRepository {
    async fn list_recent(&self) -> Result<Vec<TweetWithAuthor>, RepoError> {
        let rows = TweetEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(tweet::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(to_tweet_with_author).collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<TweetWithAuthor>, RepoError> {
        let rows = TweetEntity::find()
            .filter(tweet::Column::UserId.eq(user_id))
            .find_also_related(UserEntity)
            .order_by_desc(tweet::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(to_tweet_with_author).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_tweets(
        &self,
        tweet_ids: &[Uuid],
    ) -> Result<Vec<CommentWithAuthor>, RepoError> {
        if tweet_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = CommentEntity::find()
            .filter(comment::Column::TweetId.is_in(tweet_ids.iter().copied()))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(c, u)| CommentWithAuthor {
                author: u.map(|u| u.username).unwrap_or_default(),
                comment: c.into(),
            })
            .collect())
    }
}

/// PostgreSQL follow relation repository.
pub struct PostgresFollowRepository {
    db: DbConn,
}

impl PostgresFollowRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let edge = follow::ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
            created_at: Set(Utc::now().into()),
        };

        // Single conditional write: a concurrent duplicate lands on the
        // conflict target instead of racing a read-then-write.
        let inserted = FollowEntity::insert(edge)
            .on_conflict(
                OnConflict::columns([follow::Column::FollowerId, follow::Column::FollowedId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(inserted == 1)
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_many()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowedId.eq(followed_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected == 1)
    }

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let row = FollowEntity::find_by_id((follower_id, followed_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.is_some())
    }

    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, RepoError> {
        let edges = FollowEntity::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let ids = edges.into_iter().map(|e| e.follower_id).collect();
        summaries_for(&self.db, ids).await
    }

    async fn following_of(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, RepoError> {
        let edges = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let ids = edges.into_iter().map(|e| e.followed_id).collect();
        summaries_for(&self.db, ids).await
    }
}

/// PostgreSQL like relation repository.
pub struct PostgresLikeRepository {
    db: DbConn,
}

impl PostgresLikeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[derive(FromQueryResult)]
struct LikeCountRow {
    tweet_id: Uuid,
    count: i64,
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn toggle(&self, user_id: Uuid, tweet_id: Uuid) -> Result<bool, RepoError> {
        let row = like::ActiveModel {
            user_id: Set(user_id),
            tweet_id: Set(tweet_id),
            created_at: Set(Utc::now().into()),
        };

        let inserted = LikeEntity::insert(row)
            .on_conflict(
                OnConflict::columns([like::Column::UserId, like::Column::TweetId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        if inserted == 1 {
            return Ok(true);
        }

        // Already liked: this request is the unlike half of the toggle.
        LikeEntity::delete_many()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::TweetId.eq(tweet_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(false)
    }

    async fn count_for(&self, tweet_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError> {
        if tweet_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = LikeEntity::find()
            .select_only()
            .column(like::Column::TweetId)
            .column_as(like::Column::UserId.count(), "count")
            .filter(like::Column::TweetId.is_in(tweet_ids.iter().copied()))
            .group_by(like::Column::TweetId)
            .into_model::<LikeCountRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.tweet_id, r.count as u64))
            .collect())
    }

    async fn liked_by(
        &self,
        user_id: Uuid,
        tweet_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RepoError> {
        if tweet_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::TweetId.is_in(tweet_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(|r| r.tweet_id).collect())
    }
}
