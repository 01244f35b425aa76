use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use chirp_core::domain::Tweet;
use chirp_core::error::RepoError;
use chirp_core::ports::{BaseRepository, FollowRepository, LikeRepository};

use crate::database::entity::tweet;
use crate::database::postgres_repo::{
    PostgresFollowRepository, PostgresLikeRepository, PostgresTweetRepository,
};

#[tokio::test]
async fn test_find_tweet_by_id() {
    let tweet_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![tweet::Model {
            id: tweet_id,
            user_id,
            content: "hello world".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresTweetRepository::new(db);

    let result: Option<Tweet> = repo.find_by_id(tweet_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.content, "hello world");
    assert_eq!(found.id, tweet_id);
}

#[tokio::test]
async fn test_delete_missing_tweet_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresTweetRepository::new(db);

    let result: Result<(), _> = BaseRepository::<Tweet, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_like_toggle_inserts_when_absent() {
    // Conflict-free insert affects one row: the tweet is now liked.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    let liked = repo.toggle(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
    assert!(liked);
}

#[tokio::test]
async fn test_like_toggle_removes_when_present() {
    // Insert hits the conflict target (0 rows), then the delete removes
    // the existing like: the toggle reports unliked.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let repo = PostgresLikeRepository::new(db);

    let liked = repo.toggle(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
    assert!(!liked);
}

#[tokio::test]
async fn test_duplicate_follow_is_a_noop() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresFollowRepository::new(db);

    let inserted = repo.follow(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
    assert!(!inserted);
}

#[tokio::test]
async fn test_unfollow_of_absent_edge_is_a_noop() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresFollowRepository::new(db);

    let removed = repo.unfollow(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
    assert!(!removed);
}

#[tokio::test]
async fn test_liked_by_with_no_tweets_skips_the_query() {
    // No mock results appended: an issued query would panic the mock.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let repo = PostgresLikeRepository::new(db);

    let liked = repo.liked_by(Uuid::new_v4(), &[]).await.unwrap();
    assert!(liked.is_empty());
}
