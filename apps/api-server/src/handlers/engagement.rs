//! Engagement: like toggles and comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use chirp_core::domain::Comment;
use chirp_shared::ApiResponse;
use chirp_shared::dto::{CommentRequest, CommentResponse, LikeResponse};

use super::tweets::find_tweet_or_404;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/tweets/{id}/like
///
/// Flips the caller's like on the tweet: like if absent, unlike if
/// present. The flip itself is a conditional write in the store, so
/// concurrent duplicates cannot double-count.
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let tweet = find_tweet_or_404(&state, path.into_inner()).await?;

    let liked = state.likes.toggle(identity.user_id, tweet.id).await?;
    let like_count = state
        .likes
        .count_for(&[tweet.id])
        .await?
        .get(&tweet.id)
        .copied()
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(LikeResponse {
        tweet_id: tweet.id,
        liked,
        like_count,
    })))
}

/// POST /api/tweets/{id}/comments
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let tweet = find_tweet_or_404(&state, path.into_inner()).await?;

    let text = body.into_inner().body.trim().to_string();
    Comment::validate_body(&text)?;

    let saved = state
        .comments
        .insert(Comment::new(tweet.id, identity.user_id, text))
        .await?;

    let data = CommentResponse {
        id: saved.id,
        tweet_id: saved.tweet_id,
        user_id: saved.user_id,
        author: identity.username,
        body: saved.body,
        created_at: saved.created_at,
    };

    Ok(HttpResponse::Created().json(ApiResponse::ok(data)))
}
