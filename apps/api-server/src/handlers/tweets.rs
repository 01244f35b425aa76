//! Tweet lifecycle: view, owner-only edit and delete.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use chirp_core::domain::{Tweet, TweetWithAuthor};
use chirp_shared::ApiResponse;
use chirp_shared::dto::EditTweetRequest;

use super::feed::hydrate_tweets;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) async fn find_tweet_or_404(state: &AppState, id: Uuid) -> AppResult<Tweet> {
    state
        .tweets
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tweet {id} not found")))
}

fn ensure_owner(identity: &Identity, tweet: &Tweet) -> AppResult<()> {
    if tweet.user_id != identity.user_id {
        return Err(AppError::Forbidden("Não é seu Tweet!!".to_string()));
    }
    Ok(())
}

async fn single_response(
    state: &AppState,
    viewer: Option<&Identity>,
    tweet: Tweet,
    author: String,
) -> AppResult<chirp_shared::dto::TweetResponse> {
    let mut hydrated =
        hydrate_tweets(state, viewer, vec![TweetWithAuthor { tweet, author }]).await?;
    hydrated
        .pop()
        .ok_or_else(|| AppError::Internal("tweet hydration produced nothing".to_string()))
}

/// GET /api/tweets/{id}
pub async fn show(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let tweet = find_tweet_or_404(&state, path.into_inner()).await?;

    let author = state
        .users
        .find_by_id(tweet.user_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();

    let data = single_response(&state, viewer.0.as_ref(), tweet, author).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// PUT /api/tweets/{id} - owner only
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<EditTweetRequest>,
) -> AppResult<HttpResponse> {
    let mut tweet = find_tweet_or_404(&state, path.into_inner()).await?;
    ensure_owner(&identity, &tweet)?;

    let content = body.into_inner().content.trim().to_string();
    Tweet::validate_content(&content)?;

    tweet.content = content;
    tweet.updated_at = Utc::now();
    let updated = state.tweets.update(tweet).await?;

    let author = identity.username.clone();
    let data = single_response(&state, Some(&identity), updated, author).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(data, "Foi atualizado!")))
}

/// DELETE /api/tweets/{id} - owner only
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let tweet = find_tweet_or_404(&state, path.into_inner()).await?;
    ensure_owner(&identity, &tweet)?;

    state.tweets.delete(tweet.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(tweet.id, "Deletado!")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(user_id: Uuid) -> Identity {
        Identity {
            user_id,
            username: "caller".to_string(),
            jti: Uuid::new_v4(),
            exp: 0,
        }
    }

    #[test]
    fn owner_may_touch_their_tweet() {
        let user_id = Uuid::new_v4();
        let tweet = Tweet::new(user_id, "mine".to_string());

        assert!(ensure_owner(&identity(user_id), &tweet).is_ok());
    }

    #[test]
    fn non_owner_is_rejected_with_the_notice() {
        let tweet = Tweet::new(Uuid::new_v4(), "not yours".to_string());

        let err = ensure_owner(&identity(Uuid::new_v4()), &tweet).unwrap_err();
        match err {
            AppError::Forbidden(notice) => assert_eq!(notice, "Não é seu Tweet!!"),
            other => panic!("expected Forbidden, got {other}"),
        }
    }
}
