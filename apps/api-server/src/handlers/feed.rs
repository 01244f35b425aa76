//! Feed: the public timeline and tweet composition.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use chirp_core::domain::{CommentWithAuthor, Tweet, TweetWithAuthor};
use chirp_shared::ApiResponse;
use chirp_shared::dto::{CommentResponse, ComposeTweetRequest, TweetResponse};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn comment_response(row: CommentWithAuthor) -> CommentResponse {
    CommentResponse {
        id: row.comment.id,
        tweet_id: row.comment.tweet_id,
        user_id: row.comment.user_id,
        author: row.author,
        body: row.comment.body,
        created_at: row.comment.created_at,
    }
}

/// Attach like counts, the viewer's liked flags, and comments to a page
/// of tweets. All lookups are batched; nothing is fetched per tweet.
pub(crate) async fn hydrate_tweets(
    state: &AppState,
    viewer: Option<&Identity>,
    tweets: Vec<TweetWithAuthor>,
) -> AppResult<Vec<TweetResponse>> {
    let ids: Vec<Uuid> = tweets.iter().map(|t| t.tweet.id).collect();

    let counts = state.likes.count_for(&ids).await?;
    let liked = match viewer {
        Some(identity) => Some(state.likes.liked_by(identity.user_id, &ids).await?),
        None => None,
    };

    let mut comments_by_tweet: HashMap<Uuid, Vec<CommentResponse>> = HashMap::new();
    for row in state.comments.list_for_tweets(&ids).await? {
        comments_by_tweet
            .entry(row.comment.tweet_id)
            .or_default()
            .push(comment_response(row));
    }

    Ok(tweets
        .into_iter()
        .map(|row| {
            let id = row.tweet.id;
            TweetResponse {
                id,
                user_id: row.tweet.user_id,
                author: row.author,
                content: row.tweet.content,
                like_count: counts.get(&id).copied().unwrap_or(0),
                liked_by_me: liked.as_ref().map(|set| set.contains(&id)),
                comments: comments_by_tweet.remove(&id).unwrap_or_default(),
                created_at: row.tweet.created_at,
                updated_at: row.tweet.updated_at,
            }
        })
        .collect())
}

/// GET /api/feed
///
/// Everyone sees every tweet, newest first. Authenticated viewers also
/// get their own liked flags.
pub async fn feed(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let tweets = state.tweets.list_recent().await?;
    let feed = hydrate_tweets(&state, viewer.0.as_ref(), tweets).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed)))
}

/// POST /api/tweets
pub async fn compose(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ComposeTweetRequest>,
) -> AppResult<HttpResponse> {
    let content = body.into_inner().content.trim().to_string();
    Tweet::validate_content(&content)?;

    let tweet = state
        .tweets
        .insert(Tweet::new(identity.user_id, content))
        .await?;

    let response = TweetResponse {
        id: tweet.id,
        user_id: tweet.user_id,
        author: identity.username,
        content: tweet.content,
        like_count: 0,
        liked_by_me: Some(false),
        comments: Vec::new(),
        created_at: tweet.created_at,
        updated_at: tweet.updated_at,
    };

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        response,
        "Your Tweet Has Been Posted!",
    )))
}
