//! Social graph: profile listings, follow/unfollow, follower lists.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use chirp_core::domain::ProfileSummary;
use chirp_shared::ApiResponse;
use chirp_shared::dto::{FollowResponse, ProfilePageResponse, ProfileResponse};

use super::feed::hydrate_tweets;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn profile_response(summary: ProfileSummary) -> ProfileResponse {
    ProfileResponse {
        user_id: summary.user_id,
        username: summary.username,
        avatar_url: summary.avatar_url,
    }
}

/// Follower and following lists are visible to their owner only.
/// Both sides of the comparison are user ids: the caller's own and the
/// one in the path.
fn ensure_self(identity: &Identity, user_id: Uuid) -> AppResult<()> {
    if identity.user_id != user_id {
        return Err(AppError::Forbidden(
            "That's Not Your Profile Page...".to_string(),
        ));
    }
    Ok(())
}

async fn find_profile_or_404(state: &AppState, user_id: Uuid) -> AppResult<ProfileSummary> {
    state
        .profiles
        .summary(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {user_id} not found")))
}

/// GET /api/profiles - everyone but the caller
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let profiles = state.profiles.list_except(identity.user_id).await?;

    let data: Vec<ProfileResponse> = profiles.into_iter().map(profile_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// GET /api/profiles/{user_id} - a profile and its tweets, newest first
pub async fn show(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let summary = find_profile_or_404(&state, user_id).await?;

    let tweets = state.tweets.list_by_user(user_id).await?;
    let tweets = hydrate_tweets(&state, Some(&identity), tweets).await?;

    let followed_by_me = state.follows.is_following(identity.user_id, user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfilePageResponse {
        profile: profile_response(summary),
        tweets,
        followed_by_me,
    })))
}

/// POST /api/profiles/{user_id}/follow - idempotent
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();

    if user_id == identity.user_id {
        return Err(AppError::Validation(vec![
            "you cannot follow yourself".to_string(),
        ]));
    }

    let target = find_profile_or_404(&state, user_id).await?;
    state.follows.follow(identity.user_id, user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        FollowResponse {
            user_id,
            following: true,
        },
        format!("You Have Successfully Followed {}", target.username),
    )))
}

/// POST /api/profiles/{user_id}/unfollow - idempotent
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();

    let target = find_profile_or_404(&state, user_id).await?;
    state.follows.unfollow(identity.user_id, user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        FollowResponse {
            user_id,
            following: false,
        },
        format!("You Have Successfully Unfollowed {}", target.username),
    )))
}

/// GET /api/profiles/{user_id}/followers - self only
pub async fn followers(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    ensure_self(&identity, user_id)?;

    let rows = state.follows.followers_of(user_id).await?;

    let data: Vec<ProfileResponse> = rows.into_iter().map(profile_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// GET /api/profiles/{user_id}/following - self only
pub async fn following(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    ensure_self(&identity, user_id)?;

    let rows = state.follows.following_of(user_id).await?;

    let data: Vec<ProfileResponse> = rows.into_iter().map(profile_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
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
    fn own_lists_are_visible() {
        let user_id = Uuid::new_v4();
        assert!(ensure_self(&identity(user_id), user_id).is_ok());
    }

    #[test]
    fn other_callers_get_the_notice_and_nothing_else() {
        let err = ensure_self(&identity(Uuid::new_v4()), Uuid::new_v4()).unwrap_err();
        match err {
            AppError::Forbidden(notice) => assert_eq!(notice, "That's Not Your Profile Page..."),
            other => panic!("expected Forbidden, got {other}"),
        }
    }
}
