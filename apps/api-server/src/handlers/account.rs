//! Account management: the user + profile field pair.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use chirp_core::domain::User;
use chirp_shared::ApiResponse;
use chirp_shared::dto::{AccountResponse, UpdateAccountRequest};

use super::auth::{collect, user_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/account
pub async fn show(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let profile = state
        .profiles
        .find_by_user_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Internal("profile record missing".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AccountResponse {
        user: user_response(user),
        avatar_url: profile.avatar_url,
    })))
}

/// PUT /api/account
///
/// Account fields and the avatar are validated as a pair and written in
/// one transaction: both land or neither does.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateAccountRequest>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let username = form.username.trim().to_string();

    let mut errors = Vec::new();
    collect(&mut errors, User::validate_username(&username));
    collect(&mut errors, User::validate_email(&form.email));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut profile = state
        .profiles
        .find_by_user_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Internal("profile record missing".to_string()))?;

    // Uniqueness pre-checks; the store's constraints backstop races.
    if username != user.username && state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if form.email != user.email && state.users.find_by_email(&form.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let now = Utc::now();
    user.username = username;
    user.email = form.email;
    user.updated_at = now;
    profile.avatar_url = form.avatar_url;
    profile.updated_at = now;

    state
        .users
        .update_account(user.clone(), profile.clone())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        AccountResponse {
            user: user_response(user),
            avatar_url: profile.avatar_url,
        },
        "Seu Usuário foi atualizado",
    )))
}
