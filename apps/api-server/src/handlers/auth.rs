//! Session gateway: register, login, logout, current user.

use std::time::Duration;

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;

use chirp_core::domain::{Profile, User};
use chirp_core::error::DomainError;
use chirp_infra::auth::revocation_key;
use chirp_shared::ApiResponse;
use chirp_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }
}

pub(crate) fn collect(errors: &mut Vec<String>, check: Result<(), DomainError>) {
    if let Err(err) = check {
        errors.push(match err {
            DomainError::Validation(msg) => msg,
            other => other.to_string(),
        });
    }
}

/// Throttle credential endpoints per client address. Backend failures
/// fail open: a broken limiter must not lock everyone out.
async fn throttle(state: &AppState, req: &HttpRequest) -> AppResult<()> {
    let client = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    match state.login_limiter.check(&format!("auth:{client}")).await {
        Ok(result) if !result.allowed => {
            tracing::warn!(client = %client, "Auth rate limit exceeded");
            Err(AppError::RateLimited(result.reset_after.as_secs().max(1)))
        }
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Rate limiter error, failing open: {}", e);
            Ok(())
        }
    }
}

fn token_for(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    })
}

/// POST /api/auth/register
///
/// Creates the user and its profile in one transaction, then logs the
/// new account straight in.
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    throttle(&state, &req).await?;

    let form = body.into_inner();
    let username = form.username.trim().to_string();

    // Validate input
    let mut errors = Vec::new();
    collect(&mut errors, User::validate_username(&username));
    collect(&mut errors, User::validate_email(&form.email));
    if form.password.len() < 8 {
        errors.push("password must be at least 8 characters".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Check if the identity is already taken
    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if state.users.find_by_email(&form.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = state
        .passwords
        .hash(&form.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user + profile
    let user = User::new(username, form.email, password_hash);
    let profile = Profile::new(user.id);
    let saved = state.users.create_with_profile(user, profile).await?;

    let auth = token_for(&state, &saved)?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        auth,
        "You have successfully registered! Welcome!",
    )))
}

/// POST /api/auth/login
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    throttle(&state, &req).await?;

    let form = body.into_inner();

    // Unknown username and wrong password take the same exit: one
    // generic rejection, nothing to enumerate accounts with.
    let user = state
        .users
        .find_by_username(form.username.trim())
        .await?
        .ok_or(AppError::LoginFailed)?;

    let valid = state
        .passwords
        .verify(&form.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::LoginFailed);
    }

    let auth = token_for(&state, &user)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        auth,
        "You Have Been Logged In! Start Tweeting!",
    )))
}

/// POST /api/auth/logout
///
/// Stateless tokens cannot be deleted, so the session id goes on the
/// revocation list until the token would have expired anyway.
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let remaining = identity.exp.saturating_sub(Utc::now().timestamp()).max(1) as u64;

    state
        .cache
        .set(
            &revocation_key(&identity.jti),
            "1",
            Some(Duration::from_secs(remaining)),
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Saindo...")))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(user))))
}
