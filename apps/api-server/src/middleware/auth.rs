//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use chirp_core::ports::{AuthError, TokenClaims};
use chirp_infra::auth::revocation_key;

use crate::state::AppState;

/// Authenticated caller identity, extracted from a Bearer token.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
/// Extraction validates the token and checks the revocation cache, so a
/// logged-out token stops working immediately.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub jti: uuid::Uuid,
    pub exp: i64,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            jti: claims.jti,
            exp: claims.exp,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::TokenExpired
            | AuthError::TokenRevoked
            | AuthError::InvalidToken(_)
            | AuthError::MissingAuth => actix_web::http::StatusCode::UNAUTHORIZED,
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use chirp_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your session has expired. Please login again."),
            AuthError::TokenRevoked => ErrorResponse::new(401, "Session Ended")
                .with_detail("This session was logged out. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Precisa estar logado..."),
            _ => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();

        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let state = match state {
                Some(state) => state,
                None => {
                    tracing::error!("AppState not found in app data");
                    return Err(AuthenticationError(AuthError::InvalidToken(
                        "Server configuration error".to_string(),
                    )));
                }
            };

            let auth_header = auth_header.ok_or(AuthenticationError(AuthError::MissingAuth))?;

            // Parse "Bearer <token>"
            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                AuthenticationError(AuthError::InvalidToken("Expected Bearer token".to_string()))
            })?;

            let claims = state
                .tokens
                .validate_token(token)
                .map_err(AuthenticationError)?;

            // A structurally valid token may still have been logged out.
            if state.cache.exists(&revocation_key(&claims.jti)).await {
                return Err(AuthenticationError(AuthError::TokenRevoked));
            }

            Ok(Identity::from(claims))
        })
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Identity::from_request(req, payload);
        Box::pin(async move { Ok(OptionalIdentity(fut.await.ok())) })
    }
}
