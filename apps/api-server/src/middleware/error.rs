//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chirp_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    /// Login rejection - deliberately one message for every cause, so a
    /// caller cannot probe which usernames exist.
    LoginFailed,
    Forbidden(String),
    Conflict(String),
    RateLimited(u64),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::LoginFailed => write!(f, "Login failed"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::RateLimited(secs) => write!(f, "Rate limited for {}s", secs),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::LoginFailed => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::RateLimited(secs) = self {
            let error = ErrorResponse::new(429, "Too Many Requests").with_detail(format!(
                "Rate limit exceeded. Try again in {} seconds.",
                secs
            ));
            return HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", secs.to_string()))
                .json(error);
        }

        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::LoginFailed => ErrorResponse::unauthorized()
                .with_detail("There was an error logging in. Please Try Again..."),
            AppError::Forbidden(detail) => ErrorResponse::forbidden().with_detail(detail.clone()),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(errors.join(", "))
            }
            AppError::RateLimited(_) => unreachable!("handled above"),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<chirp_core::error::DomainError> for AppError {
    fn from(err: chirp_core::error::DomainError) -> Self {
        match err {
            chirp_core::error::DomainError::Validation(msg) => AppError::Validation(vec![msg]),
            chirp_core::error::DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} {} not found", entity, id))
            }
            chirp_core::error::DomainError::Duplicate(msg) => AppError::Conflict(msg),
            chirp_core::error::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<chirp_core::error::RepoError> for AppError {
    fn from(err: chirp_core::error::RepoError) -> Self {
        match err {
            chirp_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            chirp_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            chirp_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            chirp_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::error::RepoError;

    #[test]
    fn repo_not_found_maps_to_404() {
        let err: AppError = RepoError::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn query_details_never_reach_the_response() {
        let err: AppError = RepoError::Query("secret table names".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn login_failure_is_generic() {
        assert_eq!(AppError::LoginFailed.status_code(), StatusCode::UNAUTHORIZED);
    }
}
