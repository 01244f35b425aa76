use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_USERNAME_LEN: usize = 30;

/// User entity - the authentication identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("username must not be empty".into()));
        }
        if trimmed.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::Validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<(), DomainError> {
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("invalid email address".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_overlong_usernames() {
        assert!(User::validate_username("").is_err());
        assert!(User::validate_username("   ").is_err());
        assert!(User::validate_username(&"x".repeat(MAX_USERNAME_LEN + 1)).is_err());
        assert!(User::validate_username("elon").is_ok());
    }

    #[test]
    fn rejects_mail_without_at_sign() {
        assert!(User::validate_email("not-an-email").is_err());
        assert!(User::validate_email("").is_err());
        assert!(User::validate_email("a@b.com").is_ok());
    }
}
