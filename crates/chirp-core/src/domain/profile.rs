use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile entity - the per-user social graph extension.
///
/// Exactly one exists per user; it is created in the same transaction
/// as its owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read model for profile listings: a profile joined with its owner's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}
