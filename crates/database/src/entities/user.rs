//! User entity definitions

use serde::{Deserialize, Serialize};

/// Identity record owned by the directory.
///
/// Records are never physically removed: deleting a user clears `is_active`,
/// and inactive records are invisible to listings and leaderboard joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
    pub is_blocked: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for registering a new player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
}

/// Profile fields a player may change after registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub image: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.image.is_none()
    }
}

/// User role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Player,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "PLAYER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "ADMIN" => UserRole::Admin,
            _ => UserRole::Player,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_storage_text() {
        assert_eq!(UserRole::from(UserRole::Admin.as_str()), UserRole::Admin);
        assert_eq!(UserRole::from(UserRole::Player.as_str()), UserRole::Player);
        assert_eq!(UserRole::from("unknown"), UserRole::Player);
    }

    #[test]
    fn empty_profile_update_is_detected() {
        assert!(UpdateProfileRequest::default().is_empty());
        assert!(!UpdateProfileRequest {
            image: Some("https://cdn.example.com/a.png".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
