//! Response shapes returned by the directory services.

use gamehub_database::{UserRecord, UserRole};
use serde::{Deserialize, Serialize};

/// One page of results plus the counters callers paginate with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub limit: u32,
    pub page: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

/// A ranking entry enriched with its player's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub name: String,
    pub username: String,
    pub image: Option<String>,
    pub email: String,
    pub game: String,
    pub highest_score: i64,
}

pub type LeaderboardPage = Paginated<LeaderboardRow>;

/// Public profile of a user as exposed by lookups and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
    pub is_blocked: bool,
}

impl From<UserRecord> for UserDetails {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            image: user.image,
            role: user.role,
            is_blocked: user.is_blocked,
        }
    }
}
