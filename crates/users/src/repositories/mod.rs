//! Directory store abstraction.
//!
//! Services hold an `Arc<dyn UserDirectory>` built once at startup. The SQLite
//! [`UserRepository`] is the production store; [`InMemoryUserDirectory`] backs
//! tests and local runs.

pub mod in_memory;

use async_trait::async_trait;
use gamehub_database::{
    CreateUserRequest, UpdateProfileRequest, UserRecord, UserRepository, UserResult,
};

pub use in_memory::InMemoryUserDirectory;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Point lookup by identifier. Returns inactive records too; callers decide.
    async fn find_by_id(&self, id: &str) -> UserResult<Option<UserRecord>>;
    /// Lookup among active records.
    async fn find_by_username(&self, username: &str) -> UserResult<Option<UserRecord>>;
    async fn find_by_email(&self, email: &str) -> UserResult<Option<UserRecord>>;
    async fn list_active_players(&self, offset: u64, limit: u32) -> UserResult<Vec<UserRecord>>;
    async fn count_active_players(&self) -> UserResult<u64>;
    async fn create(&self, request: &CreateUserRequest) -> UserResult<UserRecord>;
    async fn update_profile(&self, id: &str, request: &UpdateProfileRequest) -> UserResult<UserRecord>;
    async fn set_blocked(&self, id: &str, blocked: bool) -> UserResult<UserRecord>;
    async fn soft_delete(&self, id: &str) -> UserResult<()>;
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, id: &str) -> UserResult<Option<UserRecord>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<UserRecord>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<UserRecord>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn list_active_players(&self, offset: u64, limit: u32) -> UserResult<Vec<UserRecord>> {
        UserRepository::list_active_players(self, offset, limit).await
    }

    async fn count_active_players(&self) -> UserResult<u64> {
        UserRepository::count_active_players(self).await
    }

    async fn create(&self, request: &CreateUserRequest) -> UserResult<UserRecord> {
        UserRepository::create(self, request).await
    }

    async fn update_profile(&self, id: &str, request: &UpdateProfileRequest) -> UserResult<UserRecord> {
        UserRepository::update_profile(self, id, request).await
    }

    async fn set_blocked(&self, id: &str, blocked: bool) -> UserResult<UserRecord> {
        UserRepository::set_blocked(self, id, blocked).await
    }

    async fn soft_delete(&self, id: &str) -> UserResult<()> {
        UserRepository::soft_delete(self, id).await
    }
}
