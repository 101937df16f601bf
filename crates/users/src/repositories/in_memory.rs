//! In-memory directory store for tests and local runs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use gamehub_database::{
    CreateUserRequest, UpdateProfileRequest, UserError, UserRecord, UserResult, UserRole,
};
use tokio::sync::RwLock;

use super::UserDirectory;

/// Directory store keyed by user id.
///
/// Each instance owns its records; nothing is shared between instances.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
    next_id: RwLock<u64>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given records, ids included.
    pub fn with_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        Self {
            users: RwLock::new(users),
            next_id: RwLock::new(0),
        }
    }

    /// Insert or replace a record as-is.
    pub async fn insert(&self, record: UserRecord) {
        self.users.write().await.insert(record.id.clone(), record);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn find_active<'a>(
        users: &'a HashMap<String, UserRecord>,
        predicate: impl Fn(&UserRecord) -> bool,
    ) -> Option<&'a UserRecord> {
        users.values().find(|user| user.is_active && predicate(user))
    }

    fn ensure_unique(
        users: &HashMap<String, UserRecord>,
        except_id: Option<&str>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> UserResult<()> {
        let others = |user: &UserRecord| Some(user.id.as_str()) != except_id;

        if let Some(username) = username {
            if Self::find_active(users, |u| others(u) && u.username == username).is_some() {
                return Err(UserError::UsernameAlreadyExists);
            }
        }
        if let Some(email) = email {
            if Self::find_active(users, |u| others(u) && u.email == email).is_some() {
                return Err(UserError::EmailAlreadyExists);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &str) -> UserResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(Self::find_active(&users, |u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(Self::find_active(&users, |u| u.email == email).cloned())
    }

    async fn list_active_players(&self, offset: u64, limit: u32) -> UserResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        let mut players: Vec<&UserRecord> = users
            .values()
            .filter(|user| user.is_active && user.role == UserRole::Player)
            .collect();
        players.sort_by(|a, b| a.username.cmp(&b.username));

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(players.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count_active_players(&self) -> UserResult<u64> {
        let users = self.users.read().await;
        let count = users
            .values()
            .filter(|user| user.is_active && user.role == UserRole::Player)
            .count();
        Ok(count as u64)
    }

    async fn create(&self, request: &CreateUserRequest) -> UserResult<UserRecord> {
        let mut users = self.users.write().await;
        Self::ensure_unique(&users, None, Some(&request.username), Some(&request.email))?;

        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let now = Utc::now().to_rfc3339();

        let user = UserRecord {
            id: format!("user_{}", *next_id),
            username: request.username.clone(),
            name: request.name.clone(),
            email: request.email.clone(),
            image: None,
            role: UserRole::Player,
            is_blocked: false,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        };

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: &str, request: &UpdateProfileRequest) -> UserResult<UserRecord> {
        let mut users = self.users.write().await;
        Self::ensure_unique(&users, Some(id), request.username.as_deref(), None)?;

        let user = users
            .get_mut(id)
            .filter(|user| user.is_active)
            .ok_or(UserError::UserNotFound)?;

        if let Some(ref username) = request.username {
            user.username = username.clone();
        }
        if let Some(ref image) = request.image {
            user.image = Some(image.clone());
        }
        user.updated_at = Utc::now().to_rfc3339();
        Ok(user.clone())
    }

    async fn set_blocked(&self, id: &str, blocked: bool) -> UserResult<UserRecord> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .filter(|user| user.is_active)
            .ok_or(UserError::UserNotFound)?;

        user.is_blocked = blocked;
        user.updated_at = Utc::now().to_rfc3339();
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: &str) -> UserResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .filter(|user| user.is_active)
            .ok_or(UserError::UserNotFound)?;

        user.is_active = false;
        user.updated_at = Utc::now().to_rfc3339();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            name: format!("{username} name"),
            email: format!("{username}@example.com"),
        }
    }

    #[tokio::test]
    async fn soft_deleted_username_can_be_reused() {
        let store = InMemoryUserDirectory::new();
        let first = store.create(&request("ada")).await.unwrap();

        assert_eq!(
            store.create(&request("ada")).await.unwrap_err(),
            UserError::UsernameAlreadyExists
        );

        store.soft_delete(&first.id).await.unwrap();
        let second = store.create(&request("ada")).await.unwrap();

        assert_ne!(first.id, second.id);
        let found = store.find_by_username("ada").await.unwrap().unwrap();
        assert_eq!(found.id, second.id);

        let retired = store.find_by_id(&first.id).await.unwrap().unwrap();
        assert!(!retired.is_active);
    }

    #[tokio::test]
    async fn listing_skips_inactive_and_admins() {
        let store = InMemoryUserDirectory::new();
        let carol = store.create(&request("carol")).await.unwrap();
        store.create(&request("bob")).await.unwrap();
        store.create(&request("alice")).await.unwrap();
        store.soft_delete(&carol.id).await.unwrap();

        let mut admin = store.create(&request("root")).await.unwrap();
        admin.role = UserRole::Admin;
        store.insert(admin).await;

        let names: Vec<String> = store
            .list_active_players(0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["alice", "bob"]);
        assert_eq!(store.count_active_players().await.unwrap(), 2);
        assert_eq!(store.list_active_players(1, 10).await.unwrap().len(), 1);
        assert!(store.list_active_players(5, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutations_on_inactive_users_report_not_found() {
        let store = InMemoryUserDirectory::new();
        let user = store.create(&request("dora")).await.unwrap();
        store.soft_delete(&user.id).await.unwrap();

        assert_eq!(store.set_blocked(&user.id, true).await.unwrap_err(), UserError::UserNotFound);
        assert_eq!(store.soft_delete(&user.id).await.unwrap_err(), UserError::UserNotFound);
    }
}
