//! User service for directory operations.

use std::sync::Arc;

use gamehub_database::{CreateUserRequest, UpdateProfileRequest, UserRecord};
use tracing::{debug, info, warn};

use crate::pagination::{compute_total_pages, PageRequest};
use crate::repositories::UserDirectory;
use crate::types::{Paginated, UserDetails, UserError, UserResult};
use crate::utils::validation;

/// Service for managing player records
#[derive(Clone)]
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Get an active user by username
    pub async fn get_user_by_username(&self, username: &str) -> UserResult<UserDetails> {
        self.directory
            .find_by_username(username.trim())
            .await?
            .filter(|user| user.is_active)
            .map(UserDetails::from)
            .ok_or(UserError::UserNotFound)
    }

    /// List active players ordered by username
    pub async fn list_players(&self, page: i64, limit: i64) -> UserResult<Paginated<UserDetails>> {
        let window = PageRequest::new(page, limit)?;

        let users = self
            .directory
            .list_active_players(window.offset(), window.limit())
            .await?;
        let total_count = self.directory.count_active_players().await?;

        debug!(
            page = window.page(),
            limit = window.limit(),
            rows = users.len(),
            total_count,
            "listed players"
        );

        Ok(Paginated {
            data: users.into_iter().map(UserDetails::from).collect(),
            limit: window.limit(),
            page: window.page(),
            total_count,
            total_pages: compute_total_pages(total_count, window.limit()),
        })
    }

    /// Create a new player
    pub async fn create_user(&self, request: CreateUserRequest) -> UserResult<UserRecord> {
        let request = CreateUserRequest {
            username: request.username.trim().to_string(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
        };

        validation::validate_username(&request.username)?;
        validation::validate_name(&request.name)?;
        validation::validate_email(&request.email)?;

        if self.directory.find_by_username(&request.username).await?.is_some() {
            return Err(UserError::UsernameAlreadyExists);
        }
        if self.directory.find_by_email(&request.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists);
        }

        let user = self.directory.create(&request).await?;
        info!(user_id = %user.id, username = %user.username, "created user");

        Ok(user)
    }

    /// Change a player's username and/or profile image
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> UserResult<UserRecord> {
        let request = UpdateProfileRequest {
            username: request.username.map(|u| u.trim().to_string()),
            image: request.image.map(|i| i.trim().to_string()),
        };

        if request.is_empty() {
            return Err(UserError::ValidationFailed("Nothing to update".to_string()));
        }
        if let Some(ref username) = request.username {
            validation::validate_username(username)?;
        }
        if let Some(ref image) = request.image {
            validation::validate_image_url(image)?;
        }

        let existing = self.get_active(user_id).await?;

        if let Some(ref username) = request.username {
            if *username != existing.username {
                if let Some(other) = self.directory.find_by_username(username).await? {
                    if other.id != existing.id {
                        return Err(UserError::UsernameAlreadyExists);
                    }
                }
            }
        }

        let user = self.directory.update_profile(user_id, &request).await?;
        info!(user_id = %user.id, username = %user.username, "updated user profile");

        Ok(user)
    }

    /// Block or unblock a player
    pub async fn set_blocked(&self, user_id: &str, blocked: bool) -> UserResult<UserRecord> {
        let user = self.directory.set_blocked(user_id, blocked).await?;
        warn!(user_id = %user.id, blocked, "changed user block state");
        Ok(user)
    }

    /// Retire a user. The record stays for history but stops resolving.
    pub async fn delete_user(&self, user_id: &str) -> UserResult<()> {
        let user = self.get_active(user_id).await?;
        self.directory.soft_delete(&user.id).await?;
        warn!(user_id = %user.id, username = %user.username, "deleted user");
        Ok(())
    }

    async fn get_active(&self, user_id: &str) -> UserResult<UserRecord> {
        self.directory
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(UserError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryUserDirectory;
    use gamehub_database::UserRole;

    fn create_test_service() -> UserService {
        UserService::new(Arc::new(InMemoryUserDirectory::new()))
    }

    fn create_valid_user_request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            name: "Test Player".to_string(),
            email: format!("{username}@example.com"),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let service = create_test_service();

        let user = service
            .create_user(create_valid_user_request("  player_one "))
            .await
            .unwrap();

        assert_eq!(user.username, "player_one");
        assert_eq!(user.email, "player_one@example.com");
        assert_eq!(user.role, UserRole::Player);
        assert!(user.image.is_none());
        assert!(user.is_active);
        assert!(!user.is_blocked);
    }

    #[tokio::test]
    async fn test_create_user_duplicates() {
        let service = create_test_service();
        service.create_user(create_valid_user_request("ada")).await.unwrap();

        let err = service
            .create_user(create_valid_user_request("ada"))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::UsernameAlreadyExists);

        let mut request = create_valid_user_request("grace");
        request.email = "ada@example.com".to_string();
        let err = service.create_user(request).await.unwrap_err();
        assert_eq!(err, UserError::EmailAlreadyExists);
    }

    #[tokio::test]
    async fn test_create_user_invalid_input() {
        let service = create_test_service();

        let mut request = create_valid_user_request("ada");
        request.email = "not-an-email".to_string();
        assert!(matches!(
            service.create_user(request).await,
            Err(UserError::ValidationFailed(_))
        ));

        let mut request = create_valid_user_request("ada");
        request.name = "   ".to_string();
        assert!(matches!(
            service.create_user(request).await,
            Err(UserError::ValidationFailed(_))
        ));

        assert!(matches!(
            service.create_user(create_valid_user_request("a b")).await,
            Err(UserError::ValidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_by_username() {
        let service = create_test_service();
        let created = service.create_user(create_valid_user_request("ada")).await.unwrap();

        let details = service.get_user_by_username("ada").await.unwrap();
        assert_eq!(details.id, created.id);
        assert_eq!(details.role, UserRole::Player);

        service.delete_user(&created.id).await.unwrap();
        assert_eq!(
            service.get_user_by_username("ada").await.unwrap_err(),
            UserError::UserNotFound
        );
    }

    #[tokio::test]
    async fn test_list_players_paginates() {
        let service = create_test_service();
        for name in ["dave", "carol", "bob", "alice", "erin"] {
            service.create_user(create_valid_user_request(name)).await.unwrap();
        }

        let page = service.list_players(2, 2).await.unwrap();
        let names: Vec<&str> = page.data.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["carol", "dave"]);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.page, page.limit), (2, 2));

        let past_end = service.list_players(9, 2).await.unwrap();
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.total_count, 5);

        assert!(matches!(
            service.list_players(0, 2).await,
            Err(UserError::ValidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = create_test_service();
        let ada = service.create_user(create_valid_user_request("ada")).await.unwrap();
        service.create_user(create_valid_user_request("grace")).await.unwrap();

        let updated = service
            .update_profile(
                &ada.id,
                UpdateProfileRequest {
                    username: Some("countess".to_string()),
                    image: Some("https://cdn.example.com/public/countess-profilePic".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "countess");
        assert!(updated.image.is_some());

        let taken = service
            .update_profile(
                &ada.id,
                UpdateProfileRequest {
                    username: Some("grace".to_string()),
                    image: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(taken, UserError::UsernameAlreadyExists);

        let same = service
            .update_profile(
                &ada.id,
                UpdateProfileRequest {
                    username: Some("countess".to_string()),
                    image: None,
                },
            )
            .await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_rejects_empty_and_unknown() {
        let service = create_test_service();
        let ada = service.create_user(create_valid_user_request("ada")).await.unwrap();

        assert!(matches!(
            service.update_profile(&ada.id, UpdateProfileRequest::default()).await,
            Err(UserError::ValidationFailed(_))
        ));

        let missing = service
            .update_profile(
                "nobody",
                UpdateProfileRequest {
                    username: Some("someone".to_string()),
                    image: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(missing, UserError::UserNotFound);
    }

    #[tokio::test]
    async fn test_set_blocked_round_trip() {
        let service = create_test_service();
        let ada = service.create_user(create_valid_user_request("ada")).await.unwrap();

        assert!(service.set_blocked(&ada.id, true).await.unwrap().is_blocked);
        assert!(service.get_user_by_username("ada").await.unwrap().is_blocked);
        assert!(!service.set_blocked(&ada.id, false).await.unwrap().is_blocked);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_user() {
        let service = create_test_service();
        assert_eq!(
            service.delete_user("missing").await.unwrap_err(),
            UserError::UserNotFound
        );
    }
}
