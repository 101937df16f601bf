//! Input validation for directory writes.

use regex::Regex;
use crate::types::UserError;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserError> {
    if email.len() > 255 {
        return Err(UserError::ValidationFailed("Email too long".to_string()));
    }

    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| UserError::ValidationFailed("Invalid email regex".to_string()))?;

    if !email_regex.is_match(email) {
        return Err(UserError::ValidationFailed("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), UserError> {
    if username.len() < 3 {
        return Err(UserError::ValidationFailed("Username must be at least 3 characters long".to_string()));
    }

    if username.len() > 30 {
        return Err(UserError::ValidationFailed("Username must be less than 30 characters long".to_string()));
    }

    let username_regex = Regex::new(r"^[a-zA-Z0-9_-]+$")
        .map_err(|_| UserError::ValidationFailed("Invalid username regex".to_string()))?;

    if !username_regex.is_match(username) {
        return Err(UserError::ValidationFailed("Username can only contain letters, numbers, underscores, and hyphens".to_string()));
    }

    Ok(())
}

/// Validate the player's display name
pub fn validate_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::ValidationFailed("Name cannot be empty".to_string()));
    }

    if name.chars().count() > 50 {
        return Err(UserError::ValidationFailed("Name must be less than 50 characters long".to_string()));
    }

    if name.chars().any(|c| matches!(c, '\n' | '\r' | '\t' | '\0')) {
        return Err(UserError::ValidationFailed("Name contains invalid characters".to_string()));
    }

    Ok(())
}

/// Validate a profile image URL produced by the upload pipeline
pub fn validate_image_url(url: &str) -> Result<(), UserError> {
    if url.len() > 2048 {
        return Err(UserError::ValidationFailed("Image URL too long".to_string()));
    }

    let url_regex = Regex::new(r"^https?://[^\s/$.?#].[^\s]*$")
        .map_err(|_| UserError::ValidationFailed("Invalid URL regex".to_string()))?;

    if !url_regex.is_match(url) {
        return Err(UserError::ValidationFailed("Invalid image URL".to_string()));
    }

    Ok(())
}
