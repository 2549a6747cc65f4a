//! User entity - represents a traveller account

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity representing an account in the travel network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub home_town: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Uuid, username: String, full_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            full_name,
            email,
            bio: None,
            home_town: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown to other users, falling back to the username
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// Update the profile bio
    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }

    /// Update the home town
    pub fn set_home_town(&mut self, home_town: Option<String>) {
        self.home_town = home_town;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(full_name: &str) -> User {
        User::new(
            Uuid::new_v4(),
            "wanderer".to_string(),
            full_name.to_string(),
            "wanderer@example.com".to_string(),
        )
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user = test_user("Alex Traveller");
        assert_eq!(user.display_name(), "Alex Traveller");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = test_user("   ");
        assert_eq!(user.display_name(), "wanderer");
    }

    #[test]
    fn test_set_bio_touches_updated_at() {
        let mut user = test_user("Alex");
        let before = user.updated_at;
        user.set_bio(Some("always on the road".to_string()));
        assert_eq!(user.bio.as_deref(), Some("always on the road"));
        assert!(user.updated_at >= before);
    }
}
