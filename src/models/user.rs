/// User model
///
/// Users are created by registration and mutated only through profile
/// updates (name and email); the id, password hash, and creation time are
/// immutable through that path, and users are never deleted.
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
///
/// # Example
///
/// ```
/// use tasklight::models::user::{UpdateProfile, User};
///
/// let mut user = User::new(
///     "Alice".to_string(),
///     "a@x.com".to_string(),
///     "$argon2id$...".to_string(),
/// );
///
/// let update = UpdateProfile {
///     name: Some("Alice B".to_string()),
///     ..Default::default()
/// };
/// update.apply(&mut user);
///
/// assert_eq!(user.name, "Alice B");
/// assert_eq!(user.email, "a@x.com");
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    ///
    /// Must be unique across all stored users; matched case-sensitively.
    pub email: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user with a fresh id and creation timestamp
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Input for registering a new user
///
/// The password arrives in plaintext and is hashed by the identity
/// service before anything is persisted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Partial profile update
///
/// Only non-`None` fields are applied; everything else is left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    /// New display name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,
}

impl UpdateProfile {
    /// Shallow-merges this update into `user`
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
    }
}
