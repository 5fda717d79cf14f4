use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blog::{Blog, CreatorSummary};

/// User entity - a principal that can own blogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    /// Back-references to the blogs this user created, in creation order.
    pub blogs: Vec<Uuid>,
}

impl User {
    /// Create a new user with a generated ID and no blogs.
    pub fn new(username: String, name: Option<String>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            name,
            password_hash,
            blogs: Vec::new(),
        }
    }

    pub fn summary(&self) -> CreatorSummary {
        CreatorSummary {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// The authenticated identity a mutating operation acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
}

/// Fields accepted when registering a user.
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// A user with their blog references resolved.
#[derive(Debug, Clone)]
pub struct UserWithBlogs {
    pub user: User,
    pub blogs: Vec<Blog>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    /// Seconds until `token` expires.
    pub expires_in: i64,
    pub username: String,
    pub name: Option<String>,
}
