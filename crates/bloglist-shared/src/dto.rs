//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/blogs` and `PUT /api/blogs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogRequest {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub username: String,
    pub name: Option<String>,
}

/// Blog as embedded in a user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
}

/// A user's public information. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<UserBlogResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_request_optional_fields_default() {
        let req: BlogRequest = serde_json::from_value(serde_json::json!({
            "title": "Blog without likes",
            "url": "https://hang.kaijanaho.fi/?p=117"
        }))
        .unwrap();

        assert_eq!(req.likes, None);
        assert_eq!(req.author, None);
    }

    #[test]
    fn test_blog_request_requires_title_and_url() {
        let missing = serde_json::from_value::<BlogRequest>(serde_json::json!({
            "author": "Hang Kaijanaho",
            "likes": 10
        }));

        assert!(missing.is_err());
    }

    #[test]
    fn test_negative_likes_are_rejected() {
        let negative = serde_json::from_value::<BlogRequest>(serde_json::json!({
            "title": "t",
            "url": "u",
            "likes": -1
        }));

        assert!(negative.is_err());
    }
}
