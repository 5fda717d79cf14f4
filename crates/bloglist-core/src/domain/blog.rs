use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Blog entity - one authored post, owned by the user that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
    pub summary: Option<String>,
    /// Id of the creating user. Never changes after creation.
    pub creator: Uuid,
}

/// Fields accepted when creating a blog.
#[derive(Debug, Clone, Default)]
pub struct CreateBlogInput {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: Option<u32>,
    pub summary: Option<String>,
}

/// Replacement fields for an existing blog.
///
/// Every editable field is overwritten: absent optional fields are cleared
/// and absent likes reset to zero.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogInput {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: Option<u32>,
    pub summary: Option<String>,
}

/// Partial user projection embedded in blog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// A blog with its creator reference expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogWithCreator {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
    pub summary: Option<String>,
    /// `None` when the creator record no longer exists.
    pub creator: Option<CreatorSummary>,
}

impl Blog {
    /// Create a new blog owned by `creator`.
    pub fn new(creator: Uuid, input: CreateBlogInput) -> Result<Self, DomainError> {
        validate_required(&input.title, &input.url)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            url: input.url,
            likes: input.likes.unwrap_or(0),
            summary: input.summary,
            creator,
        })
    }

    /// Overwrite the editable fields. `id` and `creator` are left untouched.
    pub fn apply(&mut self, input: UpdateBlogInput) -> Result<(), DomainError> {
        validate_required(&input.title, &input.url)?;

        self.title = input.title;
        self.author = input.author;
        self.url = input.url;
        self.likes = input.likes.unwrap_or(0);
        self.summary = input.summary;
        Ok(())
    }

    pub fn with_creator(self, creator: Option<CreatorSummary>) -> BlogWithCreator {
        BlogWithCreator {
            id: self.id,
            title: self.title,
            author: self.author,
            url: self.url,
            likes: self.likes,
            summary: self.summary,
            creator,
        }
    }
}

fn validate_required(title: &str, url: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("blog title is required".to_string()));
    }
    if url.trim().is_empty() {
        return Err(DomainError::Validation("blog url is required".to_string()));
    }
    Ok(())
}
