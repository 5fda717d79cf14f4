//! Blog resource manager - ownership-guarded CRUD over blogs.
//!
//! Every create and delete is a dual write: the blog document first, then the
//! creator's `blogs` back-reference list. The two writes are not atomic. If the
//! second one fails the collections drift and the failure is logged with both
//! ids so it can be reconciled by hand.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Blog, BlogWithCreator, CreateBlogInput, Principal, UpdateBlogInput};
use crate::error::DomainError;
use crate::ports::{BlogRepository, UserRepository};

use super::owner_lock::OwnerLocks;

/// Blog CRUD with creator-only mutation.
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    users: Arc<dyn UserRepository>,
    owner_locks: OwnerLocks,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            blogs,
            users,
            owner_locks: OwnerLocks::default(),
        }
    }

    /// All blogs with their creator expanded to `{id, username, name}`.
    pub async fn list(&self) -> Result<Vec<BlogWithCreator>, DomainError> {
        let blogs = self.blogs.find_all().await?;

        let creator_ids: Vec<Uuid> = blogs
            .iter()
            .map(|b| b.creator)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let creators: HashMap<Uuid, _> = self
            .users
            .find_many(&creator_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let creator = creators.get(&blog.creator).cloned();
                blog.with_creator(creator)
            })
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, DomainError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Blog",
                id,
            })
    }

    /// Create a blog owned by `principal` and append it to their `blogs`.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateBlogInput,
    ) -> Result<Blog, DomainError> {
        let _guard = self.owner_locks.acquire(principal.user_id).await;

        let mut creator = self
            .users
            .find_by_id(principal.user_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let blog = Blog::new(creator.id, input)?;
        let saved = self.blogs.insert(blog).await?;

        creator.blogs.push(saved.id);
        if let Err(e) = self.users.update(creator).await {
            tracing::warn!(
                blog_id = %saved.id,
                user_id = %principal.user_id,
                error = %e,
                "Blog created but creator's blog list was not updated"
            );
            return Err(e.into());
        }

        tracing::info!(blog_id = %saved.id, user_id = %principal.user_id, "Blog created");
        Ok(saved)
    }

    /// Replace the editable fields of a blog the principal created.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        input: UpdateBlogInput,
    ) -> Result<Blog, DomainError> {
        let mut blog = self.get(id).await?;

        if blog.creator != principal.user_id {
            tracing::debug!(
                blog_id = %id,
                user_id = %principal.user_id,
                "Update rejected, not the creator"
            );
            return Err(DomainError::Forbidden(
                "user can only update its own blog".to_string(),
            ));
        }

        blog.apply(input)?;
        let updated = self.blogs.update(blog).await?;

        tracing::info!(blog_id = %id, user_id = %principal.user_id, "Blog updated");
        Ok(updated)
    }

    /// Delete a blog the principal created and pull it from their `blogs`.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        let blog = self.get(id).await?;

        if blog.creator != principal.user_id {
            tracing::debug!(
                blog_id = %id,
                user_id = %principal.user_id,
                "Delete rejected, not the creator"
            );
            return Err(DomainError::Forbidden(
                "user can only delete its own blog".to_string(),
            ));
        }

        let _guard = self.owner_locks.acquire(blog.creator).await;

        self.blogs.delete(id).await?;

        let Some(mut creator) = self.users.find_by_id(blog.creator).await? else {
            tracing::warn!(
                blog_id = %id,
                user_id = %blog.creator,
                "Deleted blog has no creator record"
            );
            return Ok(());
        };

        creator.blogs.retain(|blog_id| *blog_id != id);
        if let Err(e) = self.users.update(creator).await {
            tracing::warn!(
                blog_id = %id,
                user_id = %blog.creator,
                error = %e,
                "Blog deleted but creator's blog list was not updated"
            );
            return Err(e.into());
        }

        tracing::info!(blog_id = %id, user_id = %principal.user_id, "Blog deleted");
        Ok(())
    }
}
