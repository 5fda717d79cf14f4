//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use bloglist_core::domain::{Blog, User};
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BlogRepository, UserRepository};

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.into_iter().map(User::try_from).collect()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.into_iter().map(User::try_from).collect()
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        let result = BlogEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.into_iter().map(Blog::try_from).collect()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Blog>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = BlogEntity::find()
            .filter(blog::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.into_iter().map(Blog::try_from).collect()
    }
}
