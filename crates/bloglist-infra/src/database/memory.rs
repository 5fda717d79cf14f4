//! In-memory repositories - used when no database is configured and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bloglist_core::domain::{Blog, User};
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BaseRepository, BlogRepository, UserRepository};

/// Documents that carry their own id.
trait Document: Clone + Send + Sync {
    fn id(&self) -> Uuid;
}

impl Document for Blog {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Insertion-ordered document collection behind an async RwLock.
///
/// Note: Data is lost on process restart.
struct Collection<T> {
    docs: RwLock<Vec<T>>,
}

impl<T: Document> Collection<T> {
    fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Option<T> {
        let docs = self.docs.read().await;
        docs.iter().find(|d| d.id() == id).cloned()
    }

    async fn find_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let docs = self.docs.read().await;
        docs.iter().filter(|&d| pred(d)).cloned().collect()
    }

    async fn insert_unless(
        &self,
        doc: T,
        conflicts: impl Fn(&T, &T) -> bool,
    ) -> Result<T, RepoError> {
        let mut docs = self.docs.write().await;

        if docs
            .iter()
            .any(|d| d.id() == doc.id() || conflicts(d, &doc))
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        docs.push(doc.clone());
        Ok(doc)
    }

    async fn update(&self, doc: T) -> Result<T, RepoError> {
        let mut docs = self.docs.write().await;
        let slot = docs
            .iter_mut()
            .find(|d| d.id() == doc.id())
            .ok_or(RepoError::NotFound)?;

        *slot = doc.clone();
        Ok(doc)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| d.id() != id);

        if docs.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// In-memory blog repository.
pub struct InMemoryBlogRepository {
    blogs: Collection<Blog>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            blogs: Collection::new(),
        }
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Blog, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.blogs.find_by_id(id).await)
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.blogs.insert_unless(blog, |_, _| false).await
    }

    async fn update(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.blogs.update(blog).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.blogs.delete(id).await
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        Ok(self.blogs.find_where(|_| true).await)
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Blog>, RepoError> {
        Ok(self.blogs.find_where(|b| ids.contains(&b.id)).await)
    }
}

/// In-memory user repository. Usernames are kept unique on insert.
pub struct InMemoryUserRepository {
    users: Collection<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Collection::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.find_by_id(id).await)
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        self.users
            .insert_unless(user, |existing, new| existing.username == new.username)
            .await
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        self.users.update(user).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users.delete(id).await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .find_where(|u| u.username == username)
            .await
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.find_where(|_| true).await)
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        Ok(self.users.find_where(|u| ids.contains(&u.id)).await)
    }
}
