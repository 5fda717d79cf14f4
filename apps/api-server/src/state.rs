//! Application state - shared across all handlers.

use std::sync::Arc;

use bloglist_core::ports::{BlogRepository, TokenService, UserRepository};
use bloglist_core::services::{BlogService, UserService};
use bloglist_infra::database::{DatabaseConfig, InMemoryBlogRepository, InMemoryUserRepository};
use bloglist_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
use bloglist_infra::database::{DatabaseConnections, PostgresBlogRepository, PostgresUserRepository};

/// Which storage backend the repositories talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Postgres => "postgres",
            StorageKind::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<BlogService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<dyn TokenService>,
    pub storage: StorageKind,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, jwt: JwtConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let blogs = Arc::new(PostgresBlogRepository::new(connections.main.clone()));
                        let users = Arc::new(PostgresUserRepository::new(connections.main));
                        tracing::info!("Application state initialized (postgres)");
                        return Self::with_repositories(blogs, users, jwt, StorageKind::Postgres);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without postgres feature");
            }
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(jwt)
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::with_repositories(
            Arc::new(InMemoryBlogRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            jwt,
            StorageKind::Memory,
        )
    }

    fn with_repositories(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        jwt: JwtConfig,
        storage: StorageKind,
    ) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));

        Self {
            blogs: Arc::new(BlogService::new(blogs.clone(), users.clone())),
            users: Arc::new(UserService::new(
                users,
                blogs,
                Arc::new(Argon2PasswordService::new()),
                tokens.clone(),
            )),
            tokens,
            storage,
        }
    }
}
