//! User directory operations: registration, listing and login.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{LoginOutcome, NewUserInput, User, UserWithBlogs};
use crate::error::{DomainError, RepoError};
use crate::ports::{BlogRepository, PasswordService, TokenService, UserRepository};

const MIN_CREDENTIAL_LEN: usize = 3;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    blogs: Arc<dyn BlogRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        blogs: Arc<dyn BlogRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            blogs,
            passwords,
            tokens,
        }
    }

    /// Register a new user with a hashed password.
    pub async fn register(&self, input: NewUserInput) -> Result<User, DomainError> {
        if input.username.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(DomainError::Validation(format!(
                "username must be at least {MIN_CREDENTIAL_LEN} characters long"
            )));
        }
        if input.password.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_CREDENTIAL_LEN} characters long"
            )));
        }

        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::Duplicate("username must be unique".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(input.username, input.name, password_hash);
        let saved = self.users.insert(user).await.map_err(|e| match e {
            // Lost a race against another registration of the same name.
            RepoError::Constraint(_) => {
                DomainError::Duplicate("username must be unique".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = %saved.id, username = %saved.username, "User registered");
        Ok(saved)
    }

    /// All users with their blog references resolved.
    pub async fn list(&self) -> Result<Vec<UserWithBlogs>, DomainError> {
        let users = self.users.find_all().await?;

        let blog_ids: Vec<Uuid> = users.iter().flat_map(|u| u.blogs.iter().copied()).collect();
        let blogs: HashMap<Uuid, _> = self
            .blogs
            .find_many(&blog_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let owned = user
                    .blogs
                    .iter()
                    .filter_map(|id| blogs.get(id).cloned())
                    .collect();
                UserWithBlogs { user, blogs: owned }
            })
            .collect())
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            tracing::debug!(username = %username, "Login rejected");
            return Err(DomainError::Unauthorized);
        }

        let token = self
            .tokens
            .generate_token(user.id, &user.username)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(LoginOutcome {
            token,
            expires_in: self.tokens.expiration_seconds(),
            username: user.username,
            name: user.name,
        })
    }
}
